//! TUI rendering and terminal management (impure shell)

pub mod constants;
pub mod layout;
pub mod list_pane;
pub mod status_bar;

use crate::config::{KeyBindings, ResolvedConfig};
use crate::model::{AppError, InputError, LineStore};
use crate::source::InputSource;
use crate::state::{handle_mouse_event, AppState};
use constants::TICK_INTERVAL;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEvent, KeyEventKind, MouseEvent,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::Backend, backend::CrosstermBackend, layout::Rect, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, trace};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Input source error
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    state: AppState,
    input_source: InputSource,
    key_bindings: KeyBindings,
    last_tick: Instant,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Set up the terminal (raw mode, alternate screen, mouse capture) and
    /// load the initial rows.
    pub fn new(
        input_source: InputSource,
        config: &ResolvedConfig,
        initial_row: usize,
    ) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Self::with_terminal(terminal, input_source, config, initial_row)
    }

    /// Run the main event loop
    ///
    /// Returns when the user quits. Waits for terminal events until the next
    /// tick or bounce timer deadline, whichever comes first.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            let timeout = self.next_timeout(Instant::now());
            let dirty = if event::poll(timeout)? {
                self.handle_event(event::read()?)
            } else {
                false
            };
            if self.state.should_quit {
                return Ok(());
            }
            let ticked = self.tick(Instant::now())?;
            if dirty || ticked {
                self.draw()?;
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Build the application on an existing terminal.
    ///
    /// Drains what the input source already has, lays out the pane for the
    /// terminal size and scrolls `initial_row` to the top.
    pub fn with_terminal(
        terminal: Terminal<B>,
        mut input_source: InputSource,
        config: &ResolvedConfig,
        initial_row: usize,
    ) -> Result<Self, TuiError> {
        let initial = input_source.poll()?;
        info!(
            source = %input_source.label(),
            rows = initial.len(),
            "Loaded initial rows"
        );
        let lines = LineStore::from_lines(initial).into_shared();
        let state = AppState::new(
            lines,
            config,
            input_source.label(),
            input_source.is_live(),
        );

        let mut app = Self {
            terminal,
            state,
            input_source,
            key_bindings: KeyBindings::default(),
            last_tick: Instant::now(),
        };
        app.layout_pane()?;
        if initial_row > 0 {
            app.state.scroll_to_row(initial_row, Instant::now());
        }
        Ok(app)
    }

    /// Application state.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Text of the most recent copy.
    pub fn last_copied(&self) -> Option<&str> {
        self.state.last_copied.as_deref()
    }

    /// The terminal being drawn to.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Dispatch one terminal event. Returns true when a redraw is needed.
    pub fn handle_event(&mut self, event: Event) -> bool {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(width, height) => {
                debug!(width, height, "Terminal resized");
                self.set_pane_for(Rect::new(0, 0, width, height));
                true
            }
            _ => false,
        }
    }

    /// Timer work: fire due bounce stages and, once per tick interval, poll
    /// the input source. Returns true when a redraw is needed.
    pub fn tick(&mut self, now: Instant) -> Result<bool, TuiError> {
        let mut dirty = self.state.list_mut().poll_timers(now).is_some();
        if now.duration_since(self.last_tick) >= TICK_INTERVAL {
            self.last_tick = now;
            dirty |= self.poll_input()?;
        }
        Ok(dirty)
    }

    /// Render the current frame.
    pub fn draw(&mut self) -> Result<(), TuiError> {
        self.layout_pane()?;
        let state = &self.state;
        self.terminal.draw(|frame| layout::render_layout(frame, state))?;
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }
        let Some(action) = self.key_bindings.get(key) else {
            trace!(?key, "Unbound key");
            return false;
        };
        debug!(?action, "Key action");
        self.state.apply_action(action, Instant::now());
        true
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        let outcome = handle_mouse_event(&mut self.state, mouse, Instant::now());
        trace!(?outcome, "Mouse event");
        outcome != crate::state::MouseOutcome::Ignored
    }

    /// Append rows that arrived since the last poll.
    fn poll_input(&mut self) -> Result<bool, TuiError> {
        let was_live = self.state.live;
        let lines = self.input_source.poll()?;
        self.state.live = self.input_source.is_live();
        if lines.is_empty() {
            return Ok(was_live != self.state.live);
        }
        debug!(count = lines.len(), "New rows from input");
        self.state.append_lines(lines);
        Ok(true)
    }

    /// Wait until the next tick or bounce deadline.
    fn next_timeout(&self, now: Instant) -> Duration {
        let tick = (self.last_tick + TICK_INTERVAL).saturating_duration_since(now);
        match self.state.list().next_timer_deadline() {
            Some(deadline) => tick.min(deadline.saturating_duration_since(now)),
            None => tick,
        }
    }

    fn layout_pane(&mut self) -> Result<(), TuiError> {
        let size = self.terminal.size()?;
        self.set_pane_for(Rect::new(0, 0, size.width, size.height));
        Ok(())
    }

    fn set_pane_for(&mut self, area: Rect) {
        self.state.set_pane(layout::calculate_areas(area).rows);
    }
}

/// Initialize and run the TUI application with an input source.
///
/// Handles terminal setup, runs the event loop and restores the terminal on
/// exit, also when the loop fails. Returns the text of the last copy.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_source(
    input_source: InputSource,
    config: &ResolvedConfig,
    initial_row: usize,
) -> Result<Option<String>, TuiError> {
    let result = TuiApp::new(input_source, config, initial_row).and_then(|mut app| {
        app.run()?;
        app.state.list_mut().teardown();
        Ok(app.state.last_copied.take())
    });

    restore_terminal()?;
    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
