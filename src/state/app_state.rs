//! Application state and transitions.
//!
//! AppState wires one [`VirtualList`] to the emulated scroll element and to
//! the terminal pane it is drawn into. Terminal lines map to virtual pixels
//! through the configured row height.

use crate::config::ResolvedConfig;
use crate::list::{ListParams, ScrollOutcome, VirtualList};
use crate::model::{KeyAction, SharedLines};
use crate::state::scroll_handler;
use crate::surface::{Document, ScrollContainer, SharedSelection, TerminalSurface};
use crate::window::ScrollInput;
use ratatui::layout::Rect;
use std::rc::Rc;
use std::time::Instant;
use tracing::{debug, info};

/// The list widget as mounted in the terminal viewer.
pub type ListView = VirtualList<TerminalSurface, SharedSelection>;

/// Where a mouse drag started, in logical row and character column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragAnchor {
    /// Logical row.
    pub row: usize,
    /// Character column inside the row.
    pub col: usize,
}

/// Application state.
///
/// # State Machine
///
/// - **Idle**: no pointer pressed; keys and the wheel scroll the list
/// - **Dragging**: `drag` is set; pointer moves extend the selection and
///   scroll by one row past the pane edges
/// - **Quit**: `should_quit` is set; the event loop exits
#[derive(Debug)]
pub struct AppState {
    list: ListView,
    container: ScrollContainer,
    lines: SharedLines,
    /// Terminal area the rows are drawn into.
    pane: Rect,
    row_height: f64,

    /// Rows moved per wheel notch.
    pub wheel_rows: usize,

    /// Label of the input (file name or `<stdin>`).
    pub source_label: String,

    /// Rows may still arrive from the input source.
    pub live: bool,

    /// Anchor of the drag in progress.
    pub drag: Option<DragAnchor>,

    /// Text of the most recent copy.
    pub last_copied: Option<String>,

    /// Set by the quit action.
    pub should_quit: bool,
}

impl AppState {
    /// Mount the list over `lines` and scroll it to the first row.
    pub fn new(
        lines: SharedLines,
        config: &ResolvedConfig,
        source_label: impl Into<String>,
        live: bool,
    ) -> Self {
        let document = Document::new();
        let surface = document.mount(Rc::clone(&lines), config.row_height);
        let params = ListParams {
            window: config.window_params(),
            border: config.border_params(),
            copy_delimiter: config.copy_delimiter.clone(),
        };
        let list = VirtualList::new(surface, document.selection(), params, 0.0);

        let mut state = Self {
            list,
            container: ScrollContainer::new(0.0),
            lines,
            pane: Rect::default(),
            row_height: config.row_height,
            wheel_rows: config.wheel_rows,
            source_label: source_label.into(),
            live,
            drag: None,
            last_copied: None,
            should_quit: false,
        };
        state.list.update(false);
        state.sync_container();
        state.scroll_to_row(0, Instant::now());
        state
    }

    pub fn list(&self) -> &ListView {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListView {
        &mut self.list
    }

    pub fn container(&self) -> &ScrollContainer {
        &self.container
    }

    pub fn lines(&self) -> &SharedLines {
        &self.lines
    }

    /// Terminal area of the rows.
    pub fn pane(&self) -> Rect {
        self.pane
    }

    /// Virtual pixels per terminal line.
    pub fn row_height(&self) -> f64 {
        self.row_height
    }

    /// Number of logical rows.
    pub fn row_count(&self) -> usize {
        self.lines.borrow().len()
    }

    /// Terminal lines available for rows.
    pub fn viewport_rows(&self) -> usize {
        usize::from(self.pane.height)
    }

    /// Logical row on the first pane line.
    pub fn first_visible_row(&self) -> usize {
        self.list
            .layout()
            .map(|layout| layout.first_visible_row(self.row_height))
            .unwrap_or(0)
    }

    /// Horizontal scroll in character columns.
    pub fn scroll_left_cols(&self) -> usize {
        self.container.scroll_left() as usize
    }

    /// Place the rows in `pane`. A height change resizes the list.
    pub fn set_pane(&mut self, pane: Rect) {
        if pane == self.pane {
            return;
        }
        let resized = pane.height != self.pane.height;
        self.pane = pane;
        if resized {
            let view_height = f64::from(pane.height) * self.row_height;
            debug!(lines = pane.height, view_height, "Pane resized");
            self.container.set_client_height(view_height);
            self.list.resize(view_height);
            self.sync_container();
        }
    }

    /// Append rows that arrived from the input source.
    pub fn append_lines(&mut self, lines: Vec<String>) {
        if lines.is_empty() {
            return;
        }
        debug!(count = lines.len(), "Appending rows");
        self.lines.borrow_mut().extend(lines);
        self.list.update(false);
        self.sync_container();
    }

    /// Report the scroll element's offsets to the list.
    pub fn dispatch_scroll(&mut self, input: ScrollInput, now: Instant) -> ScrollOutcome {
        let outcome = self.list.on_scroll(input, now);
        self.sync_container();
        outcome
    }

    /// Scroll vertically by whole rows.
    pub fn scroll_by_rows(&mut self, rows: isize, now: Instant) -> ScrollOutcome {
        let input = self.container.scroll_by(rows as f64 * self.row_height);
        self.dispatch_scroll(input, now)
    }

    /// Scroll horizontally by character columns, never past the widest row.
    pub fn scroll_columns(&mut self, cols: isize, now: Instant) -> ScrollOutcome {
        let max = self.lines.borrow().max_width() as f64;
        let left = (self.container.scroll_left() + cols as f64).clamp(0.0, max);
        let input = self.container.scroll_left_to(left);
        self.dispatch_scroll(input, now)
    }

    /// Bring `row` to the top of the pane. `None` when already there.
    pub fn scroll_to_row(&mut self, row: usize, now: Instant) -> Option<ScrollOutcome> {
        let target = self.list.scroll_to_index(row)?;
        let input = self.container.scroll_to(target);
        Some(self.dispatch_scroll(input, now))
    }

    /// Copy the selection into `last_copied`. Returns the number of copied lines.
    pub fn copy_selection(&mut self) -> Option<usize> {
        let text = self.list.copy_text()?;
        let count = text.lines().count();
        info!(lines = count, "Selection copied");
        self.last_copied = Some(text);
        Some(count)
    }

    /// Apply a key action.
    pub fn apply_action(&mut self, action: KeyAction, now: Instant) {
        if action.is_scroll() {
            scroll_handler::handle_scroll_action(self, action, now);
            return;
        }
        match action {
            KeyAction::SelectAll => {
                self.drag = None;
                self.list.select_all();
            }
            KeyAction::ClearSelection => {
                self.drag = None;
                self.list.remove_selection();
            }
            KeyAction::CopySelection => {
                self.copy_selection();
            }
            KeyAction::RefreshSelection => {
                self.list.refresh_selection();
            }
            KeyAction::Quit => self.should_quit = true,
            _ => {}
        }
    }

    /// Logical (row, column) under a terminal cell of the pane.
    ///
    /// `None` outside the pane or below the last row.
    pub fn position_at(&self, column: u16, row: u16) -> Option<(usize, usize)> {
        let pane = self.pane;
        if column < pane.x || column >= pane.right() || row < pane.y || row >= pane.bottom() {
            return None;
        }
        let logical = self.first_visible_row() + usize::from(row - pane.y);
        (logical < self.row_count())
            .then(|| (logical, self.scroll_left_cols() + usize::from(column - pane.x)))
    }

    /// Like [`AppState::position_at`], with the cell clamped into the pane
    /// and onto the last row.
    pub fn clamped_position(&self, column: u16, row: u16) -> Option<(usize, usize)> {
        let pane = self.pane;
        if pane.is_empty() || self.row_count() == 0 {
            return None;
        }
        let column = column.clamp(pane.x, pane.right() - 1);
        let line = row.clamp(pane.y, pane.bottom() - 1) - pane.y;
        let logical = (self.first_visible_row() + usize::from(line)).min(self.row_count() - 1);
        Some((
            logical,
            self.scroll_left_cols() + usize::from(column - pane.x),
        ))
    }

    /// Match the scroll element to the list's content height and offset.
    fn sync_container(&mut self) {
        self.container
            .set_scroll_height(self.list.scroll_state().scroll_height);
        if self.container.scroll_top() != self.list.scroll_top() {
            self.container.scroll_to(self.list.scroll_top());
        }
    }
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
