//! VirtualList - one virtualized list widget instance
//!
//! Owns the windowing components and the logical selection of one list and
//! runs them in a fixed order on every update cycle:
//!
//! ```text
//! scroll input -> ScrollCorrector -> WindowCalculator -> render -> SelectionRestorer
//!                                 \-> BorderDetector
//! ```
//!
//! Rendering is synchronous: [`RenderSurface::render`] returning is the
//! render-complete signal, so restoration always sees the fresh rows.

use crate::selection::{
    compose_copy_text, row_of, Direction, FinalSelection, NodeId, PlatformSelection,
    RenderSurface, RestoreOutcome, SelectionEdge, SelectionModel, SelectionRange,
    SelectionRestorer,
};
use crate::window::{
    BorderDetector, BorderParams, BorderStage, BounceIndicator, Correction, Geometry,
    ScrollCorrector, ScrollEvent, ScrollInput, ScrollState, WindowCalculator, WindowLayout,
    WindowParams,
};
use std::ops::Range;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Instant;
use tracing::{debug, trace};

/// Parameters of one list instance.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListParams {
    /// Window computation.
    pub window: WindowParams,
    /// Edge bounce detection.
    pub border: BorderParams,
    /// Column delimiter used when copying.
    pub copy_delimiter: Option<String>,
}

/// Pointer button of a press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Main button; the only one that selects.
    Primary,
    /// Context menu button.
    Secondary,
    /// Wheel button.
    Middle,
}

/// What one scroll event did.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollOutcome {
    /// Corrected input. Write `scroll_top` back to the scroll element when `adjusted`.
    pub correction: Correction,
    /// Scroll report sent to subscribers; `None` for horizontal-only input.
    pub event: Option<ScrollEvent>,
    /// New bounce stage, if it changed.
    pub border: Option<BorderStage>,
    /// Restoration run after a re-render, if rows were re-rendered.
    pub restore: Option<RestoreOutcome>,
}

/// A virtualized list bound to a render surface and the platform selection.
#[derive(Debug)]
pub struct VirtualList<S, P> {
    surface: S,
    native: P,
    params: ListParams,
    corrector: ScrollCorrector,
    calculator: WindowCalculator,
    border: BorderDetector,
    model: SelectionModel,
    restorer: SelectionRestorer,
    row_height: f64,
    view_height: f64,
    scroll_top: f64,
    known_row_count: Option<usize>,
    rendered: Option<Range<usize>>,
    subscribers: Vec<Sender<ScrollEvent>>,
}

impl<S, P> VirtualList<S, P>
where
    S: RenderSurface,
    P: PlatformSelection,
{
    /// Mount a list with a viewport of `view_height` pixels.
    ///
    /// Nothing renders until the first [`VirtualList::update`].
    pub fn new(surface: S, native: P, params: ListParams, view_height: f64) -> Self {
        Self {
            surface,
            native,
            corrector: ScrollCorrector::new(),
            calculator: WindowCalculator::new(params.window),
            border: BorderDetector::new(params.border),
            model: SelectionModel::new(),
            restorer: SelectionRestorer::new(),
            params,
            row_height: 0.0,
            view_height,
            scroll_top: 0.0,
            known_row_count: None,
            rendered: None,
            subscribers: Vec::new(),
        }
    }

    /// Recompute the window and re-render when it changed.
    ///
    /// A changed row count forces the recalculation. Returns `None` while
    /// the row height is unmeasured.
    pub fn update(&mut self, recalculate: bool) -> Option<WindowLayout> {
        let row_count = self.surface.row_count();
        let count_changed = self.known_row_count != Some(row_count);
        if count_changed {
            debug!(
                instance = %self.surface.instance(),
                previous = ?self.known_row_count,
                row_count,
                "Row count changed"
            );
            self.known_row_count = Some(row_count);
        }
        self.refresh_window(recalculate || count_changed)
            .map(|(layout, _)| layout)
    }

    /// Viewport height changed.
    pub fn resize(&mut self, view_height: f64) -> Option<WindowLayout> {
        debug!(view_height, "List resized");
        self.view_height = view_height;
        self.calculator.invalidate();
        self.refresh_window(true).map(|(layout, _)| layout)
    }

    /// Handle one raw scroll event from the scroll element.
    pub fn on_scroll(&mut self, input: ScrollInput, now: Instant) -> ScrollOutcome {
        let geometry = self.geometry();
        let correction = self
            .corrector
            .correct(input, &geometry, &self.params.window);
        if correction.horizontal_only {
            trace!(scroll_left = input.scroll_left, "Horizontal scroll");
            return ScrollOutcome {
                correction,
                event: None,
                border: None,
                restore: None,
            };
        }

        if correction.exit_bounce {
            self.border.exit_early(now);
        }
        self.scroll_top = correction.scroll_top;
        let border = self.border.observe(
            self.scroll_top,
            geometry.max_scroll_top(&self.params.window),
            now,
        );
        if let Some(stage) = border {
            debug!(?stage, "Bounce stage changed");
        }

        let restore = self
            .refresh_window(false)
            .and_then(|(_, restore)| restore);

        let event = self.scroll_state();
        self.subscribers.retain(|tx| tx.send(event).is_ok());

        ScrollOutcome {
            correction,
            event: Some(event),
            border,
            restore,
        }
    }

    /// Current scroll report.
    pub fn scroll_state(&self) -> ScrollEvent {
        self.position().report(self.params.window.top_offset)
    }

    /// Scroll position relative to the content, including the largest
    /// valid offset.
    pub fn position(&self) -> ScrollState {
        self.geometry().scroll_state(self.scroll_top, &self.params.window)
    }

    /// Scroll offset that puts row `index` at the top of the viewport.
    ///
    /// `None` when the list is not measured yet or already there. The host
    /// applies the offset to its scroll element, which reports it back
    /// through [`VirtualList::on_scroll`].
    pub fn scroll_to_index(&mut self, index: usize) -> Option<f64> {
        if !self.ensure_row_height() {
            return None;
        }
        let max = self.geometry().max_scroll_top(&self.params.window);
        let target = (self.row_height * index as f64 + self.params.window.top_offset).min(max);
        (target != self.scroll_top).then_some(target)
    }

    /// Subscribe to scroll reports.
    pub fn subscribe(&mut self) -> Receiver<ScrollEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Pointer pressed on `target`. Returns whether a drag started.
    pub fn pointer_down(&mut self, target: NodeId, button: PointerButton) -> bool {
        if button != PointerButton::Primary {
            trace!(?button, "Ignoring pointer press");
            return false;
        }
        let Some(row) = row_of(&self.surface, target) else {
            return false;
        };
        let hard_clear = !self.model.is_selecting();
        self.model.begin(row, &mut self.native);
        if hard_clear {
            self.border.cancel();
        }
        true
    }

    /// Pointer moved while pressed.
    pub fn pointer_move(&mut self) {
        if self.model.is_selecting() {
            self.model.extend(&self.surface, &self.native);
        }
    }

    /// Pointer released. Returns the finalized selection, if any.
    pub fn pointer_up(&mut self, button: PointerButton) -> Option<SelectionRange> {
        if button != PointerButton::Primary || !self.model.is_selecting() {
            return None;
        }
        self.model.finalize(&mut self.native)
    }

    /// Finalized selection.
    pub fn selection(&self) -> Option<SelectionRange> {
        self.model.range()
    }

    /// Select every row of the source.
    pub fn select_all(&mut self) -> Option<SelectionRange> {
        let row_count = self.surface.row_count();
        let last = row_count.checked_sub(1)?;
        let first_text = self.surface.row_text(0).unwrap_or_default();
        let last_text = self.surface.row_text(last).unwrap_or_default();
        let end = SelectionEdge {
            row: last,
            offset: last_text.chars().count(),
            anchor_id: None,
            text: if last == 0 { String::new() } else { last_text },
        };
        self.model.set_finalized(FinalSelection {
            start: SelectionEdge {
                row: 0,
                offset: 0,
                anchor_id: None,
                text: first_text,
            },
            end,
            direction: Direction::Forward,
        });
        debug!(row_count, "Selected all rows");
        self.restore_selection(true);
        self.model.range()
    }

    /// Drop the selection and cancel pending bounce timers.
    pub fn remove_selection(&mut self) {
        self.model.clear(true, &mut self.native);
        self.border.cancel();
    }

    /// Re-apply the selection to the rendered rows, including an in-progress drag.
    pub fn refresh_selection(&mut self) -> RestoreOutcome {
        self.restore_selection(true)
    }

    /// Text of the finalized selection, read from the row source.
    pub fn copy_text(&self) -> Option<String> {
        let range = self.model.range()?;
        let text = compose_copy_text(
            &range,
            |index| self.surface.row_text(index),
            self.params.copy_delimiter.as_deref(),
        );
        Some(text)
    }

    /// Fire a due bounce timer.
    pub fn poll_timers(&mut self, now: Instant) -> Option<BorderStage> {
        self.border.poll(now)
    }

    /// When the next bounce timer fires.
    pub fn next_timer_deadline(&self) -> Option<Instant> {
        self.border.next_deadline()
    }

    /// Bounce indicator for both edges.
    pub fn bounce_indicator(&self) -> BounceIndicator {
        self.border.indicator()
    }

    /// Current bounce stage.
    pub fn border_stage(&self) -> BorderStage {
        self.border.stage()
    }

    /// Unmount: cancel timers, close the scroll stream and forget the selection.
    ///
    /// The native selection is left alone; it may belong to another instance.
    pub fn teardown(&mut self) {
        self.border.cancel();
        self.subscribers.clear();
        self.model.clear(false, &mut self.native);
        debug!(instance = %self.surface.instance(), "List torn down");
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn native(&self) -> &P {
        &self.native
    }

    pub fn native_mut(&mut self) -> &mut P {
        &mut self.native
    }

    pub fn model(&self) -> &SelectionModel {
        &self.model
    }

    pub fn params(&self) -> &ListParams {
        &self.params
    }

    /// Most recent window layout.
    pub fn layout(&self) -> Option<&WindowLayout> {
        self.calculator.current()
    }

    /// Rows handed to the surface on the last render.
    pub fn rendered_rows(&self) -> Option<Range<usize>> {
        self.rendered.clone()
    }

    /// Measured row height, 0 until measured.
    pub fn row_height(&self) -> f64 {
        self.row_height
    }

    pub fn view_height(&self) -> f64 {
        self.view_height
    }

    pub fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    fn geometry(&self) -> Geometry {
        Geometry::new(self.row_height, self.surface.row_count(), self.view_height)
    }

    /// Measure a row, rendering the first one when nothing is rendered yet.
    fn ensure_row_height(&mut self) -> bool {
        if self.row_height > 0.0 {
            return true;
        }
        if self.surface.row_count() == 0 {
            return false;
        }
        if self.surface.measure_row_height().is_none() {
            self.surface.render(0..1);
        }
        match self.surface.measure_row_height() {
            Some(height) if height > 0.0 => {
                debug!(row_height = height, "Row height measured");
                self.row_height = height;
                true
            }
            _ => false,
        }
    }

    /// Calculate the window and render it when it changed, then restore
    /// the selection onto the new rows.
    fn refresh_window(&mut self, force: bool) -> Option<(WindowLayout, Option<RestoreOutcome>)> {
        if !self.ensure_row_height() {
            return None;
        }
        let geometry = self.geometry();
        let max = geometry.max_scroll_top(&self.params.window);
        if self.scroll_top > max {
            self.scroll_top = max;
        }

        let layout = self
            .calculator
            .calculate(self.scroll_top, &geometry, force)?;
        let rows = layout.window.clipped(geometry.row_count);
        if !force && self.rendered.as_ref() == Some(&rows) {
            return Some((layout, None));
        }

        self.surface.render(rows.clone());
        self.rendered = Some(rows);
        let restore = self.restore_selection(false);
        Some((layout, Some(restore)))
    }

    /// Run the restorer. A failed restoration hard-clears the selection,
    /// which also cancels the bounce timers.
    fn restore_selection(&mut self, force: bool) -> RestoreOutcome {
        let outcome = self
            .restorer
            .restore(&mut self.model, &self.surface, &mut self.native, force);
        if outcome == RestoreOutcome::Cleared {
            self.border.cancel();
        }
        outcome
    }
}

#[cfg(test)]
#[path = "list_tests.rs"]
mod tests;
