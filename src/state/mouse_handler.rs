//! Mouse event handler.
//!
//! Translates terminal mouse events into pointer events of the list: a
//! press places a collapsed native selection, a drag moves its focus, a
//! release finalizes it. The wheel scrolls.

use crate::list::{PointerButton, ScrollOutcome};
use crate::selection::{PlatformSelection, SelectionRange};
use crate::state::{AppState, DragAnchor};
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use std::time::Instant;
use tracing::warn;

/// What a mouse event did.
#[derive(Debug, Clone, PartialEq)]
pub enum MouseOutcome {
    /// Nothing happened.
    Ignored,
    /// The list scrolled.
    Scrolled(ScrollOutcome),
    /// A drag started on this row.
    SelectionStarted(usize),
    /// The drag focus moved to this row.
    SelectionExtended(usize),
    /// The drag ended; `None` when nothing ended up selected.
    SelectionFinished(Option<SelectionRange>),
}

/// Map a terminal mouse button to a pointer button.
pub fn pointer_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Primary,
        MouseButton::Right => PointerButton::Secondary,
        MouseButton::Middle => PointerButton::Middle,
    }
}

/// Handle one mouse event.
pub fn handle_mouse_event(state: &mut AppState, mouse: MouseEvent, now: Instant) -> MouseOutcome {
    let wheel = state.wheel_rows as isize;
    match mouse.kind {
        MouseEventKind::ScrollUp => MouseOutcome::Scrolled(state.scroll_by_rows(-wheel, now)),
        MouseEventKind::ScrollDown => MouseOutcome::Scrolled(state.scroll_by_rows(wheel, now)),
        MouseEventKind::Down(button) => press(state, button, mouse.column, mouse.row),
        MouseEventKind::Drag(MouseButton::Left) => drag_to(state, mouse.column, mouse.row, now),
        MouseEventKind::Up(button) => release(state, button),
        _ => MouseOutcome::Ignored,
    }
}

fn press(state: &mut AppState, button: MouseButton, column: u16, row: u16) -> MouseOutcome {
    let Some((row, col)) = state.position_at(column, row) else {
        return MouseOutcome::Ignored;
    };
    let Some(anchor) = state.list().surface().boundary_at(row, col) else {
        return MouseOutcome::Ignored;
    };
    let list = state.list_mut();
    if !list.pointer_down(anchor.node, pointer_button(button)) {
        return MouseOutcome::Ignored;
    }
    if let Err(err) = list.native_mut().collapse(anchor) {
        warn!(error = %err, row, col, "Failed to place selection anchor");
        return MouseOutcome::Ignored;
    }
    state.drag = Some(DragAnchor { row, col });
    MouseOutcome::SelectionStarted(row)
}

fn drag_to(state: &mut AppState, column: u16, row: u16, now: Instant) -> MouseOutcome {
    let Some(anchor) = state.drag else {
        return MouseOutcome::Ignored;
    };

    let pane = state.pane();
    if row < pane.y {
        directed_scroll(state, -1, anchor, now);
    } else if row >= pane.bottom() {
        directed_scroll(state, 1, anchor, now);
    }

    let Some((row, col)) = state.clamped_position(column, row) else {
        return MouseOutcome::Ignored;
    };
    let surface = state.list().surface();
    let (Some(from), Some(to)) = (
        surface.boundary_at(anchor.row, anchor.col),
        surface.boundary_at(row, col),
    ) else {
        return MouseOutcome::Ignored;
    };

    let list = state.list_mut();
    if let Err(err) = list.native_mut().set_range(from, to) {
        warn!(error = %err, row, col, "Failed to extend selection");
        return MouseOutcome::Ignored;
    }
    list.pointer_move();
    MouseOutcome::SelectionExtended(row)
}

/// Scroll one row while selecting, as long as the drag anchor stays rendered.
fn directed_scroll(state: &mut AppState, rows: isize, anchor: DragAnchor, now: Instant) {
    let Some(rendered) = state.list().rendered_rows() else {
        return;
    };
    let keeps_anchor = if rows > 0 {
        anchor.row > rendered.start
    } else {
        anchor.row + 1 < rendered.end
    };
    if keeps_anchor {
        state.scroll_by_rows(rows, now);
    }
}

fn release(state: &mut AppState, button: MouseButton) -> MouseOutcome {
    let button = pointer_button(button);
    if button != PointerButton::Primary || state.drag.take().is_none() {
        return MouseOutcome::Ignored;
    }
    MouseOutcome::SelectionFinished(state.list_mut().pointer_up(button))
}

// ===== Tests =====

#[cfg(test)]
#[path = "mouse_handler_tests.rs"]
mod tests;
