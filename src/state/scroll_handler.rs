//! Scrolling keyboard action handler.
//!
//! Moves the scroll element and reports the new offsets to the list, the
//! way a browser reports a scroll event after a key press.

use crate::list::ScrollOutcome;
use crate::model::KeyAction;
use crate::state::AppState;
use std::time::Instant;

/// Columns moved by one horizontal scroll step.
pub const HORIZONTAL_STEP: isize = 4;

/// Handle a scroll keyboard action.
///
/// Returns the outcome of the scroll event, or `None` when the action is
/// not a scroll action or the target is already reached.
pub fn handle_scroll_action(
    state: &mut AppState,
    action: KeyAction,
    now: Instant,
) -> Option<ScrollOutcome> {
    let page = state.viewport_rows().max(1) as isize;
    match action {
        KeyAction::ScrollUp => Some(state.scroll_by_rows(-1, now)),
        KeyAction::ScrollDown => Some(state.scroll_by_rows(1, now)),
        KeyAction::PageUp => Some(state.scroll_by_rows(-page, now)),
        KeyAction::PageDown => Some(state.scroll_by_rows(page, now)),
        KeyAction::ScrollToTop => state.scroll_to_row(0, now),
        KeyAction::ScrollToBottom => {
            let last = state.row_count().saturating_sub(1);
            state.scroll_to_row(last, now)
        }
        KeyAction::ScrollLeft => Some(state.scroll_columns(-HORIZONTAL_STEP, now)),
        KeyAction::ScrollRight => Some(state.scroll_columns(HORIZONTAL_STEP, now)),
        _ => None,
    }
}

#[cfg(test)]
#[path = "scroll_handler_tests.rs"]
mod tests;
