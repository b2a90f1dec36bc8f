//! Viewer state.
//!
//! Handlers mutate [`AppState`] in response to keys and mouse events and
//! are testable without a terminal.

pub mod app_state;
pub mod mouse_handler;
pub mod scroll_handler;

// Re-export for convenience
pub use app_state::{AppState, DragAnchor, ListView};
pub use mouse_handler::{handle_mouse_event, MouseOutcome};
pub use scroll_handler::handle_scroll_action;
