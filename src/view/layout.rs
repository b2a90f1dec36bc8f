//! Screen layout.
//!
//! Pure layout logic: the row pane framed by two edge lines, with the
//! status bar below.

use crate::state::AppState;
use crate::view::constants::{EDGE_HEIGHT, STATUS_BAR_HEIGHT};
use crate::view::{list_pane, status_bar};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

/// Areas of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewAreas {
    /// Top edge line.
    pub top_edge: Rect,
    /// Rows of the list.
    pub rows: Rect,
    /// Bottom edge line.
    pub bottom_edge: Rect,
    /// Status bar.
    pub status: Rect,
}

/// Split the frame area.
pub fn calculate_areas(area: Rect) -> ViewAreas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(EDGE_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(EDGE_HEIGHT),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);

    ViewAreas {
        top_edge: chunks[0],
        rows: chunks[1],
        bottom_edge: chunks[2],
        status: chunks[3],
    }
}

/// Render the full screen.
///
/// The row pane of `state` must already match [`calculate_areas`] for this
/// frame, otherwise mouse positions and drawn rows disagree.
pub fn render_layout(frame: &mut Frame, state: &AppState) {
    let areas = calculate_areas(frame.area());
    list_pane::render_edges(frame, areas.top_edge, areas.bottom_edge, state);
    list_pane::render_rows(frame, areas.rows, state);
    status_bar::render_status_bar(frame, areas.status, state);
}
