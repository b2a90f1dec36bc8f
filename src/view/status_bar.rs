//! One-line status bar.
//!
//! Shows the input, the visible rows, the materialized window, the scroll
//! offset, the selection and the bounce stage.

use crate::selection::Selection;
use crate::state::AppState;
use crate::window::BorderStage;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};

/// Render the status bar.
pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let style = if state.live {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Gray)
    };
    let paragraph = Paragraph::new(Line::from(status_text(state))).style(style);
    frame.render_widget(paragraph, area);
}

/// Status line text.
pub fn status_text(state: &AppState) -> String {
    let live = if state.live { " [LIVE]" } else { "" };
    format!(
        "{}{live} | {} | {} | top {:.0}px | {} | {}",
        state.source_label,
        rows_summary(state),
        window_summary(state),
        state.list().scroll_top(),
        selection_summary(state),
        stage_label(state.list().border_stage()),
    )
}

fn rows_summary(state: &AppState) -> String {
    let count = state.row_count();
    if count == 0 {
        return "rows 0/0".to_string();
    }
    let first = state.first_visible_row();
    let last = (first + state.viewport_rows()).min(count);
    format!("rows {}-{last}/{count}", first + 1)
}

fn window_summary(state: &AppState) -> String {
    match state.list().rendered_rows() {
        Some(rows) => format!("window {}..{}", rows.start, rows.end),
        None => "window -".to_string(),
    }
}

fn selection_summary(state: &AppState) -> String {
    match state.list().model().selection() {
        Selection::None => "no selection".to_string(),
        Selection::Dragging(drag) => format!("selecting from {}", drag.start.row + 1),
        Selection::Finalized(selection) => {
            let rows = selection.end.row - selection.start.row + 1;
            format!(
                "sel {}-{} ({rows} rows)",
                selection.start.row + 1,
                selection.end.row + 1
            )
        }
    }
}

fn stage_label(stage: BorderStage) -> &'static str {
    match stage {
        BorderStage::Neutral => "edge -",
        BorderStage::Near => "edge near",
        BorderStage::Active => "edge bounce",
        BorderStage::Fading => "edge fading",
    }
}
