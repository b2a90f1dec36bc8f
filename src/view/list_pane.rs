//! Row pane rendering.
//!
//! Draws the visible rows of the list with the native selection
//! highlighted, and the two pane edges coloured by the bounce indicator.

use crate::selection::RenderSurface;
use crate::state::AppState;
use crate::surface::TextPosition;
use crate::window::Intensity;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::ops::Range;

/// Style of a selected character range.
const SELECTED: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Border style for one edge of the pane.
pub fn edge_style(intensity: Intensity) -> Style {
    match intensity {
        Intensity::Off => Style::default().fg(Color::DarkGray),
        Intensity::Full => Style::default()
            .fg(Color::LightYellow)
            .add_modifier(Modifier::BOLD),
        Intensity::Dim => Style::default().fg(Color::Yellow).add_modifier(Modifier::DIM),
    }
}

/// Render the top and bottom edge lines.
pub fn render_edges(frame: &mut Frame, top: Rect, bottom: Rect, state: &AppState) {
    let indicator = state.list().bounce_indicator();
    let title = format!(" {} ", state.source_label);
    frame.render_widget(
        Block::default()
            .borders(Borders::TOP)
            .border_style(edge_style(indicator.top))
            .title(title),
        top,
    );
    frame.render_widget(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(edge_style(indicator.bottom)),
        bottom,
    );
}

/// Render the visible rows into `area`.
pub fn render_rows(frame: &mut Frame, area: Rect, state: &AppState) {
    let lines = visible_lines(state, usize::from(area.height));
    frame.render_widget(Paragraph::new(lines), area);
}

/// Styled lines for the first `height` visible rows.
pub fn visible_lines(state: &AppState, height: usize) -> Vec<Line<'static>> {
    let list = state.list();
    let highlight = list.native().highlighted(list.surface().instance());
    let left = state.scroll_left_cols();
    let first = state.first_visible_row();

    let lines = state.lines().borrow();
    (first..first + height)
        .map_while(|row| lines.get(row).map(|text| styled_row(row, text, left, highlight)))
        .collect()
}

fn styled_row(
    row: usize,
    text: &str,
    left: usize,
    highlight: Option<(TextPosition, TextPosition)>,
) -> Line<'static> {
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();
    let selected = match highlight {
        Some((start, end)) if (start.row..=end.row).contains(&row) => {
            let from = if row == start.row { start.col.min(len) } else { 0 };
            let to = if row == end.row { end.col.min(len) } else { len };
            from..to.max(from)
        }
        _ => 0..0,
    };

    let mut spans = Vec::with_capacity(3);
    for (range, style) in [
        (0..selected.start, Style::default()),
        (selected.clone(), SELECTED),
        (selected.end..len, Style::default()),
    ] {
        let content = visible(&chars, range, left);
        if !content.is_empty() {
            spans.push(Span::styled(content, style));
        }
    }
    Line::from(spans)
}

/// Characters of `range` right of the horizontal scroll offset.
fn visible(chars: &[char], range: Range<usize>, left: usize) -> String {
    let start = range.start.max(left);
    if start >= range.end {
        return String::new();
    }
    chars[start..range.end].iter().collect()
}
