//! Composes the text copied from a finalized selection
//!
//! Rows are read from the row source, not from rendered elements, so a
//! selection larger than the window copies completely.

use super::model::SelectionRange;
use unicode_width::UnicodeWidthStr;

/// Separator placed between aligned columns.
pub const COLUMN_SEPARATOR: &str = " | ";

/// Build the copy text for `range`.
///
/// - A single-row selection copies its captured text.
/// - Multi-row selections copy whole rows, with the first row replaced by
///   `start_text` and the last by `end_text`. An empty boundary fragment
///   drops that row (the drag began at a row end or stopped at a row start).
/// - With a `delimiter`, whole rows are split into columns, padded to the
///   widest cell and joined with [`COLUMN_SEPARATOR`].
///
/// Rows missing from the source are skipped.
pub fn compose_copy_text<F>(range: &SelectionRange, row_text: F, delimiter: Option<&str>) -> String
where
    F: Fn(usize) -> Option<String>,
{
    if range.start == range.end {
        return range.start_text.clone();
    }

    let mut start = range.start;
    let mut end = range.end;
    if range.start_text != range.end_text {
        if range.start_text.is_empty() {
            start += 1;
        }
        if range.end_text.is_empty() {
            end = end.saturating_sub(1);
        }
    }
    if start > end {
        return String::new();
    }

    let mut rows: Vec<(usize, String)> = (start..=end)
        .filter_map(|index| row_text(index).map(|text| (index, text)))
        .collect();

    if let Some(delimiter) = delimiter.filter(|delimiter| !delimiter.is_empty()) {
        let whole: Vec<String> = rows.into_iter().map(|(_, text)| text).collect();
        return align_columns(&whole, delimiter);
    }

    if rows.len() > 1 {
        for (index, text) in rows.iter_mut() {
            if *index == range.start {
                *text = range.start_text.clone();
            } else if *index == range.end {
                *text = range.end_text.clone();
            }
        }
    }
    rows.into_iter()
        .map(|(_, text)| text)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pad every column to its widest cell and join cells with [`COLUMN_SEPARATOR`].
pub fn align_columns(rows: &[String], delimiter: &str) -> String {
    let cells: Vec<Vec<&str>> = rows.iter().map(|row| row.split(delimiter).collect()).collect();

    let mut widths: Vec<usize> = Vec::new();
    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            let width = cell.width();
            match widths.get_mut(i) {
                Some(max) => *max = (*max).max(width),
                None => widths.push(width),
            }
        }
    }

    cells
        .iter()
        .map(|row| {
            let line = row
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    let pad = widths[i].saturating_sub(cell.width());
                    format!("{cell}{}", " ".repeat(pad))
                })
                .collect::<Vec<_>>()
                .join(COLUMN_SEPARATOR);
            line.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
