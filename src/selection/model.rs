//! Logical selection model
//!
//! Tracks a selection by row index, character offset and anchor id, so it
//! survives the rows being destroyed and re-rendered.

use super::platform::{
    anchor_of, row_of, AnchorId, MarkerKind, NodeId, PlatformSelection, TreeQuery,
};
use tracing::debug;

/// One end of a logical selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionEdge {
    /// Logical row index.
    pub row: usize,
    /// Character offset inside the anchored element (or the row when no anchor was captured).
    pub offset: usize,
    /// Stable id of the inline element holding the boundary.
    pub anchor_id: Option<AnchorId>,
    /// Text fragment of this row covered by the selection.
    pub text: String,
}

impl SelectionEdge {
    /// Edge at the start of a row with nothing captured yet.
    pub fn at_row(row: usize) -> Self {
        Self {
            row,
            ..Self::default()
        }
    }
}

/// Direction of the drag that produced a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Anchor above focus (or on the same row).
    #[default]
    Forward,
    /// Anchor below focus.
    Backward,
}

/// First and last line of the selected text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoundaryLines {
    /// Fragment of the topmost selected row.
    pub first: String,
    /// Fragment of the bottommost selected row.
    pub last: String,
}

impl BoundaryLines {
    /// Split selected text on line breaks and keep both ends.
    ///
    /// An empty first or last fragment is kept: it means the drag started
    /// at the end of a row or stopped at the beginning of one.
    pub fn from_text(text: &str) -> Self {
        let mut lines = text.split('\n').map(|line| line.trim_end_matches('\r'));
        let first = lines.next().unwrap_or_default();
        let last = lines.last().unwrap_or(first);
        Self {
            first: first.to_string(),
            last: last.to_string(),
        }
    }
}

/// A drag in progress. `start` and `end` follow drag order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragState {
    /// Anchor side, captured once.
    pub start: SelectionEdge,
    /// Focus side, updated on every pointer move.
    pub end: SelectionEdge,
    /// Boundary lines seen on the last pointer move.
    pub candidates: BoundaryLines,
}

impl DragState {
    fn new(row: usize) -> Self {
        Self {
            start: SelectionEdge::at_row(row),
            end: SelectionEdge::at_row(row),
            candidates: BoundaryLines::default(),
        }
    }

    /// Edges ordered top to bottom plus the drag direction.
    pub fn ordered(&self) -> (SelectionEdge, SelectionEdge, Direction) {
        let mut start = self.start.clone();
        let mut end = self.end.clone();
        if start.row <= end.row {
            start.text = self.candidates.first.clone();
            end.text = self.candidates.last.clone();
            (start, end, Direction::Forward)
        } else {
            start.text = self.candidates.last.clone();
            end.text = self.candidates.first.clone();
            (end, start, Direction::Backward)
        }
    }
}

/// A finished selection with `start.row <= end.row`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalSelection {
    /// Top edge.
    pub start: SelectionEdge,
    /// Bottom edge.
    pub end: SelectionEdge,
    /// Direction of the drag that produced it.
    pub direction: Direction,
}

/// Selection state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// Nothing selected.
    #[default]
    None,
    /// Pointer is down and dragging.
    Dragging(DragState),
    /// Pointer released; normalized.
    Finalized(FinalSelection),
}

/// Selection as reported to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionRange {
    /// First selected row.
    pub start: usize,
    /// Last selected row.
    pub end: usize,
    /// Fragment of the first row (the whole text for single-row selections).
    pub start_text: String,
    /// Fragment of the last row (empty for single-row selections).
    pub end_text: String,
    /// Offset inside the first row's anchored element.
    pub start_offset: usize,
    /// Offset inside the last row's anchored element.
    pub end_offset: usize,
}

impl From<&FinalSelection> for SelectionRange {
    fn from(selection: &FinalSelection) -> Self {
        Self {
            start: selection.start.row,
            end: selection.end.row,
            start_text: selection.start.text.clone(),
            end_text: selection.end.text.clone(),
            start_offset: selection.start.offset,
            end_offset: selection.end.offset,
        }
    }
}

/// Tracks an in-progress or finalized logical selection.
#[derive(Debug, Clone, Default)]
pub struct SelectionModel {
    selection: Selection,
}

impl SelectionModel {
    /// Empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// True while a drag is in progress.
    pub fn is_selecting(&self) -> bool {
        matches!(self.selection, Selection::Dragging(_))
    }

    /// True when anything is selected or being selected.
    pub fn has_selection(&self) -> bool {
        !matches!(self.selection, Selection::None)
    }

    /// Finalized selection as reported to the host.
    pub fn range(&self) -> Option<SelectionRange> {
        match &self.selection {
            Selection::Finalized(selection) => Some(SelectionRange::from(selection)),
            _ => None,
        }
    }

    /// Start a drag on `row`.
    ///
    /// A previous selection that is not itself a drag is hard-cleared first.
    pub fn begin<P: PlatformSelection + ?Sized>(&mut self, row: usize, native: &mut P) {
        if !self.is_selecting() {
            self.clear(true, native);
        }
        debug!(row, "Selection started");
        self.selection = Selection::Dragging(DragState::new(row));
    }

    /// Track the native selection during a drag.
    pub fn extend<T, P>(&mut self, tree: &T, native: &P)
    where
        T: TreeQuery + ?Sized,
        P: PlatformSelection + ?Sized,
    {
        let Selection::Dragging(drag) = &mut self.selection else {
            return;
        };
        let Some(current) = native.get_current() else {
            return;
        };
        let (Some(anchor_row), Some(focus_row)) = (
            row_of(tree, current.anchor.node),
            row_of(tree, current.focus.node),
        ) else {
            return;
        };

        let candidates = BoundaryLines::from_text(&current.text);
        if anchor_row == drag.start.row
            && anchor_row_matches(tree, current.anchor.node, &candidates)
        {
            drag.start.offset = current.anchor.offset;
            if drag.start.anchor_id.is_none() {
                drag.start.anchor_id = anchor_of(tree, current.anchor.node);
            }
            drag.candidates = candidates;
        }

        drag.end.row = focus_row;
        drag.end.offset = current.focus.offset;
        drag.end.anchor_id = anchor_of(tree, current.focus.node);
    }

    /// Finish the drag and normalize so that `start <= end`.
    ///
    /// Returns `None` (and hard-clears) when nothing ended up selected.
    pub fn finalize<P: PlatformSelection + ?Sized>(
        &mut self,
        native: &mut P,
    ) -> Option<SelectionRange> {
        let Selection::Dragging(drag) = std::mem::take(&mut self.selection) else {
            return None;
        };

        let text = native
            .get_current()
            .map(|current| current.text)
            .unwrap_or_default();
        if text.is_empty() {
            self.clear(true, native);
            return None;
        }

        let DragState {
            mut start, mut end, ..
        } = drag;
        let lines = BoundaryLines::from_text(&text);
        let direction = if start.row == end.row {
            start.text = text;
            end.text = String::new();
            Direction::Forward
        } else if start.row < end.row {
            start.text = lines.first;
            end.text = lines.last;
            Direction::Forward
        } else {
            start.text = lines.last;
            end.text = lines.first;
            std::mem::swap(&mut start, &mut end);
            Direction::Backward
        };

        let selection = FinalSelection {
            start,
            end,
            direction,
        };
        let range = SelectionRange::from(&selection);
        debug!(start = range.start, end = range.end, ?direction, "Selection finalized");
        self.selection = Selection::Finalized(selection);
        Some(range)
    }

    /// Replace the state with an already normalized selection.
    pub fn set_finalized(&mut self, selection: FinalSelection) {
        self.selection = Selection::Finalized(selection);
    }

    /// Reset the model. A hard clear also removes the native selection.
    pub fn clear<P: PlatformSelection + ?Sized>(&mut self, hard: bool, native: &mut P) {
        if self.has_selection() {
            debug!(hard, "Selection cleared");
        }
        self.selection = Selection::None;
        if hard {
            native.clear();
        }
    }
}

/// The anchor row must contain one of the boundary lines, otherwise the
/// native selection is not anchored where the drag started.
fn anchor_row_matches<T: TreeQuery + ?Sized>(
    tree: &T,
    anchor: NodeId,
    candidates: &BoundaryLines,
) -> bool {
    let Some((row_node, _)) =
        tree.find_ancestor_with_marker(anchor, MarkerKind::RowIndex)
    else {
        return false;
    };
    tree.text_content(row_node).is_some_and(|text| {
        text.contains(candidates.first.as_str()) || text.contains(candidates.last.as_str())
    })
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
