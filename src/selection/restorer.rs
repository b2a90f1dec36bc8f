//! Re-applies the logical selection to freshly rendered rows
//!
//! Runs after every render and on explicit refresh. Every failure degrades
//! to a cleared selection; nothing is propagated to the caller.

use super::model::{Direction, Selection, SelectionEdge, SelectionModel};
use super::platform::{
    owner_of, Boundary, InstanceId, Marker, NodeId, PlatformSelection, RangeError, RenderSurface,
};
use std::ops::RangeInclusive;
use thiserror::Error;
use tracing::{debug, error};

/// Result of one restoration pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// Nothing is selected.
    NoSelection,
    /// A drag is in progress and manages the native selection itself.
    InProgress,
    /// The native selection belongs to another list instance.
    ForeignOwner(InstanceId),
    /// The selection lies entirely outside the rendered rows.
    Pending,
    /// The native selection now covers `rows`.
    Restored {
        /// Rendered rows covered, possibly clipped.
        rows: RangeInclusive<usize>,
        /// Whole-node single-row match was used.
        fast_path: bool,
    },
    /// Restoration failed and the selection was dropped.
    Cleared,
}

/// Failure while building the native range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RestoreError {
    /// The platform rejected a boundary.
    #[error(transparent)]
    Range(#[from] RangeError),

    /// A row inside the rendered bounds has no element.
    #[error("row {0} is not materialized")]
    RowNotMaterialized(usize),
}

/// Restores the native selection from a [`SelectionModel`].
#[derive(Debug, Clone, Default)]
pub struct SelectionRestorer {
    last: Option<RestoreOutcome>,
}

impl SelectionRestorer {
    /// Create a restorer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Outcome of the most recent pass.
    pub fn last_outcome(&self) -> Option<&RestoreOutcome> {
        self.last.as_ref()
    }

    /// Run one restoration pass.
    ///
    /// `forced` also restores an in-progress drag.
    pub fn restore<S, P>(
        &mut self,
        model: &mut SelectionModel,
        surface: &S,
        native: &mut P,
        forced: bool,
    ) -> RestoreOutcome
    where
        S: RenderSurface + ?Sized,
        P: PlatformSelection + ?Sized,
    {
        let outcome = restore_pass(model, surface, native, forced);
        self.last = Some(outcome.clone());
        outcome
    }
}

fn restore_pass<S, P>(
    model: &mut SelectionModel,
    surface: &S,
    native: &mut P,
    forced: bool,
) -> RestoreOutcome
where
    S: RenderSurface + ?Sized,
    P: PlatformSelection + ?Sized,
{
    let (start, end, direction) = match model.selection() {
        Selection::None => return RestoreOutcome::NoSelection,
        Selection::Dragging(_) if !forced => return RestoreOutcome::InProgress,
        Selection::Dragging(drag) => drag.ordered(),
        Selection::Finalized(selection) => (
            selection.start.clone(),
            selection.end.clone(),
            selection.direction,
        ),
    };

    if let Some(current) = native.get_current() {
        if let Some(owner) = owner_of(surface, current.anchor.node) {
            if owner != surface.instance() {
                debug!(
                    owner = %owner,
                    instance = %surface.instance(),
                    "Native selection owned elsewhere"
                );
                return RestoreOutcome::ForeignOwner(owner);
            }
        }
    }

    let rendered = surface.materialized_rows();
    let (Some(first), Some(last)) = (rendered.first(), rendered.last()) else {
        native.clear();
        return RestoreOutcome::Pending;
    };
    let (first, last) = (first.index, last.index);
    if end.row < first || start.row > last {
        native.clear();
        return RestoreOutcome::Pending;
    }

    let rows = start.row.max(first)..=end.row.min(last);
    match apply(surface, native, &start, &end, direction, first, last) {
        Ok(fast_path) => RestoreOutcome::Restored { rows, fast_path },
        Err(err) => {
            error!(
                error = %err,
                start_row = start.row,
                start_offset = start.offset,
                start_anchor = ?start.anchor_id,
                end_row = end.row,
                end_offset = end.offset,
                end_anchor = ?end.anchor_id,
                "Failed to restore selection"
            );
            model.clear(true, native);
            RestoreOutcome::Cleared
        }
    }
}

/// Build the native range. Returns whether the single-row fast path was used.
fn apply<S, P>(
    surface: &S,
    native: &mut P,
    start: &SelectionEdge,
    end: &SelectionEdge,
    direction: Direction,
    first: usize,
    last: usize,
) -> Result<bool, RestoreError>
where
    S: RenderSurface + ?Sized,
    P: PlatformSelection + ?Sized,
{
    if start.row == end.row && !start.text.is_empty() {
        let row = row_node(surface, start.row)?;
        if let Some(node) = surface.find_descendant_with_text(row, &start.text) {
            native.select_node(node)?;
            return Ok(true);
        }
    }

    let from = if start.row < first {
        Boundary::new(row_node(surface, first)?, 0)
    } else {
        resolve_edge(surface, start)?
    };
    let to = if end.row > last {
        let row = row_node(surface, last)?;
        Boundary::new(row, surface.text_len(row).unwrap_or(0))
    } else {
        resolve_edge(surface, end)?
    };

    match direction {
        Direction::Forward => native.set_range(from, to)?,
        Direction::Backward => native.set_range(to, from)?,
    }
    Ok(false)
}

fn row_node<S: RenderSurface + ?Sized>(surface: &S, row: usize) -> Result<NodeId, RestoreError> {
    surface
        .row_node(row)
        .ok_or(RestoreError::RowNotMaterialized(row))
}

/// Locate an edge inside its rendered row.
///
/// The anchored element is preferred; when it vanished the boundary falls
/// back to the start of the row. Offsets are clamped to the element's text.
fn resolve_edge<S: RenderSurface + ?Sized>(
    surface: &S,
    edge: &SelectionEdge,
) -> Result<Boundary, RestoreError> {
    let row = row_node(surface, edge.row)?;
    let (node, offset) = match &edge.anchor_id {
        Some(anchor) => {
            match surface.find_descendant_with_marker(row, &Marker::Anchor(anchor.clone())) {
                Some(node) => (node, edge.offset),
                None => (row, 0),
            }
        }
        None => (row, edge.offset),
    };
    let len = surface
        .text_len(node)
        .ok_or(RangeError::Detached(node))?;
    Ok(Boundary::new(node, offset.min(len)))
}

#[cfg(test)]
#[path = "restorer_tests.rs"]
mod tests;
