//! The document's single native text selection

use super::tree::{Forest, TextPosition};
use crate::selection::{
    Boundary, InstanceId, NativeSelection, NodeId, PlatformSelection, RangeError, TreeQuery,
};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NativeRange {
    anchor: Boundary,
    focus: Boundary,
}

/// Native selection shared by every widget instance of a document.
///
/// Clones share the same underlying range. Boundaries reference nodes, so a
/// re-render of the owning instance makes the selection disappear until it
/// is restored.
#[derive(Debug, Clone)]
pub struct SharedSelection {
    forest: Rc<RefCell<Forest>>,
    range: Rc<RefCell<Option<NativeRange>>>,
}

impl SharedSelection {
    pub(crate) fn new(forest: Rc<RefCell<Forest>>) -> Self {
        Self {
            forest,
            range: Rc::new(RefCell::new(None)),
        }
    }

    fn validate(&self, boundary: Boundary) -> Result<(), RangeError> {
        let len = self
            .forest
            .borrow()
            .text_len(boundary.node)
            .ok_or(RangeError::Detached(boundary.node))?;
        if boundary.offset > len {
            return Err(RangeError::OffsetOutOfBounds {
                node: boundary.node,
                offset: boundary.offset,
                len,
            });
        }
        Ok(())
    }

    /// Place a collapsed selection at `at`, as a pointer press does.
    pub fn collapse(&mut self, at: Boundary) -> Result<(), RangeError> {
        self.set_range(at, at)
    }

    /// Move only the focus, keeping the anchor, as a drag does.
    pub fn extend_to(&mut self, focus: Boundary) -> Result<(), RangeError> {
        let anchor = self
            .range
            .borrow()
            .map(|range| range.anchor)
            .unwrap_or(focus);
        self.set_range(anchor, focus)
    }

    /// True when no range is set or it collapsed to a point.
    pub fn is_collapsed(&self) -> bool {
        self.range
            .borrow()
            .is_none_or(|range| range.anchor == range.focus)
    }

    /// Selected span of `instance` as ordered positions, for highlighting.
    ///
    /// `None` when the selection is empty, detached or owned by another instance.
    pub fn highlighted(&self, instance: InstanceId) -> Option<(TextPosition, TextPosition)> {
        let range = (*self.range.borrow())?;
        let forest = self.forest.borrow();
        let (anchor_owner, anchor) = forest.locate(range.anchor)?;
        let (focus_owner, focus) = forest.locate(range.focus)?;
        if anchor_owner != instance || focus_owner != instance || anchor == focus {
            return None;
        }
        Some(if anchor <= focus {
            (anchor, focus)
        } else {
            (focus, anchor)
        })
    }
}

impl PlatformSelection for SharedSelection {
    fn get_current(&self) -> Option<NativeSelection> {
        let range = (*self.range.borrow())?;
        let forest = self.forest.borrow();
        let (anchor_owner, anchor) = forest.locate(range.anchor)?;
        let (focus_owner, focus) = forest.locate(range.focus)?;
        let text = if anchor_owner == focus_owner {
            forest
                .tree(anchor_owner)
                .map(|tree| tree.text_between(anchor, focus))
                .unwrap_or_default()
        } else {
            String::new()
        };
        Some(NativeSelection {
            anchor: range.anchor,
            focus: range.focus,
            text,
        })
    }

    fn set_range(&mut self, anchor: Boundary, focus: Boundary) -> Result<(), RangeError> {
        self.validate(anchor)?;
        self.validate(focus)?;
        *self.range.borrow_mut() = Some(NativeRange { anchor, focus });
        Ok(())
    }

    fn select_node(&mut self, node: NodeId) -> Result<(), RangeError> {
        let len = self
            .forest
            .borrow()
            .text_len(node)
            .ok_or(RangeError::Detached(node))?;
        self.set_range(Boundary::new(node, 0), Boundary::new(node, len))
    }

    fn clear(&mut self) {
        *self.range.borrow_mut() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> (Rc<RefCell<Forest>>, InstanceId, SharedSelection) {
        let forest = Rc::new(RefCell::new(Forest::new()));
        let instance = forest.borrow_mut().create_instance();
        forest
            .borrow_mut()
            .tree_mut(instance)
            .expect("tree")
            .rebuild((0..5).map(|i| (i, format!("row {i} text"))));
        let selection = SharedSelection::new(Rc::clone(&forest));
        (forest, instance, selection)
    }

    fn at(forest: &Rc<RefCell<Forest>>, instance: InstanceId, row: usize, col: usize) -> Boundary {
        forest
            .borrow()
            .tree(instance)
            .and_then(|tree| tree.boundary_at(row, col))
            .expect("boundary")
    }

    #[test]
    fn backward_range_reports_text_in_document_order() {
        let (forest, instance, mut selection) = document();
        selection
            .set_range(at(&forest, instance, 3, 5), at(&forest, instance, 1, 4))
            .expect("range");
        let current = selection.get_current().expect("selection");
        assert_eq!(current.text, "1 text\nrow 2 text\nrow 3");
        assert_eq!(
            selection.highlighted(instance),
            Some((TextPosition::new(1, 4), TextPosition::new(3, 5)))
        );
    }

    #[test]
    fn offsets_past_node_length_are_rejected() {
        let (forest, instance, mut selection) = document();
        let boundary = at(&forest, instance, 0, 0);
        let err = selection
            .set_range(boundary, Boundary::new(boundary.node, 99))
            .expect_err("out of bounds");
        assert!(matches!(err, RangeError::OffsetOutOfBounds { offset: 99, .. }));
    }

    #[test]
    fn rerender_detaches_the_selection() {
        let (forest, instance, mut selection) = document();
        let start = at(&forest, instance, 0, 0);
        selection.collapse(start).expect("collapse");
        selection
            .extend_to(at(&forest, instance, 2, 3))
            .expect("extend");
        assert!(selection.get_current().is_some());

        forest
            .borrow_mut()
            .tree_mut(instance)
            .expect("tree")
            .rebuild((0..5).map(|i| (i, format!("row {i} text"))));
        assert_eq!(selection.get_current(), None);
        assert_eq!(selection.set_range(start, start), Err(RangeError::Detached(start.node)));
    }

    #[test]
    fn select_node_covers_whole_text() {
        let (forest, instance, mut selection) = document();
        let row = forest
            .borrow()
            .tree(instance)
            .and_then(|tree| tree.row_node(4))
            .expect("row");
        selection.select_node(row).expect("select");
        assert_eq!(
            selection.get_current().map(|s| s.text).as_deref(),
            Some("row 4 text")
        );
        selection.clear();
        assert!(selection.is_collapsed());
    }
}
