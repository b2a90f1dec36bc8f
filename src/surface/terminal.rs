//! Render surface backed by the document's element tree

use super::tree::{Forest, TextPosition};
use crate::model::SharedLines;
use crate::selection::{
    Boundary, InstanceId, MaterializedRow, Marker, MarkerKind, NodeId, RenderSurface, TreeQuery,
};
use std::cell::RefCell;
use std::ops::Range;
use std::rc::Rc;
use tracing::trace;

/// Materializes rows of a [`crate::model::LineStore`] into one instance of
/// the element tree.
///
/// Dropping the surface removes its instance from the document.
#[derive(Debug)]
pub struct TerminalSurface {
    forest: Rc<RefCell<Forest>>,
    instance: InstanceId,
    lines: SharedLines,
    row_height: f64,
}

impl TerminalSurface {
    pub(crate) fn new(forest: Rc<RefCell<Forest>>, lines: SharedLines, row_height: f64) -> Self {
        let instance = forest.borrow_mut().create_instance();
        Self {
            forest,
            instance,
            lines,
            row_height,
        }
    }

    /// Row source.
    pub fn lines(&self) -> &SharedLines {
        &self.lines
    }

    /// Boundary at a character column of a rendered row.
    pub fn boundary_at(&self, row: usize, col: usize) -> Option<Boundary> {
        self.forest
            .borrow()
            .tree(self.instance)?
            .boundary_at(row, col)
    }

    /// Row position of a boundary owned by this instance.
    pub fn position_of(&self, boundary: Boundary) -> Option<TextPosition> {
        self.forest.borrow().tree(self.instance)?.position(boundary)
    }

    /// First and last rendered row.
    pub fn rendered_bounds(&self) -> Option<(usize, usize)> {
        self.forest.borrow().tree(self.instance)?.rendered_bounds()
    }
}

impl TreeQuery for TerminalSurface {
    fn find_ancestor_with_marker(
        &self,
        node: NodeId,
        kind: MarkerKind,
    ) -> Option<(NodeId, Marker)> {
        self.forest.borrow().find_ancestor_with_marker(node, kind)
    }

    fn find_descendant_with_marker(&self, root: NodeId, marker: &Marker) -> Option<NodeId> {
        self.forest.borrow().find_descendant_with_marker(root, marker)
    }

    fn find_descendant_with_text(&self, root: NodeId, text: &str) -> Option<NodeId> {
        self.forest.borrow().find_descendant_with_text(root, text)
    }

    fn text_content(&self, node: NodeId) -> Option<String> {
        self.forest.borrow().text_content(node)
    }
}

impl RenderSurface for TerminalSurface {
    fn instance(&self) -> InstanceId {
        self.instance
    }

    fn row_count(&self) -> usize {
        self.lines.borrow().len()
    }

    fn row_text(&self, index: usize) -> Option<String> {
        self.lines.borrow().get(index).map(str::to_string)
    }

    fn measure_row_height(&self) -> Option<f64> {
        let rendered = self.rendered_bounds().is_some();
        (rendered && self.row_height > 0.0).then_some(self.row_height)
    }

    fn render(&mut self, rows: Range<usize>) {
        let lines = self.lines.borrow();
        let rows: Vec<(usize, String)> = rows
            .filter_map(|index| lines.get(index).map(|line| (index, line.to_string())))
            .collect();
        drop(lines);

        trace!(instance = %self.instance, count = rows.len(), "Rendering rows");
        if let Some(tree) = self.forest.borrow_mut().tree_mut(self.instance) {
            tree.rebuild(rows);
        }
    }

    fn materialized_rows(&self) -> Vec<MaterializedRow> {
        self.forest
            .borrow()
            .tree(self.instance)
            .map(|tree| {
                tree.rows()
                    .map(|(index, node)| MaterializedRow { index, node })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn row_node(&self, index: usize) -> Option<NodeId> {
        self.forest.borrow().tree(self.instance)?.row_node(index)
    }
}

impl Drop for TerminalSurface {
    fn drop(&mut self) {
        if let Ok(mut forest) = self.forest.try_borrow_mut() {
            forest.remove_instance(self.instance);
        }
    }
}
