//! In-memory element tree
//!
//! One [`ElementTree`] per widget instance, all held by a [`Forest`]:
//!
//! ```text
//! Root (instance marker)
//! └── Row (row-index marker)
//!     └── Span (anchor id "a{row}.{k}")
//!         └── Text
//! ```
//!
//! A row is split into one span per word (trailing space included), so the
//! concatenated text of a row is exactly the source line. Rebuilding a tree
//! bumps its generation; node ids issued before the rebuild stop resolving.

use crate::selection::{AnchorId, Boundary, InstanceId, Marker, MarkerKind, NodeId, TreeQuery};
use std::collections::HashMap;

const SLOT_BITS: u32 = 24;
const GENERATION_BITS: u32 = 24;
const SLOT_MASK: u64 = (1 << SLOT_BITS) - 1;
const GENERATION_MASK: u64 = (1 << GENERATION_BITS) - 1;

/// Split a node id into (instance, generation, slot).
fn decode(id: NodeId) -> (InstanceId, u32, usize) {
    let raw = id.raw();
    let instance = (raw >> (SLOT_BITS + GENERATION_BITS)) as u32;
    let generation = ((raw >> SLOT_BITS) & GENERATION_MASK) as u32;
    let slot = (raw & SLOT_MASK) as usize;
    (InstanceId::new(instance), generation, slot)
}

fn encode(instance: InstanceId, generation: u32, slot: usize) -> NodeId {
    NodeId::new(
        (u64::from(instance.get()) << (SLOT_BITS + GENERATION_BITS))
            | ((u64::from(generation) & GENERATION_MASK) << SLOT_BITS)
            | (slot as u64 & SLOT_MASK),
    )
}

/// Kind of element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    /// Instance root.
    Root,
    /// Rendered row.
    Row(usize),
    /// Inline word span.
    Span(AnchorId),
    /// Text leaf.
    Text(String),
}

#[derive(Debug, Clone)]
struct Element {
    kind: ElementKind,
    parent: Option<usize>,
    children: Vec<usize>,
    /// Character offset of this element's text inside its row.
    row_start: usize,
}

/// Position of a character between two characters of a rendered row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextPosition {
    /// Logical row.
    pub row: usize,
    /// Character column inside the row.
    pub col: usize,
}

impl TextPosition {
    /// Create a position.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Element tree of one widget instance.
#[derive(Debug, Clone)]
pub struct ElementTree {
    instance: InstanceId,
    generation: u32,
    elements: Vec<Element>,
    /// (row index, slot) in ascending row order.
    rows: Vec<(usize, usize)>,
}

impl ElementTree {
    fn new(instance: InstanceId) -> Self {
        let mut tree = Self {
            instance,
            generation: 0,
            elements: Vec::new(),
            rows: Vec::new(),
        };
        tree.reset();
        tree
    }

    fn reset(&mut self) {
        self.elements.clear();
        self.rows.clear();
        self.elements.push(Element {
            kind: ElementKind::Root,
            parent: None,
            children: Vec::new(),
            row_start: 0,
        });
    }

    /// Instance this tree belongs to.
    pub fn instance(&self) -> InstanceId {
        self.instance
    }

    /// Replace every rendered row.
    ///
    /// Rows must come in ascending order.
    pub fn rebuild<I>(&mut self, rows: I)
    where
        I: IntoIterator<Item = (usize, String)>,
    {
        self.generation = (self.generation + 1) & GENERATION_MASK as u32;
        self.reset();
        for (index, line) in rows {
            self.push_row(index, &line);
        }
    }

    fn push_row(&mut self, index: usize, line: &str) {
        let row = self.push(ElementKind::Row(index), 0, 0);
        self.rows.push((index, row));

        let mut words: Vec<&str> = line.split_inclusive(' ').collect();
        if words.is_empty() {
            words.push("");
        }
        let mut col = 0;
        for (k, word) in words.into_iter().enumerate() {
            let anchor = AnchorId::new(format!("a{index}.{k}"));
            let span = self.push(ElementKind::Span(anchor), row, col);
            self.push(ElementKind::Text(word.to_string()), span, col);
            col += word.chars().count();
        }
    }

    fn push(&mut self, kind: ElementKind, parent: usize, row_start: usize) -> usize {
        let slot = self.elements.len();
        self.elements.push(Element {
            kind,
            parent: Some(parent),
            children: Vec::new(),
            row_start,
        });
        self.elements[parent].children.push(slot);
        slot
    }

    fn id(&self, slot: usize) -> NodeId {
        encode(self.instance, self.generation, slot)
    }

    /// Resolve a node id to a slot of the current generation.
    fn slot(&self, node: NodeId) -> Option<usize> {
        let (instance, generation, slot) = decode(node);
        (instance == self.instance && generation == self.generation && slot < self.elements.len())
            .then_some(slot)
    }

    /// True when `node` belongs to the current generation of this tree.
    pub fn is_attached(&self, node: NodeId) -> bool {
        self.slot(node).is_some()
    }

    /// Kind of an attached node.
    pub fn kind(&self, node: NodeId) -> Option<&ElementKind> {
        self.slot(node).map(|slot| &self.elements[slot].kind)
    }

    /// Rendered rows as (index, node) in ascending order.
    pub fn rows(&self) -> impl Iterator<Item = (usize, NodeId)> + '_ {
        self.rows.iter().map(|&(index, slot)| (index, self.id(slot)))
    }

    /// Element of a rendered row.
    pub fn row_node(&self, index: usize) -> Option<NodeId> {
        self.rows
            .binary_search_by_key(&index, |&(row, _)| row)
            .ok()
            .map(|pos| self.id(self.rows[pos].1))
    }

    /// First and last rendered row.
    pub fn rendered_bounds(&self) -> Option<(usize, usize)> {
        Some((self.rows.first()?.0, self.rows.last()?.0))
    }

    fn text_of(&self, slot: usize, out: &mut String) {
        match &self.elements[slot].kind {
            ElementKind::Text(text) => out.push_str(text),
            ElementKind::Root => {
                for (i, &child) in self.elements[slot].children.iter().enumerate() {
                    if i > 0 {
                        out.push('\n');
                    }
                    self.text_of(child, out);
                }
            }
            ElementKind::Row(_) | ElementKind::Span(_) => {
                for &child in &self.elements[slot].children {
                    self.text_of(child, out);
                }
            }
        }
    }

    fn text(&self, slot: usize) -> String {
        let mut out = String::new();
        self.text_of(slot, &mut out);
        out
    }

    fn marker(&self, slot: usize) -> Option<Marker> {
        match &self.elements[slot].kind {
            ElementKind::Root => Some(Marker::Instance(self.instance)),
            ElementKind::Row(index) => Some(Marker::RowIndex(*index)),
            ElementKind::Span(anchor) => Some(Marker::Anchor(anchor.clone())),
            ElementKind::Text(_) => None,
        }
    }

    fn row_ancestor(&self, mut slot: usize) -> Option<(usize, usize)> {
        loop {
            if let ElementKind::Row(index) = self.elements[slot].kind {
                return Some((index, slot));
            }
            slot = self.elements[slot].parent?;
        }
    }

    /// Row position of a boundary inside this tree.
    pub fn position(&self, boundary: Boundary) -> Option<TextPosition> {
        let slot = self.slot(boundary.node)?;
        let (row, _) = self.row_ancestor(slot)?;
        Some(TextPosition::new(
            row,
            self.elements[slot].row_start + boundary.offset,
        ))
    }

    /// Boundary on the text leaf holding column `col` of a rendered row.
    ///
    /// Columns past the end of the row land at the end of its last leaf.
    pub fn boundary_at(&self, row: usize, col: usize) -> Option<Boundary> {
        let pos = self.rows.binary_search_by_key(&row, |&(index, _)| index).ok()?;
        let row_slot = self.rows[pos].1;
        let spans = &self.elements[row_slot].children;
        let mut chosen = None;
        for &span in spans {
            let Some(&leaf) = self.elements[span].children.first() else {
                continue;
            };
            let start = self.elements[leaf].row_start;
            let len = self.text(leaf).chars().count();
            chosen = Some((leaf, start, len));
            if col < start + len {
                break;
            }
        }
        let (leaf, start, len) = chosen?;
        Some(Boundary::new(
            self.id(leaf),
            col.saturating_sub(start).min(len),
        ))
    }

    /// Text between two positions, rows joined by `\n`.
    pub fn text_between(&self, from: TextPosition, to: TextPosition) -> String {
        let (from, to) = if from <= to { (from, to) } else { (to, from) };
        let mut out = String::new();
        let mut first = true;
        for &(index, slot) in &self.rows {
            if index < from.row || index > to.row {
                continue;
            }
            if !first {
                out.push('\n');
            }
            first = false;
            let line = self.text(slot);
            let start = if index == from.row { from.col } else { 0 };
            let end = if index == to.row {
                to.col
            } else {
                usize::MAX
            };
            out.extend(
                line.chars()
                    .skip(start)
                    .take(end.saturating_sub(start)),
            );
        }
        out
    }

    fn ancestor_with_marker(&self, node: NodeId, kind: MarkerKind) -> Option<(NodeId, Marker)> {
        let mut slot = self.slot(node)?;
        loop {
            if let Some(marker) = self.marker(slot) {
                if marker.kind() == kind {
                    return Some((self.id(slot), marker));
                }
            }
            slot = self.elements[slot].parent?;
        }
    }

    fn find_descendant<F>(&self, root: NodeId, predicate: F) -> Option<NodeId>
    where
        F: Fn(usize) -> bool,
    {
        let mut stack = vec![self.slot(root)?];
        while let Some(slot) = stack.pop() {
            if predicate(slot) {
                return Some(self.id(slot));
            }
            stack.extend(self.elements[slot].children.iter().rev());
        }
        None
    }
}

/// All element trees of the document.
#[derive(Debug, Default)]
pub struct Forest {
    trees: HashMap<InstanceId, ElementTree>,
    next_instance: u32,
}

impl Forest {
    /// Empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a tree for a new widget instance.
    pub fn create_instance(&mut self) -> InstanceId {
        self.next_instance += 1;
        let instance = InstanceId::new(self.next_instance);
        self.trees.insert(instance, ElementTree::new(instance));
        instance
    }

    /// Remove an instance and detach all its nodes.
    pub fn remove_instance(&mut self, instance: InstanceId) {
        self.trees.remove(&instance);
    }

    /// Tree of an instance.
    pub fn tree(&self, instance: InstanceId) -> Option<&ElementTree> {
        self.trees.get(&instance)
    }

    /// Mutable tree of an instance.
    pub fn tree_mut(&mut self, instance: InstanceId) -> Option<&mut ElementTree> {
        self.trees.get_mut(&instance)
    }

    /// Tree that issued `node`.
    pub fn owner(&self, node: NodeId) -> Option<&ElementTree> {
        let (instance, _, _) = decode(node);
        self.trees.get(&instance)
    }

    /// Instance and row position of a boundary, `None` when detached.
    pub fn locate(&self, boundary: Boundary) -> Option<(InstanceId, TextPosition)> {
        let tree = self.owner(boundary.node)?;
        Some((tree.instance(), tree.position(boundary)?))
    }
}

impl TreeQuery for Forest {
    fn find_ancestor_with_marker(
        &self,
        node: NodeId,
        kind: MarkerKind,
    ) -> Option<(NodeId, Marker)> {
        self.owner(node)?.ancestor_with_marker(node, kind)
    }

    fn find_descendant_with_marker(&self, root: NodeId, marker: &Marker) -> Option<NodeId> {
        let tree = self.owner(root)?;
        tree.find_descendant(root, |slot| tree.marker(slot).as_ref() == Some(marker))
    }

    fn find_descendant_with_text(&self, root: NodeId, text: &str) -> Option<NodeId> {
        let tree = self.owner(root)?;
        tree.find_descendant(root, |slot| tree.text(slot) == text)
    }

    fn text_content(&self, node: NodeId) -> Option<String> {
        let tree = self.owner(node)?;
        tree.slot(node).map(|slot| tree.text(slot))
    }
}
