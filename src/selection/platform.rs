//! Collaborator interfaces supplied by the render surface and the platform.
//!
//! The selection logic never touches concrete tree nodes or a global
//! selection object. It talks to three capabilities:
//!
//! - [`TreeQuery`]: marker-based ancestor/descendant lookups
//! - [`RenderSurface`]: the rows currently materialized for a window
//! - [`PlatformSelection`]: the single native text-selection object

use std::fmt;
use std::ops::Range;
use thiserror::Error;

/// Opaque handle of a rendered node. Only meaningful to the surface that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    /// Wrap a raw surface-specific value.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Identity of one list widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct InstanceId(u32);

impl InstanceId {
    /// Create an instance id.
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Raw value.
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "list#{}", self.0)
    }
}

/// Stable identifier of an inline sub-element of a row.
///
/// Survives re-rendering, unlike [`NodeId`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnchorId(String);

impl AnchorId {
    /// Create an anchor id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnchorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of marker a node can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// Row element tagged with its logical index.
    RowIndex,
    /// Inline element tagged with an anchor id.
    Anchor,
    /// Root element of a widget instance.
    Instance,
}

/// Marker value carried by a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Marker {
    /// Logical row index.
    RowIndex(usize),
    /// Anchor id.
    Anchor(AnchorId),
    /// Owning widget instance.
    Instance(InstanceId),
}

impl Marker {
    /// Kind of this marker.
    pub fn kind(&self) -> MarkerKind {
        match self {
            Marker::RowIndex(_) => MarkerKind::RowIndex,
            Marker::Anchor(_) => MarkerKind::Anchor,
            Marker::Instance(_) => MarkerKind::Instance,
        }
    }
}

/// One end of a native selection range.
///
/// `offset` counts characters into the node's text content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Boundary {
    /// Node holding the boundary.
    pub node: NodeId,
    /// Character offset inside the node's text.
    pub offset: usize,
}

impl Boundary {
    /// Create a boundary.
    pub fn new(node: NodeId, offset: usize) -> Self {
        Self { node, offset }
    }
}

/// Snapshot of the native selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeSelection {
    /// Where the selection started.
    pub anchor: Boundary,
    /// Where the selection currently ends.
    pub focus: Boundary,
    /// Selected text, rows separated by `\n`.
    pub text: String,
}

/// Failure to build a native range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    /// The node was removed by a re-render.
    #[error("node {0:?} is no longer attached")]
    Detached(NodeId),

    /// The offset points past the node's text.
    #[error("offset {offset} exceeds length {len} of node {node:?}")]
    OffsetOutOfBounds {
        /// Target node.
        node: NodeId,
        /// Requested offset.
        offset: usize,
        /// Text length of the node.
        len: usize,
    },
}

/// Marker-based tree walking supplied by the render surface.
pub trait TreeQuery {
    /// Nearest ancestor (or the node itself) carrying a marker of `kind`.
    fn find_ancestor_with_marker(&self, node: NodeId, kind: MarkerKind) -> Option<(NodeId, Marker)>;

    /// First descendant of `root` carrying exactly `marker`.
    fn find_descendant_with_marker(&self, root: NodeId, marker: &Marker) -> Option<NodeId>;

    /// First descendant of `root` whose text content equals `text`.
    fn find_descendant_with_text(&self, root: NodeId, text: &str) -> Option<NodeId>;

    /// Text content of a node, `None` when detached.
    fn text_content(&self, node: NodeId) -> Option<String>;

    /// Character length of a node's text, `None` when detached.
    fn text_len(&self, node: NodeId) -> Option<usize> {
        self.text_content(node).map(|text| text.chars().count())
    }
}

/// A row element currently materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterializedRow {
    /// Logical row index.
    pub index: usize,
    /// Row element.
    pub node: NodeId,
}

/// Component-based render surface that materializes rows.
pub trait RenderSurface: TreeQuery {
    /// Widget instance this surface renders.
    fn instance(&self) -> InstanceId;

    /// Number of logical rows in the row source.
    fn row_count(&self) -> usize;

    /// Plain text of a logical row.
    fn row_text(&self, index: usize) -> Option<String>;

    /// Height of a rendered row, `None` until one has been measured.
    fn measure_row_height(&self) -> Option<f64>;

    /// Re-materialize exactly `rows`. Returning means rendering is complete.
    fn render(&mut self, rows: Range<usize>);

    /// Rendered rows in ascending index order.
    fn materialized_rows(&self) -> Vec<MaterializedRow>;

    /// Element of a rendered row.
    fn row_node(&self, index: usize) -> Option<NodeId> {
        self.materialized_rows()
            .into_iter()
            .find(|row| row.index == index)
            .map(|row| row.node)
    }
}

/// The platform's single native text-selection object.
pub trait PlatformSelection {
    /// Current selection, if any.
    fn get_current(&self) -> Option<NativeSelection>;

    /// Replace the selection with the range `anchor..focus` (focus may precede anchor).
    fn set_range(&mut self, anchor: Boundary, focus: Boundary) -> Result<(), RangeError>;

    /// Select the whole content of a node.
    fn select_node(&mut self, node: NodeId) -> Result<(), RangeError>;

    /// Remove the selection.
    fn clear(&mut self);
}

/// Logical row of the nearest row element around `node`.
pub fn row_of<T: TreeQuery + ?Sized>(tree: &T, node: NodeId) -> Option<usize> {
    match tree.find_ancestor_with_marker(node, MarkerKind::RowIndex)? {
        (_, Marker::RowIndex(index)) => Some(index),
        _ => None,
    }
}

/// Anchor id of the nearest anchored element around `node`.
pub fn anchor_of<T: TreeQuery + ?Sized>(tree: &T, node: NodeId) -> Option<AnchorId> {
    match tree.find_ancestor_with_marker(node, MarkerKind::Anchor)? {
        (_, Marker::Anchor(id)) => Some(id),
        _ => None,
    }
}

/// Widget instance owning `node`.
pub fn owner_of<T: TreeQuery + ?Sized>(tree: &T, node: NodeId) -> Option<InstanceId> {
    match tree.find_ancestor_with_marker(node, MarkerKind::Instance)? {
        (_, Marker::Instance(id)) => Some(id),
        _ => None,
    }
}
