//! Selection layer - logical selection that survives virtualization
//!
//! # Module Structure
//!
//! - `platform`: collaborator traits (TreeQuery, RenderSurface, PlatformSelection)
//! - `model`: SelectionModel - begin / extend / finalize / clear
//! - `restorer`: SelectionRestorer - re-applies the selection after each render
//! - `clipboard`: copy text composition

pub mod clipboard;
pub mod model;
pub mod platform;
pub mod restorer;

pub use clipboard::{align_columns, compose_copy_text, COLUMN_SEPARATOR};
pub use model::{
    BoundaryLines, Direction, DragState, FinalSelection, Selection, SelectionEdge,
    SelectionModel, SelectionRange,
};
pub use platform::{
    anchor_of, owner_of, row_of, AnchorId, Boundary, InstanceId, MaterializedRow, Marker,
    MarkerKind, NativeSelection, NodeId, PlatformSelection, RangeError, RenderSurface, TreeQuery,
};
pub use restorer::{RestoreError, RestoreOutcome, SelectionRestorer};
