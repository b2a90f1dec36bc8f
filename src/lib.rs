//! rowscope
//!
//! A virtualized list core for very long row sources, plus a terminal
//! viewer that drives it.
//!
//! The core (`window`, `selection`, `list`) is pure and host-agnostic: the
//! host supplies a render surface and a native selection object through the
//! traits in [`selection`]. The `surface` module is the in-memory host used
//! by the viewer and the tests; `state` and `view` are the terminal shell.

pub mod config;
pub mod list;
pub mod logging;
pub mod model;
pub mod selection;
pub mod source;
pub mod state;
pub mod surface;
pub mod view;
pub mod window;

pub use list::{ListParams, PointerButton, ScrollOutcome, VirtualList};
