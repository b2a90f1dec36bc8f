//! In-memory render surface.
//!
//! Stands in for a component-based UI layer: a document of element trees,
//! one per list instance, plus the document's single native selection.
//!
//! # Module Structure
//!
//! - `tree`: Forest / ElementTree - markers, anchors, generations
//! - `native`: SharedSelection - the instance-agnostic selection object
//! - `terminal`: TerminalSurface - renders line-store rows into a tree
//! - `container`: ScrollContainer - the emulated scroll element

pub mod container;
pub mod native;
pub mod terminal;
pub mod tree;

pub use container::ScrollContainer;
pub use native::SharedSelection;
pub use terminal::TerminalSurface;
pub use tree::{ElementKind, ElementTree, Forest, TextPosition};

use crate::model::SharedLines;
use std::cell::RefCell;
use std::rc::Rc;

/// A document holding any number of list instances.
#[derive(Debug, Clone)]
pub struct Document {
    forest: Rc<RefCell<Forest>>,
    selection: SharedSelection,
}

impl Document {
    /// Empty document.
    pub fn new() -> Self {
        let forest = Rc::new(RefCell::new(Forest::new()));
        let selection = SharedSelection::new(Rc::clone(&forest));
        Self { forest, selection }
    }

    /// Create a new instance rendering `lines`.
    pub fn mount(&self, lines: SharedLines, row_height: f64) -> TerminalSurface {
        TerminalSurface::new(Rc::clone(&self.forest), lines, row_height)
    }

    /// Handle to the native selection.
    pub fn selection(&self) -> SharedSelection {
        self.selection.clone()
    }

    /// Element trees of the document.
    pub fn forest(&self) -> &Rc<RefCell<Forest>> {
        &self.forest
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
