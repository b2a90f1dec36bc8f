//! Windowing layer - scroll correction, window calculation, edge bounce
//!
//! # Module Structure
//!
//! - `types`: geometry, window and scroll value types
//! - `corrector`: ScrollCorrector - normalizes raw scroll input
//! - `calculator`: WindowCalculator - scroll offset to materialized row range
//! - `border`: BorderDetector - rubber-band overscroll state machine

pub mod border;
pub mod calculator;
pub mod corrector;
pub mod types;

pub use border::{
    BorderDetector, BorderParams, BorderStage, BorderState, BounceIndicator, Intensity,
    PendingTimer, TimerHandle,
};
pub use calculator::{compute_window, WindowCalculator};
pub use corrector::{Correction, ScrollCorrector};
pub use types::{
    Geometry, ScrollEvent, ScrollInput, ScrollState, Window, WindowLayout, WindowParams,
    DEFAULT_BUFFER_SIZE, FILLER_OFFSET_PX, TOP_OFFSET_PX,
};
