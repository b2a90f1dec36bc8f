//! Layout dimension constants for TUI rendering.

use std::time::Duration;

/// Height of the status bar in lines.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Height of each pane edge (the lines the bounce indicator colours).
pub const EDGE_HEIGHT: u16 = 1;

/// Event loop tick: input polling interval and the longest idle wait.
pub const TICK_INTERVAL: Duration = Duration::from_millis(250);
