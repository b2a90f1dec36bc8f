//! Elastic-edge (rubber-band) overscroll detection
//!
//! The detector counts scroll events that repeat the previous offset. When the
//! count passes the configured number of attempts while the list sits at an
//! edge, the bounce indicator is raised. Two chained timers then fade it out
//! and reset it:
//!
//! ```text
//! NEUTRAL -> NEAR -> ACTIVE --500ms--> FADING --500ms--> NEUTRAL
//! ```
//!
//! Timers are explicit state: at most one pending handle exists, and every
//! re-arm replaces it. The host drives them by calling
//! [`BorderDetector::poll`] with the current instant.

use std::time::{Duration, Instant};
use tracing::debug;

/// Repeated equal offsets required before the bounce triggers.
pub const DEFAULT_BORDER_ATTEMPTS: u32 = 10;

/// Duration of each of the two bounce stages.
pub const DEFAULT_STAGE_DURATION: Duration = Duration::from_millis(500);

/// Border detection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderParams {
    /// The bounce triggers once the repeat count exceeds this.
    pub attempts: u32,
    /// Length of the ACTIVE and FADING stages.
    pub stage_duration: Duration,
    /// Offsets at or below this count as the top edge.
    pub top_offset: f64,
}

impl Default for BorderParams {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_BORDER_ATTEMPTS,
            stage_duration: DEFAULT_STAGE_DURATION,
            top_offset: super::types::TOP_OFFSET_PX,
        }
    }
}

/// Bounce stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderStage {
    /// No overscroll.
    #[default]
    Neutral,
    /// Repeated offsets at an edge, not yet enough to trigger.
    Near,
    /// Indicator raised.
    Active,
    /// Indicator lowered, waiting to reset.
    Fading,
}

/// Handle of a scheduled stage timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// A scheduled, cancelable stage timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTimer {
    /// Identity of this timer.
    pub handle: TimerHandle,
    /// When it fires.
    pub due: Instant,
}

/// Full detector state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BorderState {
    /// Bounce is at the top edge.
    pub top: bool,
    /// Bounce is at the bottom edge.
    pub bottom: bool,
    /// Current stage.
    pub stage: BorderStage,
    /// Consecutive scroll events repeating the previous offset.
    pub attempt_count: u32,
    /// Timer for the current stage, if armed.
    pub pending: Option<PendingTimer>,
}

/// Strength of the bounce indicator at one edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Intensity {
    /// Not shown.
    #[default]
    Off,
    /// Fully raised.
    Full,
    /// Fading out.
    Dim,
}

/// Bounce indicator for both edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BounceIndicator {
    /// Top edge.
    pub top: Intensity,
    /// Bottom edge.
    pub bottom: Intensity,
}

/// Detects sustained overscroll at either edge.
#[derive(Debug, Clone)]
pub struct BorderDetector {
    params: BorderParams,
    state: BorderState,
    previous_top: f64,
    next_handle: u64,
}

impl BorderDetector {
    /// Create a detector for a freshly mounted scroll element (offset 0).
    pub fn new(params: BorderParams) -> Self {
        Self {
            params,
            state: BorderState::default(),
            previous_top: 0.0,
            next_handle: 0,
        }
    }

    /// Current state.
    pub fn state(&self) -> &BorderState {
        &self.state
    }

    /// Current stage.
    pub fn stage(&self) -> BorderStage {
        self.state.stage
    }

    /// When the pending timer fires, if one is armed.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.state.pending.map(|timer| timer.due)
    }

    /// Observe one scroll event.
    ///
    /// Returns the new stage when it changed.
    pub fn observe(
        &mut self,
        scroll_top: f64,
        max_scroll_top: f64,
        now: Instant,
    ) -> Option<BorderStage> {
        if scroll_top == self.previous_top {
            self.state.attempt_count = self.state.attempt_count.saturating_add(1);
        } else {
            self.state.attempt_count = 0;
        }
        self.previous_top = scroll_top;

        let at_top = scroll_top <= self.params.top_offset;
        let at_bottom = (scroll_top - max_scroll_top).abs() <= 1.0;
        let at_edge = at_top || at_bottom;
        let before = self.state.stage;

        if self.state.attempt_count > self.params.attempts && at_edge {
            self.trigger(at_top, now);
        } else {
            match self.state.stage {
                BorderStage::Neutral if self.state.attempt_count > 0 && at_edge => {
                    self.state.stage = BorderStage::Near;
                }
                BorderStage::Near if self.state.attempt_count == 0 || !at_edge => {
                    self.state.stage = BorderStage::Neutral;
                }
                _ => {}
            }
        }

        (self.state.stage != before).then_some(self.state.stage)
    }

    /// End the ACTIVE stage early and start fading.
    pub fn exit_early(&mut self, now: Instant) -> Option<BorderStage> {
        if self.state.stage != BorderStage::Active {
            return None;
        }
        debug!("Bounce exited early");
        self.state.stage = BorderStage::Fading;
        self.arm(now);
        Some(BorderStage::Fading)
    }

    /// Fire the pending timer if it is due.
    ///
    /// Returns the new stage when a timer fired.
    pub fn poll(&mut self, now: Instant) -> Option<BorderStage> {
        let timer = self.state.pending?;
        if timer.due > now {
            return None;
        }
        self.state.pending = None;
        match self.state.stage {
            BorderStage::Active => {
                self.state.stage = BorderStage::Fading;
                self.arm(now);
            }
            BorderStage::Fading => self.reset(),
            BorderStage::Neutral | BorderStage::Near => {}
        }
        debug!(stage = ?self.state.stage, "Bounce timer fired");
        Some(self.state.stage)
    }

    /// Cancel any pending timer and return to NEUTRAL.
    pub fn cancel(&mut self) {
        self.reset();
    }

    /// Indicator derived from the current stage.
    pub fn indicator(&self) -> BounceIndicator {
        let intensity = match self.state.stage {
            BorderStage::Active => Intensity::Full,
            BorderStage::Fading => Intensity::Dim,
            BorderStage::Neutral | BorderStage::Near => Intensity::Off,
        };
        BounceIndicator {
            top: if self.state.top { intensity } else { Intensity::Off },
            bottom: if self.state.bottom {
                intensity
            } else {
                Intensity::Off
            },
        }
    }

    fn trigger(&mut self, at_top: bool, now: Instant) {
        self.state.top = at_top;
        self.state.bottom = !at_top;
        if self.state.stage != BorderStage::Active {
            debug!(top = at_top, "Bounce raised");
        }
        self.state.stage = BorderStage::Active;
        self.arm(now);
    }

    fn arm(&mut self, now: Instant) {
        self.next_handle += 1;
        self.state.pending = Some(PendingTimer {
            handle: TimerHandle(self.next_handle),
            due: now + self.params.stage_duration,
        });
    }

    fn reset(&mut self) {
        self.state = BorderState::default();
    }
}

impl Default for BorderDetector {
    fn default() -> Self {
        Self::new(BorderParams::default())
    }
}
