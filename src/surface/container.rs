//! Emulated scroll element

use crate::window::ScrollInput;

/// Scroll element holding the list.
///
/// Owns the raw offsets the way a browser scroll container does: content
/// height is whatever the list last requested, and the vertical offset is
/// clamped into `[0, scroll_height - client_height]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollContainer {
    scroll_top: f64,
    scroll_left: f64,
    scroll_height: f64,
    client_height: f64,
}

impl ScrollContainer {
    /// Empty container with a viewport of `client_height`.
    pub fn new(client_height: f64) -> Self {
        Self {
            client_height,
            ..Self::default()
        }
    }

    /// Largest accepted vertical offset.
    pub fn max_scroll_top(&self) -> f64 {
        (self.scroll_height - self.client_height).max(0.0)
    }

    /// Current vertical offset.
    pub fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    /// Current horizontal offset.
    pub fn scroll_left(&self) -> f64 {
        self.scroll_left
    }

    /// Viewport height.
    pub fn client_height(&self) -> f64 {
        self.client_height
    }

    /// Content height.
    pub fn scroll_height(&self) -> f64 {
        self.scroll_height
    }

    /// Set the content height and re-clamp the offset.
    pub fn set_scroll_height(&mut self, height: f64) {
        self.scroll_height = height.max(0.0);
        self.scroll_top = self.scroll_top.clamp(0.0, self.max_scroll_top());
    }

    /// Resize the viewport and re-clamp the offset.
    pub fn set_client_height(&mut self, height: f64) {
        self.client_height = height.max(0.0);
        self.scroll_top = self.scroll_top.clamp(0.0, self.max_scroll_top());
    }

    /// Move to a vertical offset (clamped). Returns the input to report.
    pub fn scroll_to(&mut self, top: f64) -> ScrollInput {
        self.scroll_top = top.clamp(0.0, self.max_scroll_top());
        self.input()
    }

    /// Move vertically by `delta` pixels (clamped).
    ///
    /// At an edge the offset stays put, yet an event is still reported so
    /// repeated attempts can be detected.
    pub fn scroll_by(&mut self, delta: f64) -> ScrollInput {
        self.scroll_to(self.scroll_top + delta)
    }

    /// Set the horizontal offset (never negative).
    pub fn scroll_left_to(&mut self, left: f64) -> ScrollInput {
        self.scroll_left = left.max(0.0);
        self.input()
    }

    /// Snapshot reported with a scroll event.
    pub fn input(&self) -> ScrollInput {
        ScrollInput {
            scroll_top: self.scroll_top,
            scroll_left: self.scroll_left,
            scroll_height: self.scroll_height,
            client_height: self.client_height,
        }
    }
}
