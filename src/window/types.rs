//! Window geometry types

use std::ops::Range;

/// Rows materialized beyond the viewport on each side.
pub const DEFAULT_BUFFER_SIZE: usize = 10;

/// Minimal scroll offset kept at the top so a reverse scroll still produces an event.
pub const TOP_OFFSET_PX: f64 = 15.0;

/// Extra height added below the last row of the scroll content.
pub const FILLER_OFFSET_PX: f64 = 16.0;

/// Parameters that shape window computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowParams {
    /// Buffer rows rendered above and below the viewport.
    pub buffer_size: usize,
    /// Top offset constant in pixels.
    pub top_offset: f64,
    /// Filler below the last row in pixels.
    pub filler_offset: f64,
}

impl Default for WindowParams {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            top_offset: TOP_OFFSET_PX,
            filler_offset: FILLER_OFFSET_PX,
        }
    }
}

/// Measured list geometry. All lengths are in pixels.
///
/// `row_height` stays at 0 until the render surface has measured a row;
/// every computation that needs it is deferred until then.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Geometry {
    /// Height of one row (uniform for the whole list).
    pub row_height: f64,
    /// Number of logical rows in the source.
    pub row_count: usize,
    /// Height of the viewport.
    pub view_height: f64,
}

impl Geometry {
    /// Create geometry from its parts.
    pub fn new(row_height: f64, row_count: usize, view_height: f64) -> Self {
        Self {
            row_height,
            row_count,
            view_height,
        }
    }

    /// True once a row has been measured.
    pub fn is_measured(&self) -> bool {
        self.row_height > 0.0
    }

    /// Height of all rows stacked.
    pub fn total_height(&self) -> f64 {
        self.row_height * self.row_count as f64
    }

    /// Height of the scroll content including the filler.
    pub fn expected_height(&self, params: &WindowParams) -> f64 {
        self.total_height() + params.filler_offset
    }

    /// Largest scroll offset the scroll element accepts.
    pub fn max_scroll_top(&self, params: &WindowParams) -> f64 {
        (self.expected_height(params) - self.view_height).max(0.0)
    }

    /// Rows materialized for one window: the viewport plus a buffer on both sides.
    pub fn distance(&self, buffer_size: usize) -> usize {
        if !self.is_measured() {
            return buffer_size * 2;
        }
        (self.view_height.max(0.0) / self.row_height).ceil() as usize + buffer_size * 2
    }

    /// Snapshot the scroll state for a given scroll offset.
    pub fn scroll_state(&self, scroll_top: f64, params: &WindowParams) -> ScrollState {
        ScrollState {
            scroll_top,
            view_height: self.view_height,
            max_scroll_top: self.max_scroll_top(params),
            expected_height: self.expected_height(params),
        }
    }
}

/// Logical row range currently materialized.
///
/// # Invariants
/// - `end - start >= distance` (end is not clipped to the row count)
/// - [`Window::clipped`] yields the range actually rendered, with `end <= row_count`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Window {
    /// First materialized row (inclusive).
    pub start: usize,
    /// One past the last materialized row, before clipping.
    pub end: usize,
    /// Buffer rows used to compute this window.
    pub buffer_size: usize,
    /// Rows covered by the window (viewport plus buffers).
    pub distance: usize,
}

impl Window {
    /// Window of an empty list.
    pub fn empty(buffer_size: usize) -> Self {
        Self {
            start: 0,
            end: 0,
            buffer_size,
            distance: 0,
        }
    }

    /// Row range that can actually be rendered for `row_count` rows.
    pub fn clipped(&self, row_count: usize) -> Range<usize> {
        let end = self.end.min(row_count);
        self.start.min(end)..end
    }
}

/// Result of one window computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowLayout {
    /// Materialized rows.
    pub window: Window,
    /// Offset of the first materialized row from the top of the scroll content.
    pub pixel_offset: f64,
    /// Height the scroll content must have (rows plus filler).
    pub expected_height: f64,
    /// Scroll offset this layout was computed for.
    pub scroll_top: f64,
}

impl WindowLayout {
    /// Logical row shown on the first line of the viewport.
    pub fn first_visible_row(&self, row_height: f64) -> usize {
        if row_height <= 0.0 {
            return self.window.start;
        }
        let above = ((self.scroll_top - self.pixel_offset) / row_height).floor();
        self.window.start + above.max(0.0) as usize
    }
}

/// Scroll position relative to the list content.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollState {
    /// Current scroll offset.
    pub scroll_top: f64,
    /// Viewport height.
    pub view_height: f64,
    /// Largest valid scroll offset.
    pub max_scroll_top: f64,
    /// `row_height * row_count + filler_offset`.
    pub expected_height: f64,
}

impl ScrollState {
    /// Report for the host, with the begin/end flags resolved.
    ///
    /// Anything at or above `top_offset` counts as the beginning. The end
    /// only counts when the content is taller than the viewport.
    pub fn report(&self, top_offset: f64) -> ScrollEvent {
        ScrollEvent {
            scroll_height: self.expected_height,
            scroll_top: self.scroll_top,
            view_height: self.view_height,
            is_scrolled_to_begin: self.scroll_top <= top_offset,
            is_scrolled_to_end: self.expected_height > self.view_height
                && self.scroll_top + self.view_height >= self.expected_height,
        }
    }
}

/// Raw scroll input reported by the scroll element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollInput {
    /// Vertical offset.
    pub scroll_top: f64,
    /// Horizontal offset.
    pub scroll_left: f64,
    /// Height of the scroll content.
    pub scroll_height: f64,
    /// Height of the visible area.
    pub client_height: f64,
}

/// Scroll report handed to the host on every accepted scroll event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollEvent {
    /// Height of the scroll content.
    pub scroll_height: f64,
    /// Current scroll offset.
    pub scroll_top: f64,
    /// Viewport height.
    pub view_height: f64,
    /// Scrolled to the first row.
    pub is_scrolled_to_begin: bool,
    /// Scrolled to the last row.
    pub is_scrolled_to_end: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_match_widget_constants() {
        let params = WindowParams::default();
        assert_eq!(params.buffer_size, 10);
        assert_eq!(params.top_offset, 15.0);
        assert_eq!(params.filler_offset, 16.0);
    }

    #[test]
    fn expected_height_adds_filler() {
        let geometry = Geometry::new(20.0, 100, 200.0);
        assert_eq!(geometry.expected_height(&WindowParams::default()), 2016.0);
    }

    #[test]
    fn max_scroll_top_never_negative() {
        let geometry = Geometry::new(20.0, 2, 200.0);
        assert_eq!(geometry.max_scroll_top(&WindowParams::default()), 0.0);
    }

    #[test]
    fn distance_covers_viewport_and_both_buffers() {
        let geometry = Geometry::new(20.0, 100, 210.0);
        assert_eq!(geometry.distance(10), 11 + 20);
    }

    #[test]
    fn clipped_window_never_exceeds_row_count() {
        let window = Window {
            start: 80,
            end: 110,
            buffer_size: 10,
            distance: 30,
        };
        assert_eq!(window.clipped(100), 80..100);
        assert_eq!(window.clipped(50), 50..50);
    }

    #[test]
    fn first_visible_row_accounts_for_pixel_offset() {
        let layout = WindowLayout {
            window: Window {
                start: 14,
                end: 44,
                buffer_size: 10,
                distance: 30,
            },
            pixel_offset: 300.0,
            expected_height: 2016.0,
            scroll_top: 500.0,
        };
        assert_eq!(layout.first_visible_row(20.0), 24);
    }

    #[test]
    fn scroll_state_reports_edges() {
        let params = WindowParams::default();
        let geometry = Geometry::new(20.0, 100, 200.0);

        let top = geometry.scroll_state(15.0, &params);
        assert_eq!(top.max_scroll_top, 1816.0);
        assert_eq!(top.expected_height, 2016.0);
        let report = top.report(params.top_offset);
        assert!(report.is_scrolled_to_begin);
        assert!(!report.is_scrolled_to_end);

        let bottom = geometry.scroll_state(1816.0, &params).report(params.top_offset);
        assert_eq!(bottom.scroll_height, 2016.0);
        assert!(!bottom.is_scrolled_to_begin);
        assert!(bottom.is_scrolled_to_end);
    }

    #[test]
    fn short_content_is_never_scrolled_to_end() {
        let params = WindowParams::default();
        let report = Geometry::new(20.0, 3, 200.0)
            .scroll_state(0.0, &params)
            .report(params.top_offset);
        assert!(report.is_scrolled_to_begin);
        assert!(!report.is_scrolled_to_end);
    }
}
