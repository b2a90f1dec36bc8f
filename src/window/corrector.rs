//! Scroll input correction

use super::types::{Geometry, ScrollInput, WindowParams};

/// Corrected scroll input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Correction {
    /// Scroll offset everything downstream should use.
    pub scroll_top: f64,
    /// Only the horizontal offset changed; border and selection work is skipped.
    pub horizontal_only: bool,
    /// The user pulled back from a bottom overshoot; the bounce should end early.
    pub exit_bounce: bool,
    /// `scroll_top` differs from the raw input and should be written back.
    pub adjusted: bool,
}

/// Clamps raw scroll input before the window and border logic see it.
#[derive(Debug, Clone, Default)]
pub struct ScrollCorrector {
    previous_top: f64,
    previous_left: f64,
}

impl ScrollCorrector {
    /// Create a corrector for a freshly mounted scroll element.
    pub fn new() -> Self {
        Self::default()
    }

    /// Correct one raw scroll event.
    pub fn correct(
        &mut self,
        input: ScrollInput,
        geometry: &Geometry,
        params: &WindowParams,
    ) -> Correction {
        let horizontal_only =
            input.scroll_left != self.previous_left && input.scroll_top == self.previous_top;
        self.previous_left = input.scroll_left;

        let mut correction = Correction {
            scroll_top: input.scroll_top,
            horizontal_only,
            exit_bounce: false,
            adjusted: false,
        };
        if horizontal_only || !geometry.is_measured() {
            return correction;
        }

        if input.scroll_top + geometry.view_height > geometry.total_height() {
            if input.scroll_top > self.previous_top {
                correction.scroll_top = geometry.max_scroll_top(params);
            } else if input.scroll_top < self.previous_top {
                correction.exit_bounce = true;
            }
        }

        if correction.scroll_top < params.top_offset {
            correction.scroll_top = if geometry.row_count < geometry.distance(params.buffer_size) {
                0.0
            } else {
                params.top_offset
            };
        }

        correction.adjusted = correction.scroll_top != input.scroll_top;
        self.previous_top = correction.scroll_top;
        correction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(scroll_top: f64, scroll_left: f64) -> ScrollInput {
        ScrollInput {
            scroll_top,
            scroll_left,
            scroll_height: 2016.0,
            client_height: 200.0,
        }
    }

    fn long_list() -> Geometry {
        Geometry::new(20.0, 100, 200.0)
    }

    #[test]
    fn passes_through_in_range_offsets() {
        let mut corrector = ScrollCorrector::new();
        let c = corrector.correct(input(500.0, 0.0), &long_list(), &WindowParams::default());
        assert_eq!(c.scroll_top, 500.0);
        assert!(!c.adjusted);
        assert!(!c.horizontal_only);
    }

    #[test]
    fn increasing_overshoot_snaps_to_max_scroll_top() {
        let mut corrector = ScrollCorrector::new();
        let params = WindowParams::default();
        let c = corrector.correct(input(1805.0, 0.0), &long_list(), &params);
        assert_eq!(c.scroll_top, long_list().max_scroll_top(&params));
        assert!(c.adjusted);
    }

    #[test]
    fn decreasing_overshoot_requests_bounce_exit() {
        let mut corrector = ScrollCorrector::new();
        let params = WindowParams::default();
        corrector.correct(input(1816.0, 0.0), &long_list(), &params);
        let c = corrector.correct(input(1810.0, 0.0), &long_list(), &params);
        assert!(c.exit_bounce);
        assert_eq!(c.scroll_top, 1810.0);
    }

    #[test]
    fn near_top_snaps_to_top_offset_for_long_lists() {
        let mut corrector = ScrollCorrector::new();
        corrector.correct(input(300.0, 0.0), &long_list(), &WindowParams::default());
        let c = corrector.correct(input(3.0, 0.0), &long_list(), &WindowParams::default());
        assert_eq!(c.scroll_top, 15.0);
    }

    #[test]
    fn near_top_snaps_to_zero_for_short_lists() {
        let mut corrector = ScrollCorrector::new();
        let short = Geometry::new(20.0, 12, 200.0);
        corrector.correct(input(40.0, 0.0), &short, &WindowParams::default());
        let c = corrector.correct(input(3.0, 0.0), &short, &WindowParams::default());
        assert_eq!(c.scroll_top, 0.0);
    }

    #[test]
    fn horizontal_only_change_is_flagged() {
        let mut corrector = ScrollCorrector::new();
        let params = WindowParams::default();
        corrector.correct(input(500.0, 0.0), &long_list(), &params);
        let c = corrector.correct(input(500.0, 40.0), &long_list(), &params);
        assert!(c.horizontal_only);
        assert_eq!(c.scroll_top, 500.0);
    }

    #[test]
    fn unmeasured_rows_pass_input_through() {
        let mut corrector = ScrollCorrector::new();
        let c = corrector.correct(
            input(3.0, 0.0),
            &Geometry::new(0.0, 100, 200.0),
            &WindowParams::default(),
        );
        assert_eq!(c.scroll_top, 3.0);
        assert!(!c.adjusted);
    }
}
