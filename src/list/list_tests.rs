//! Tests for the list widget: update cycle, scroll reports, selection host API.

use super::*;
use crate::model::{LineStore, SharedLines};
use crate::selection::{Boundary, NativeSelection, RangeError, Selection};
use crate::surface::{Document, SharedSelection, TerminalSurface};
use crate::window::Intensity;
use std::rc::Rc;
use std::time::Duration;

type TestList = VirtualList<TerminalSurface, SharedSelection>;

fn list_of(lines: SharedLines, params: ListParams, view_height: f64) -> TestList {
    let document = Document::new();
    let surface = document.mount(lines, 20.0);
    VirtualList::new(surface, document.selection(), params, view_height)
}

fn list_with(rows: usize, view_height: f64) -> (TestList, SharedLines) {
    let lines = LineStore::from_lines((0..rows).map(|i| format!("row {i} one two"))).into_shared();
    let list = list_of(Rc::clone(&lines), ListParams::default(), view_height);
    (list, lines)
}

fn input(scroll_top: f64) -> ScrollInput {
    ScrollInput {
        scroll_top,
        scroll_left: 0.0,
        scroll_height: 0.0,
        client_height: 200.0,
    }
}

fn native_text(list: &TestList) -> String {
    list.native()
        .get_current()
        .map(|current| current.text)
        .unwrap_or_default()
}

/// Press at `from`, drag to `to`, release.
fn drag(list: &mut TestList, from: (usize, usize), to: (usize, usize)) -> Option<SelectionRange> {
    let anchor = list.surface().boundary_at(from.0, from.1).expect("anchor");
    assert!(list.pointer_down(anchor.node, PointerButton::Primary));
    list.native_mut().collapse(anchor).expect("collapse");
    list.pointer_move();

    let focus = list.surface().boundary_at(to.0, to.1).expect("focus");
    list.native_mut().extend_to(focus).expect("extend");
    list.pointer_move();
    list.pointer_up(PointerButton::Primary)
}

mod windowing {
    use super::*;

    #[test]
    fn first_update_measures_and_renders_first_window() {
        let (mut list, _lines) = list_with(100, 200.0);

        let layout = list.update(false).expect("measured");

        assert_eq!(list.row_height(), 20.0);
        assert_eq!((layout.window.start, layout.window.end), (0, 30));
        assert_eq!(list.rendered_rows(), Some(0..30));
        assert_eq!(list.surface().rendered_bounds(), Some((0, 29)));
    }

    #[test]
    fn empty_list_defers_everything() {
        let (mut list, _lines) = list_with(0, 200.0);

        assert_eq!(list.update(false), None);
        assert_eq!(list.rendered_rows(), None);

        let state = list.scroll_state();
        assert_eq!(state.scroll_height, 16.0);
        assert!(state.is_scrolled_to_begin);
        assert!(!state.is_scrolled_to_end);
    }

    #[test]
    fn scroll_renders_buffered_window() {
        let (mut list, _lines) = list_with(100, 200.0);
        list.update(false);

        let outcome = list.on_scroll(input(500.0), Instant::now());

        let layout = list.layout().expect("layout");
        assert_eq!((layout.window.start, layout.window.end), (14, 44));
        assert_eq!(list.rendered_rows(), Some(14..44));
        assert_eq!(outcome.event.map(|event| event.scroll_top), Some(500.0));
        assert_eq!(outcome.restore, Some(RestoreOutcome::NoSelection));
    }

    #[test]
    fn same_window_is_not_rendered_twice() {
        let (mut list, _lines) = list_with(100, 200.0);
        list.update(false);
        let now = Instant::now();
        list.on_scroll(input(500.0), now);

        let outcome = list.on_scroll(input(505.0), now);

        assert_eq!(outcome.restore, None);
        assert_eq!(list.rendered_rows(), Some(14..44));
    }

    #[test]
    fn appended_rows_force_recalculation() {
        let (mut list, lines) = list_with(5, 200.0);
        list.update(false);
        assert_eq!(list.rendered_rows(), Some(0..5));

        lines
            .borrow_mut()
            .extend((5..50).map(|i| format!("row {i} one two")));
        list.update(false);

        assert_eq!(list.rendered_rows(), Some(0..30));
        assert_eq!(list.scroll_state().scroll_height, 1016.0);
    }

    #[test]
    fn resize_recomputes_distance() {
        let (mut list, _lines) = list_with(100, 200.0);
        list.update(false);

        let layout = list.resize(400.0).expect("layout");

        assert_eq!(layout.window.distance, 40);
        assert_eq!(list.rendered_rows(), Some(0..40));
    }

    #[test]
    fn horizontal_scroll_skips_the_cycle() {
        let (mut list, _lines) = list_with(100, 200.0);
        list.update(false);

        let outcome = list.on_scroll(
            ScrollInput {
                scroll_left: 30.0,
                ..input(0.0)
            },
            Instant::now(),
        );

        assert!(outcome.correction.horizontal_only);
        assert_eq!(outcome.event, None);
        assert_eq!(outcome.border, None);
    }

    #[test]
    fn edge_flags_follow_scroll_position() {
        let (mut list, _lines) = list_with(100, 200.0);
        list.update(false);
        let now = Instant::now();

        let top = list.on_scroll(input(0.0), now);
        assert_eq!(top.correction.scroll_top, 15.0);
        let event = top.event.expect("event");
        assert!(event.is_scrolled_to_begin);
        assert!(!event.is_scrolled_to_end);

        let bottom = list.on_scroll(input(1900.0), now);
        assert_eq!(bottom.correction.scroll_top, 1816.0);
        let event = bottom.event.expect("event");
        assert!(!event.is_scrolled_to_begin);
        assert!(event.is_scrolled_to_end);
    }

    #[test]
    fn position_tracks_the_corrected_offset() {
        let (mut list, _lines) = list_with(100, 200.0);
        list.update(false);

        list.on_scroll(input(1900.0), Instant::now());

        let position = list.position();
        assert_eq!(position.scroll_top, 1816.0);
        assert_eq!(position.max_scroll_top, 1816.0);
        assert_eq!(position.view_height, 200.0);
        assert_eq!(
            list.scroll_state(),
            position.report(ListParams::default().window.top_offset)
        );
    }

    #[test]
    fn subscribers_receive_every_accepted_scroll() {
        let (mut list, _lines) = list_with(100, 200.0);
        list.update(false);
        let dropped = list.subscribe();
        let rx = list.subscribe();
        drop(dropped);
        let now = Instant::now();

        list.on_scroll(input(500.0), now);
        list.on_scroll(input(600.0), now);

        let tops: Vec<f64> = rx.try_iter().map(|event| event.scroll_top).collect();
        assert_eq!(tops, vec![500.0, 600.0]);
    }

    #[test]
    fn scroll_to_index_targets_first_visible_row() {
        let (mut list, _lines) = list_with(100, 200.0);
        list.update(false);

        let target = list.scroll_to_index(24).expect("target");
        assert_eq!(target, 495.0);
        list.on_scroll(input(target), Instant::now());

        let layout = list.layout().expect("layout");
        assert_eq!(layout.first_visible_row(list.row_height()), 24);
        assert_eq!(list.scroll_to_index(24), None);
        assert_eq!(list.scroll_to_index(99), Some(1816.0));
    }

    #[test]
    fn scroll_to_index_on_empty_list_is_none() {
        let (mut list, _lines) = list_with(0, 200.0);
        assert_eq!(list.scroll_to_index(3), None);
    }
}

mod selection {
    use super::*;

    #[test]
    fn forward_drag_round_trips() {
        let (mut list, _lines) = list_with(100, 200.0);
        list.update(false);

        let range = drag(&mut list, (5, 2), (10, 4)).expect("selection");

        assert_eq!((range.start, range.end), (5, 10));
        assert_eq!(list.selection(), Some(range));
    }

    #[test]
    fn backward_drag_is_normalized() {
        let (mut list, _lines) = list_with(100, 200.0);
        list.update(false);

        let range = drag(&mut list, (10, 4), (5, 2)).expect("selection");

        assert_eq!((range.start, range.end), (5, 10));
        assert_eq!((range.start_offset, range.end_offset), (2, 4));
    }

    #[test]
    fn selection_survives_scrolling_away_and_back() {
        let (mut list, _lines) = list_with(100, 200.0);
        list.update(false);
        drag(&mut list, (5, 2), (10, 4)).expect("selection");
        let before = native_text(&list);
        let now = Instant::now();

        let away = list.on_scroll(input(1000.0), now);
        assert_eq!(away.restore, Some(RestoreOutcome::Pending));
        assert_eq!(list.native().get_current(), None);
        assert_eq!(list.selection().map(|r| (r.start, r.end)), Some((5, 10)));

        let back = list.on_scroll(input(15.0), now);
        assert_eq!(
            back.restore,
            Some(RestoreOutcome::Restored {
                rows: 5..=10,
                fast_path: false
            })
        );
        assert_eq!(native_text(&list), before);
    }

    #[test]
    fn partially_rendered_selection_is_clipped() {
        let (mut list, _lines) = list_with(100, 200.0);
        list.update(false);
        drag(&mut list, (5, 2), (10, 4)).expect("selection");

        let outcome = list.on_scroll(input(375.0), Instant::now());

        assert_eq!(list.rendered_rows(), Some(8..38));
        assert_eq!(
            outcome.restore,
            Some(RestoreOutcome::Restored {
                rows: 8..=10,
                fast_path: false
            })
        );
        assert!(native_text(&list).starts_with("row 8 one two\n"));
    }

    #[test]
    fn secondary_button_does_not_select() {
        let (mut list, _lines) = list_with(10, 200.0);
        list.update(false);
        let node = list.surface().boundary_at(3, 0).expect("boundary").node;

        assert!(!list.pointer_down(node, PointerButton::Secondary));
        assert!(!list.model().has_selection());
        assert_eq!(list.pointer_up(PointerButton::Primary), None);
    }

    #[test]
    fn select_all_covers_rows_outside_the_window() {
        let (mut list, _lines) = list_with(100, 200.0);
        list.update(false);

        let range = list.select_all().expect("selection");

        assert_eq!((range.start, range.end), (0, 99));
        assert_eq!(range.end_offset, "row 99 one two".len());
        assert_eq!(native_text(&list).lines().count(), 30);
        let copied = list.copy_text().expect("copy");
        assert_eq!(copied.lines().count(), 100);
        assert!(copied.ends_with("row 99 one two"));
    }

    #[test]
    fn select_all_single_row_selects_the_row_node() {
        let (mut list, _lines) = list_with(1, 200.0);
        list.update(false);

        let range = list.select_all().expect("selection");

        assert_eq!(range.start_text, "row 0 one two");
        assert_eq!(range.end_text, "");
        assert_eq!(native_text(&list), "row 0 one two");
        assert_eq!(list.copy_text().as_deref(), Some("row 0 one two"));
    }

    #[test]
    fn select_all_on_empty_list_is_none() {
        let (mut list, _lines) = list_with(0, 200.0);
        assert_eq!(list.select_all(), None);
        assert_eq!(list.copy_text(), None);
    }

    #[test]
    fn copy_aligns_columns_with_delimiter() {
        let lines = LineStore::from_lines(["id;name", "1;alice", "22;bo"]).into_shared();
        let params = ListParams {
            copy_delimiter: Some(";".to_string()),
            ..ListParams::default()
        };
        let mut list = list_of(lines, params, 200.0);
        list.update(false);
        list.select_all();

        insta::assert_snapshot!(list.copy_text().unwrap_or_default(), @r"
        id | name
        1  | alice
        22 | bo
        ");
    }

    #[test]
    fn remove_selection_clears_native_and_model() {
        let (mut list, _lines) = list_with(20, 200.0);
        list.update(false);
        drag(&mut list, (1, 0), (3, 2)).expect("selection");

        list.remove_selection();

        assert_eq!(list.model().selection(), &Selection::None);
        assert_eq!(list.native().get_current(), None);
    }

    #[test]
    fn refresh_restores_an_in_progress_drag() {
        let (mut list, _lines) = list_with(20, 200.0);
        list.update(false);
        let anchor = list.surface().boundary_at(2, 2).expect("anchor");
        list.pointer_down(anchor.node, PointerButton::Primary);
        list.native_mut().collapse(anchor).expect("collapse");
        let focus = list.surface().boundary_at(4, 3).expect("focus");
        list.native_mut().extend_to(focus).expect("extend");
        list.pointer_move();
        let during = native_text(&list);

        list.update(true);
        assert_eq!(list.native().get_current(), None);

        assert_eq!(
            list.refresh_selection(),
            RestoreOutcome::Restored {
                rows: 2..=4,
                fast_path: false
            }
        );
        assert_eq!(native_text(&list), during);
        assert!(list.model().is_selecting());
    }
}

mod border {
    use super::*;

    fn bounced(now: Instant) -> TestList {
        let (mut list, _lines) = list_with(5, 200.0);
        list.update(false);
        for _ in 0..10 {
            list.on_scroll(input(0.0), now);
        }
        assert_eq!(list.border_stage(), BorderStage::Near);
        let outcome = list.on_scroll(input(0.0), now);
        assert_eq!(outcome.border, Some(BorderStage::Active));
        list
    }

    #[test]
    fn repeated_top_scrolls_raise_then_fade_the_indicator() {
        let now = Instant::now();
        let stage = Duration::from_millis(500);
        let mut list = bounced(now);
        assert_eq!(list.bounce_indicator().top, Intensity::Full);
        assert_eq!(list.bounce_indicator().bottom, Intensity::Off);
        assert_eq!(list.next_timer_deadline(), Some(now + stage));

        assert_eq!(list.poll_timers(now + stage), Some(BorderStage::Fading));
        assert_eq!(list.bounce_indicator().top, Intensity::Dim);

        assert_eq!(list.poll_timers(now + stage * 2), Some(BorderStage::Neutral));
        assert_eq!(list.bounce_indicator().top, Intensity::Off);
        assert_eq!(list.next_timer_deadline(), None);
    }

    #[test]
    fn remove_selection_cancels_timers() {
        let mut list = bounced(Instant::now());
        list.remove_selection();
        assert_eq!(list.next_timer_deadline(), None);
        assert_eq!(list.border_stage(), BorderStage::Neutral);
    }

    #[test]
    fn pointer_press_cancels_timers() {
        let mut list = bounced(Instant::now());
        let target = list.surface().boundary_at(1, 0).expect("boundary");

        assert!(list.pointer_down(target.node, PointerButton::Primary));

        assert_eq!(list.next_timer_deadline(), None);
        assert_eq!(list.border_stage(), BorderStage::Neutral);
        assert_eq!(list.bounce_indicator().top, Intensity::Off);
    }

    /// Shared selection whose ranges are always rejected.
    struct RejectingSelection(SharedSelection);

    impl PlatformSelection for RejectingSelection {
        fn get_current(&self) -> Option<NativeSelection> {
            self.0.get_current()
        }

        fn set_range(&mut self, anchor: Boundary, _focus: Boundary) -> Result<(), RangeError> {
            Err(RangeError::Detached(anchor.node))
        }

        fn select_node(&mut self, node: NodeId) -> Result<(), RangeError> {
            Err(RangeError::Detached(node))
        }

        fn clear(&mut self) {
            self.0.clear();
        }
    }

    #[test]
    fn failed_restoration_cancels_timers() {
        let lines = LineStore::from_lines((0..5).map(|i| format!("row {i} one two"))).into_shared();
        let document = Document::new();
        let surface = document.mount(lines, 20.0);
        let native = RejectingSelection(document.selection());
        let mut list = VirtualList::new(surface, native, ListParams::default(), 200.0);
        list.update(false);
        let now = Instant::now();
        for _ in 0..11 {
            list.on_scroll(input(0.0), now);
        }
        assert_eq!(list.border_stage(), BorderStage::Active);

        assert_eq!(list.select_all(), None);

        assert!(!list.model().has_selection());
        assert_eq!(list.next_timer_deadline(), None);
        assert_eq!(list.border_stage(), BorderStage::Neutral);
    }

    #[test]
    fn teardown_cancels_timers_and_closes_the_stream() {
        let mut list = bounced(Instant::now());
        let rx = list.subscribe();

        list.teardown();

        assert_eq!(list.next_timer_deadline(), None);
        assert!(rx.recv().is_err());
    }
}
