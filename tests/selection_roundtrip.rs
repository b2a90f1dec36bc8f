//! Selection behavior across re-rendering, through the public list API.

use rowscope::model::{LineStore, SharedLines};
use rowscope::selection::{PlatformSelection, RenderSurface, RestoreOutcome, SelectionRange};
use rowscope::surface::{Document, SharedSelection, TerminalSurface};
use rowscope::window::ScrollInput;
use rowscope::{ListParams, PointerButton, VirtualList};
use std::rc::Rc;
use std::time::Instant;

type List = VirtualList<TerminalSurface, SharedSelection>;

fn lines(rows: usize, prefix: &str) -> SharedLines {
    LineStore::from_lines((0..rows).map(|i| format!("{prefix} {i} one two"))).into_shared()
}

fn mount(document: &Document, lines: &SharedLines) -> List {
    let surface = document.mount(Rc::clone(lines), 20.0);
    let mut list = VirtualList::new(surface, document.selection(), ListParams::default(), 200.0);
    list.update(false);
    list
}

fn scroll(list: &mut List, scroll_top: f64) -> Option<RestoreOutcome> {
    let input = ScrollInput {
        scroll_top,
        scroll_left: 0.0,
        scroll_height: 0.0,
        client_height: 200.0,
    };
    list.on_scroll(input, Instant::now()).restore
}

fn drag(list: &mut List, from: (usize, usize), to: (usize, usize)) -> Option<SelectionRange> {
    let anchor = list.surface().boundary_at(from.0, from.1).expect("anchor");
    assert!(list.pointer_down(anchor.node, PointerButton::Primary));
    list.native_mut().collapse(anchor).expect("collapse");
    let focus = list.surface().boundary_at(to.0, to.1).expect("focus");
    list.native_mut().extend_to(focus).expect("extend");
    list.pointer_move();
    list.pointer_up(PointerButton::Primary)
}

fn native_text(list: &List) -> String {
    list.native()
        .get_current()
        .map(|current| current.text)
        .unwrap_or_default()
}

#[test]
fn selection_survives_a_long_trip() {
    let document = Document::new();
    let rows = lines(10_000, "row");
    let mut list = mount(&document, &rows);

    let range = drag(&mut list, (3, 2), (6, 5)).expect("selection");
    let text = native_text(&list);
    assert_eq!((range.start, range.end), (3, 6));

    assert_eq!(scroll(&mut list, 150_000.0), Some(RestoreOutcome::Pending));
    assert_eq!(native_text(&list), "");
    assert_eq!(list.selection(), Some(range.clone()));

    assert_eq!(
        scroll(&mut list, 15.0),
        Some(RestoreOutcome::Restored {
            rows: 3..=6,
            fast_path: false
        })
    );
    assert_eq!(native_text(&list), text);
    assert_eq!(list.selection(), Some(range));
}

#[test]
fn select_all_copies_every_row_of_a_large_source() {
    let document = Document::new();
    let rows = lines(10_000, "row");
    let mut list = mount(&document, &rows);

    list.select_all().expect("selection");
    let copied = list.copy_text().expect("copy");

    assert_eq!(copied.lines().count(), 10_000);
    assert!(copied.starts_with("row 0 one two\n"));
    assert!(copied.ends_with("row 9999 one two"));
}

#[test]
fn stale_node_ids_are_rejected_after_re_render() {
    let document = Document::new();
    let rows = lines(100, "row");
    let mut list = mount(&document, &rows);
    let stale = list.surface().boundary_at(2, 0).expect("boundary");

    scroll(&mut list, 500.0);

    assert_eq!(list.rendered_rows(), Some(14..44));
    assert!(!list.pointer_down(stale.node, PointerButton::Primary));
    assert!(!list.model().has_selection());
}

#[test]
fn second_instance_takes_over_the_native_selection() {
    let document = Document::new();
    let left_rows = lines(100, "left");
    let right_rows = lines(100, "right");
    let mut left = mount(&document, &left_rows);
    let mut right = mount(&document, &right_rows);
    let right_instance = right.surface().instance();

    let left_range = drag(&mut left, (2, 0), (4, 3)).expect("left selection");
    let right_range = drag(&mut right, (1, 0), (2, 4)).expect("right selection");

    assert!(native_text(&right).starts_with("right 1"));
    assert_eq!(
        left.refresh_selection(),
        RestoreOutcome::ForeignOwner(right_instance)
    );
    assert_eq!(left.selection(), Some(left_range));
    assert_eq!(right.selection(), Some(right_range));
    assert!(native_text(&left).starts_with("right 1"));
}

#[test]
fn dropping_an_instance_leaves_the_other_usable() {
    let document = Document::new();
    let left_rows = lines(50, "left");
    let right_rows = lines(50, "right");
    let mut left = mount(&document, &left_rows);
    let right = mount(&document, &right_rows);
    drop(right);

    let range = drag(&mut left, (0, 0), (1, 4)).expect("selection");

    assert_eq!(left.copy_text().as_deref(), Some("left 0 one two\nleft"));
    assert_eq!((range.start, range.end), (0, 1));
}
