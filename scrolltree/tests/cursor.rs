use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use scrolltree::{handle_key, ActionError, Cursor, Key, Nav, NodeBuilder, NodeId, Tree};

#[derive(Debug, Clone, PartialEq)]
enum Act {
    Select(&'static str),
    Fail,
    Boom,
}

fn perform(log: &RefCell<Vec<&'static str>>, action: &Act) -> Result<(), ActionError> {
    match action {
        Act::Select(target) => {
            log.borrow_mut().push(target);
            Ok(())
        }
        Act::Fail => Err("target control is gone".into()),
        Act::Boom => panic!("host exploded"),
    }
}

/// `Root(Sheet1(Range, Columns(ColA, ColB)), Sheet2(Range2))`
fn workbook() -> Tree<Act> {
    let columns = NodeBuilder::new("Columns").children([
        NodeBuilder::with_action("ColA", Act::Select("A:A")),
        NodeBuilder::with_action("ColB", Act::Select("B:B")),
    ]);
    let mut sheet1 = NodeBuilder::with_action("Sheet1", Act::Select("Sheet1"));
    sheet1.append_child(NodeBuilder::new("Range"));
    sheet1.append_child(columns);
    let sheet2 = NodeBuilder::with_action("Sheet2", Act::Fail).child(NodeBuilder::new("Range2"));

    let mut root = NodeBuilder::new("Root");
    root.extend_children([sheet1, sheet2]);
    root.freeze_as_root()
}

fn focus<A>(cursor: &Cursor<A>) -> &str {
    cursor.focus().value()
}

// ============================================================================
// Moves
// ============================================================================

#[test]
fn test_scenario_walk() {
    let mut cursor = Cursor::new(workbook());
    assert_eq!(focus(&cursor), "Root");

    let steps: [(fn(&mut Cursor<Act>) -> bool, &str); 9] = [
        (Cursor::left, "Sheet1"),
        (Cursor::left, "Range"),
        (Cursor::up, "Range"),
        (Cursor::down, "Columns"),
        (Cursor::left, "ColA"),
        (Cursor::down, "ColB"),
        (Cursor::right, "Columns"),
        (Cursor::right, "Sheet1"),
        (Cursor::down, "Sheet2"),
    ];
    for (index, (step, expected)) in steps.iter().enumerate() {
        step(&mut cursor);
        assert_eq!(focus(&cursor), *expected, "after step {index}");
    }
}

#[test]
fn test_moves_report_changes() {
    let mut cursor = Cursor::new(workbook());
    assert!(cursor.left());
    assert!(cursor.left());
    assert!(!cursor.up());
    assert!(cursor.down());
}

#[test]
fn test_up_without_previous_sibling_is_noop() {
    let mut cursor = Cursor::new(workbook());
    cursor.left();
    let before = cursor.focus_id();
    assert!(!cursor.up());
    assert_eq!(cursor.focus_id(), before);
}

#[test]
fn test_down_at_last_sibling_is_noop() {
    let mut cursor = Cursor::new(workbook());
    cursor.left();
    cursor.down();
    assert_eq!(focus(&cursor), "Sheet2");
    assert!(!cursor.down());
    assert_eq!(focus(&cursor), "Sheet2");
}

#[test]
fn test_right_at_root_is_noop() {
    let mut cursor = Cursor::new(workbook());
    assert!(!cursor.right());
    assert_eq!(cursor.focus_id(), NodeId::ROOT);
}

#[test]
fn test_left_at_leaf_is_noop() {
    let mut cursor = Cursor::new(workbook());
    cursor.left();
    cursor.left();
    assert_eq!(focus(&cursor), "Range");
    assert!(!cursor.left());
    assert_eq!(focus(&cursor), "Range");
}

#[test]
fn test_single_node_tree_never_moves() {
    let mut cursor = Cursor::new(NodeBuilder::<Act>::new("alone").freeze_as_root());
    assert!(!cursor.down());
    assert!(!cursor.up());
    assert!(!cursor.left());
    assert!(!cursor.right());
    assert_eq!(focus(&cursor), "alone");
}

#[test]
fn test_set_focus() {
    let tree = Arc::new(workbook());
    let col_b = tree
        .preorder()
        .find(|n| n.value() == "ColB")
        .map(|n| n.id())
        .unwrap();

    let mut cursor = Cursor::new(tree.clone());
    assert!(cursor.set_focus(col_b));
    assert!(!cursor.set_focus(col_b));
    assert_eq!(focus(&cursor), "ColB");
    assert!(Arc::ptr_eq(cursor.tree(), &tree));
}

// ============================================================================
// Actions
// ============================================================================

#[test]
fn test_enter_runs_action_without_moving() {
    let log = RefCell::new(Vec::new());
    let mut cursor = Cursor::new(workbook());
    cursor.left();

    let mut handler = |action: &Act| perform(&log, action);
    cursor.enter(&mut handler);

    assert_eq!(*log.borrow(), ["Sheet1"]);
    assert_eq!(focus(&cursor), "Sheet1");
}

#[test]
fn test_enter_without_action_is_noop() {
    let log = RefCell::new(Vec::new());
    let cursor = Cursor::new(workbook());

    let mut handler = |action: &Act| perform(&log, action);
    cursor.enter(&mut handler);

    assert!(log.borrow().is_empty());
    assert_eq!(focus(&cursor), "Root");
}

#[test]
fn test_failing_action_is_contained() {
    let reported = Rc::new(RefCell::new(Vec::new()));
    let sink = reported.clone();
    let mut cursor =
        Cursor::new(workbook()).on_error(move |failure| sink.borrow_mut().push(failure.to_string()));
    cursor.left();
    cursor.down();
    let before = cursor.focus_id();

    let log = RefCell::new(Vec::new());
    let mut handler = |action: &Act| perform(&log, action);
    cursor.enter(&mut handler);

    assert_eq!(cursor.focus_id(), before);
    let reported = reported.borrow();
    assert_eq!(reported.len(), 1);
    assert!(reported[0].contains("\"Sheet2\""));
    assert!(reported[0].ends_with("target control is gone"));
}

#[test]
fn test_panicking_action_is_contained() {
    let reported = Rc::new(RefCell::new(Vec::new()));
    let sink = reported.clone();
    let tree = NodeBuilder::with_action("fragile", Act::Boom).freeze_as_root();
    let cursor = Cursor::new(tree).on_error(move |failure| sink.borrow_mut().push(failure.to_string()));

    let log = RefCell::new(Vec::new());
    let mut handler = |action: &Act| perform(&log, action);
    cursor.enter(&mut handler);
    // The cursor keeps working after a contained panic
    cursor.enter(&mut handler);

    assert_eq!(focus(&cursor), "fragile");
    let reported = reported.borrow();
    assert_eq!(reported.len(), 2);
    assert!(reported[0].ends_with("panicked: host exploded"));
}

#[test]
fn test_failure_without_reporter_is_swallowed() {
    let tree = NodeBuilder::with_action("fragile", Act::Fail).freeze_as_root();
    let cursor = Cursor::new(tree);
    let log = RefCell::new(Vec::new());
    let mut handler = |action: &Act| perform(&log, action);
    cursor.enter(&mut handler);
    assert_eq!(focus(&cursor), "fragile");
}

// ============================================================================
// Key dispatch
// ============================================================================

#[test]
fn test_handle_key_maps_arrows() {
    let log = RefCell::new(Vec::new());
    let mut handler = |action: &Act| perform(&log, action);
    let mut cursor = Cursor::new(workbook());

    assert_eq!(handle_key(&mut cursor, Key::Left, &mut handler), Some(Nav::Left));
    assert_eq!(handle_key(&mut cursor, Key::Down, &mut handler), Some(Nav::Down));
    assert_eq!(focus(&cursor), "Sheet2");
    assert_eq!(handle_key(&mut cursor, Key::Up, &mut handler), Some(Nav::Up));
    assert_eq!(handle_key(&mut cursor, Key::Enter, &mut handler), Some(Nav::Enter));
    assert_eq!(handle_key(&mut cursor, Key::Right, &mut handler), Some(Nav::Right));
    assert_eq!(focus(&cursor), "Root");
    assert_eq!(*log.borrow(), ["Sheet1"]);
}

#[test]
fn test_handle_key_ignores_other_keys() {
    let mut cursor = Cursor::new(workbook());
    let mut handler = |_: &Act| -> Result<(), ActionError> { Ok(()) };

    assert_eq!(handle_key(&mut cursor, Key::Char('j'), &mut handler), None);
    assert_eq!(handle_key(&mut cursor, Key::PageDown, &mut handler), None);
    assert_eq!(cursor.focus_id(), NodeId::ROOT);
}

#[test]
fn test_boundary_key_still_counts_as_applied() {
    let mut cursor = Cursor::new(workbook());
    let mut handler = |_: &Act| -> Result<(), ActionError> { Ok(()) };
    assert_eq!(handle_key(&mut cursor, Key::Right, &mut handler), Some(Nav::Right));
    assert_eq!(cursor.focus_id(), NodeId::ROOT);
}
