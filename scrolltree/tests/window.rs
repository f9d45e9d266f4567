use scrolltree::text::{display_width, truncate_to_width};
use scrolltree::{row_text, Cursor, Error, NodeBuilder, Row, Tree, Viewport};

/// `A(B(C, D), E(F, G, H))`
fn letters() -> Tree<()> {
    NodeBuilder::new("A")
        .child(NodeBuilder::new("B").children(["C", "D"].map(NodeBuilder::new)))
        .child(NodeBuilder::new("E").children(["F", "G", "H"].map(NodeBuilder::new)))
        .freeze_as_root()
}

fn labels<'r, A>(rows: &'r [Row<'_, A>]) -> Vec<Option<&'r str>> {
    rows.iter()
        .map(|row| row.visible.then(|| row.text.trim_start()))
        .collect()
}

fn indent(levels: usize) -> String {
    " ".repeat(4 * levels)
}

// ============================================================================
// Visibility
// ============================================================================

#[test]
fn test_render_centres_focus() {
    let mut cursor = Cursor::new(letters());
    cursor.left();
    cursor.left();
    let rows = Viewport::new(15, 200).unwrap().render(&cursor);

    assert_eq!(rows.len(), 15);
    assert!(rows[7].focused);
    assert_eq!(rows.iter().filter(|row| row.focused).count(), 1);
    assert_eq!(rows[7].node.map(|n| n.value()), Some("C"));
}

#[test]
fn test_render_blanks_exhausted_rows() {
    let mut cursor = Cursor::new(letters());
    cursor.left();
    cursor.left();
    let rows = Viewport::new(15, 200).unwrap().render(&cursor);

    // previous(): C -> B -> A -> none; next(): C -> D -> E -> none
    let mut expected = vec![None; 15];
    expected[5] = Some("A -");
    expected[6] = Some("B -");
    expected[7] = Some("C");
    expected[8] = Some("D");
    expected[9] = Some("E +");
    assert_eq!(labels(&rows), expected);

    assert_eq!(rows.iter().filter(|row| row.visible).count(), 5);
    for row in rows.iter().filter(|row| !row.visible) {
        assert!(row.node.is_none());
        assert!(row.text.is_empty());
    }
}

#[test]
fn test_visible_count_is_bounded_by_line_count() {
    let wide = NodeBuilder::<()>::new("root")
        .children((0..40).map(|i| NodeBuilder::new(format!("item {i}"))))
        .freeze_as_root();
    let mut cursor = Cursor::new(wide);
    cursor.left();
    for _ in 0..20 {
        cursor.down();
    }

    let rows = Viewport::new(15, 200).unwrap().render(&cursor);
    assert_eq!(rows.iter().filter(|row| row.visible).count(), 15);
    assert_eq!(labels(&rows)[0], Some("item 13"));
    assert_eq!(labels(&rows)[14], Some("item 27"));
}

#[test]
fn test_render_at_root() {
    let cursor = Cursor::new(letters());
    let rows = Viewport::new(5, 200).unwrap().render(&cursor);
    assert_eq!(labels(&rows), [None, None, Some("A +"), None, None]);
}

#[test]
fn test_even_line_count_centres_low() {
    let mut cursor = Cursor::new(letters());
    cursor.left();
    let viewport = Viewport::new(4, 200).unwrap();
    assert_eq!(viewport.center(), 2);

    let rows = viewport.render(&cursor);
    assert_eq!(labels(&rows), [None, Some("A -"), Some("B +"), Some("E +")]);
}

// ============================================================================
// Row text
// ============================================================================

#[test]
fn test_indentation_is_relative_to_focus() {
    let tree = letters();
    let c = tree.preorder().find(|n| n.value() == "C").unwrap();
    let a = tree.root();
    let b = c.parent().unwrap();
    let d = c.next().unwrap();

    assert_eq!(row_text(c, c), format!("{}C", indent(8)));
    assert_eq!(row_text(c, d), format!("{}D", indent(8)));
    assert_eq!(row_text(c, b), format!("{}B -", indent(7)));
    assert_eq!(row_text(c, a), format!("{}A -", indent(6)));

    // Seen from the root, deeper nodes move right
    assert_eq!(row_text(a, c), format!("{}C", indent(10)));
}

#[test]
fn test_marker_only_on_focus_ancestors() {
    let tree = letters();
    let b = tree.root().first_child().unwrap();
    let e = b.next_sibling().unwrap();
    let g = e.children().nth(1).unwrap();

    assert_eq!(row_text(g, e), format!("{}E -", indent(7)));
    assert_eq!(row_text(g, b), format!("{}B +", indent(7)));
    // A node with children that is the focus itself is not its own ancestor
    assert_eq!(row_text(e, e), format!("{}E +", indent(8)));
}

#[test]
fn test_indentation_clamps_for_shallow_rows() {
    let mut builder = NodeBuilder::<()>::new("deep");
    for level in (1..12).rev() {
        builder = NodeBuilder::new(format!("level {level}")).child(builder);
    }
    let tree = NodeBuilder::new("top")
        .child(builder)
        .child(NodeBuilder::new("after"))
        .freeze_as_root();
    let deep = tree.preorder().find(|n| n.value() == "deep").unwrap();
    let after = deep.next().unwrap();

    assert_eq!(deep.depth(), 12);
    assert_eq!(after.value(), "after");
    assert_eq!(row_text(deep, after), "after");
}

#[test]
fn test_rows_truncate_to_width() {
    let cursor = Cursor::new(letters());
    let rows = Viewport::new(1, 20).unwrap().render(&cursor);
    assert_eq!(display_width(&rows[0].text), 20);
    assert!(rows[0].text.ends_with('…'));
}

#[test]
fn test_truncate_wide_characters() {
    assert_eq!(truncate_to_width("hello", 10), "hello");
    assert_eq!(truncate_to_width("hello world", 8), "hello w…");
    assert_eq!(truncate_to_width("日本語", 4), "日…");
    assert_eq!(truncate_to_width("abc", 0), "");
}

// ============================================================================
// Viewport
// ============================================================================

#[test]
fn test_viewport_validation() {
    assert!(matches!(Viewport::new(0, 80), Err(Error::EmptyViewport)));
    assert!(matches!(
        Viewport::new(40, 80),
        Err(Error::ViewportTooTall { max: 17, .. })
    ));

    let viewport = Viewport::new(Viewport::MAX_LINES, 80).unwrap();
    assert_eq!(viewport.line_count(), 17);
    assert_eq!(viewport.center(), 8);
    assert_eq!(viewport.width(), 80);
    assert_eq!(
        Viewport::new(18, 80).unwrap_err().to_string(),
        "viewport of 18 lines exceeds the maximum of 17 lines"
    );
}
