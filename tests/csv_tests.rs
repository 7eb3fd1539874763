// tests/csv_tests.rs

use symbolic::{parse_csv, parse_csv_with, CsvOptions, ErrorKind, Node, Position};

#[test]
fn test_header_is_dropped_and_cells_are_read() {
    let node = parse_csv("a,b\n1,[x y]\n", true, Some("table.csv")).unwrap();

    let expected = Node::list(vec![Node::list(vec![
        Node::number("1"),
        Node::list(vec![Node::atom("x"), Node::atom("y")]),
    ])]);
    assert_eq!(node.strip_origins(), expected);
}

#[test]
fn test_result_origin_is_zeroed_over_whole_input() {
    let text = "a,b\n1,2\n";
    let node = parse_csv(text, false, Some("table.csv")).unwrap();
    let origin = node.origin().unwrap();
    assert_eq!(origin.start, Position::ZERO);
    assert_eq!(origin.stop, Position::ZERO);
    assert_eq!(origin.source.text, text);
    assert_eq!(origin.source.source_id.as_deref(), Some("table.csv"));
    assert_eq!(node.as_list().unwrap().len(), 2);
}

#[test]
fn test_cell_kinds() {
    let node = parse_csv("Name,Note,Empty,Quoted\nHero,brave and bold,,\"[a b]\"\n", true, None)
        .unwrap()
        .strip_origins();

    let expected = Node::list(vec![Node::list(vec![
        Node::atom("Hero"),
        Node::text("brave and bold"),
        Node::text(""),
        Node::list(vec![Node::atom("a"), Node::atom("b")]),
    ])]);
    assert_eq!(node, expected);
}

#[test]
fn test_ragged_rows_are_accepted() {
    let options = CsvOptions {
        has_header: false,
        ..CsvOptions::default()
    };
    let node = parse_csv_with("a\nb,c\n", &options, None).unwrap().strip_origins();
    let rows = node.into_list().unwrap();
    assert_eq!(rows[0], Node::list(vec![Node::atom("a")]));
    assert_eq!(rows[1], Node::list(vec![Node::atom("b"), Node::atom("c")]));
}

#[test]
fn test_unparseable_cell_fails_whole_table() {
    let error = parse_csv("h\n[open\n", true, None).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Structural);
}

#[test]
fn test_empty_table() {
    let node = parse_csv("", true, None).unwrap();
    assert_eq!(node.strip_origins(), Node::list(vec![]));
}
