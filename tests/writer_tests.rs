// tests/writer_tests.rs

use symbolic::{parse, render, render_pretty, Node, PrettyPrinter};

fn read(source: &str) -> Node {
    parse(source, None)
        .unwrap_or_else(|error| panic!("failed to parse {:?}: {}", source, error))
        .strip_origins()
}

const ROUND_TRIP_CASES: &[&str] = &[
    "a",
    "-5",
    "0.0f",
    "\"a b\"",
    "\"\"",
    "`a",
    "[]",
    "[a b c]",
    "[[0 1] [2 4]]",
    "[Index 0 a]",
    "a.b.c",
    "a.[0].b",
    "[a.`b c]",
    "[x.\"y z\"]",
    "a.[Index c b]",
    "`b.c",
    "#FF0000FF",
    "[\"a b\" 1.5e3 -2 0x1F 3.0f]",
    "; header\n[Entity [Name \"Hero\"] #| note |# [Health 100]]",
];

#[test]
fn test_atom_quoting() {
    assert_eq!(render(&Node::atom("a b")), "\"a b\"");
    assert_eq!(render(&Node::atom("abc")), "abc");
    assert_eq!(render(&Node::atom("")), "\"\"");
    assert_eq!(render(&Node::atom("#FF00FF")), "#FF00FF");
}

#[test]
fn test_numbers_and_text_render_verbatim() {
    assert_eq!(render(&Node::number("0.0f")), "0.0f");
    assert_eq!(render(&Node::text("hi there")), "\"hi there\"");
    assert_eq!(render(&Node::quote(Node::atom("a"))), "`a");
}

#[test]
fn test_index_forms() {
    let sugar = |indexer: Node| Node::list(vec![Node::atom("Index"), indexer, Node::atom("a")]);
    assert_eq!(render(&sugar(Node::number("0"))), "a.[0]");
    assert_eq!(render(&sugar(Node::atom("b"))), "a.b");
    assert_eq!(render(&Node::list(vec![Node::atom("Index"), Node::atom("b")])), "[Index b]");
}

#[test]
fn test_round_trip_parse_render_parse() {
    for src in ROUND_TRIP_CASES {
        let first = read(src);
        let rendered = render(&first);
        let second = read(&rendered);
        assert_eq!(first, second, "Round-trip failed for: {}", src);
    }
}

#[test]
fn test_render_is_idempotent() {
    for src in ROUND_TRIP_CASES {
        let rendered = render(&read(src));
        assert_eq!(render(&read(&rendered)), rendered, "Not idempotent for: {}", src);
    }
}

#[test]
fn test_pretty_output_reads_back() {
    let printer = PrettyPrinter {
        max_width: 12,
        indent: 4,
    };
    for src in ROUND_TRIP_CASES {
        let tree = read(src);
        let pretty = render_pretty(&tree, &printer);
        assert_eq!(read(&pretty), tree, "Pretty round-trip failed for: {}", src);
    }
}

#[test]
fn test_display_uses_canonical_text() {
    let node = read("[a    b\n c]");
    assert_eq!(node.to_string(), "[a b c]");
}

#[test]
fn test_json_dump() {
    let node = read("[a]");
    let json = serde_json::to_string(&node).unwrap();
    assert_eq!(json, r#"{"List":[[{"Atom":["a",null]}],null]}"#);
    let back: Node = serde_json::from_str(&json).unwrap();
    assert_eq!(back, node);
}
