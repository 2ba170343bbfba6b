//! Round-trip tests for the markup format (tree → markup → tree).
//!
//! Serialized output is canonical rather than byte-identical, so the
//! guarantee under test is structural: re-parsing serialized markup yields a
//! tree equal to the input.

use noteml::formats::markup::{parse, serialize, MARKUP_HEADER};
use noteml::tree::{
    Attachment, CodeBlock, Document, Link, List, ListItem, Node, Table, TableCell, TableRow,
    Unknown,
};
use proptest::prelude::*;

fn roundtrip(doc: &Document) -> Document {
    let markup = serialize(doc);
    parse(&markup).unwrap_or_else(|e| panic!("serialized markup failed to parse: {e}\n{markup}"))
}

#[test]
fn test_serialized_output_carries_the_header() {
    let markup = serialize(&Document::default());
    assert!(markup.starts_with(MARKUP_HEADER));
    assert!(markup.ends_with("<en-note></en-note>"));
}

#[test]
fn test_mixed_content_roundtrip() {
    let doc = Document::with_children(vec![
        Node::Paragraph(vec![
            Node::Text("Shopping ".to_string()),
            Node::Bold(vec![Node::Text("list".to_string())]),
        ]),
        Node::List(List {
            ordered: false,
            items: vec![
                ListItem {
                    children: vec![Node::Todo(true), Node::Text("milk".to_string())],
                },
                ListItem {
                    children: vec![Node::Todo(false), Node::Text("eggs".to_string())],
                },
            ],
        }),
        Node::Paragraph(vec![Node::Attachment(Attachment {
            hash: "deadbeef".to_string(),
            mime: Some("application/pdf".to_string()),
        })]),
    ]);
    assert_eq!(roundtrip(&doc), doc);
}

#[test]
fn test_special_characters_roundtrip() {
    let doc = Document::with_children(vec![Node::Paragraph(vec![Node::Text(
        "a < b && b > c".to_string(),
    )])]);
    assert_eq!(roundtrip(&doc), doc);
}

#[test]
fn test_link_href_with_query_roundtrip() {
    let doc = Document::with_children(vec![Node::Paragraph(vec![Node::Link(Link {
        href: "https://example.com/?a=1&b=\"2\"".to_string(),
        children: vec![Node::Text("query".to_string())],
    })])]);
    assert_eq!(roundtrip(&doc), doc);
}

#[test]
fn test_unknown_element_roundtrip() {
    let doc = Document::with_children(vec![Node::Unknown(Unknown {
        tag: "en-crypt".to_string(),
        attributes: vec![
            ("cipher".to_string(), "AES".to_string()),
            ("length".to_string(), "128".to_string()),
        ],
        children: vec![Node::Text("ciphertext".to_string())],
    })]);
    assert_eq!(roundtrip(&doc), doc);
}

#[test]
fn test_nested_table_roundtrip() {
    let doc = Document::with_children(vec![Node::Table(Table {
        rows: vec![TableRow {
            cells: vec![
                TableCell {
                    children: vec![Node::Bold(vec![Node::Text("head".to_string())])],
                },
                TableCell {
                    children: vec![Node::List(List {
                        ordered: true,
                        items: vec![ListItem {
                            children: vec![Node::Text("cell item".to_string())],
                        }],
                    })],
                },
            ],
        }],
    })]);
    assert_eq!(roundtrip(&doc), doc);
}

// Strategies below avoid adjacent bare text nodes: an XML parser merges
// sibling character data, so `Text("a"), Text("b")` cannot survive any
// serializer. Text only appears wrapped or as a lone child.

fn arb_text() -> impl Strategy<Value = Node> {
    "[a-zA-Z0-9][a-zA-Z0-9 ]{0,11}".prop_map(Node::Text)
}

fn arb_inline() -> impl Strategy<Value = Node> {
    prop_oneof![
        arb_text().prop_map(|t| Node::Bold(vec![t])),
        arb_text().prop_map(|t| Node::Italic(vec![t])),
        arb_text().prop_map(|t| Node::Underline(vec![t])),
        arb_text().prop_map(|t| Node::Strikethrough(vec![t])),
        "[a-zA-Z0-9 ]{0,12}".prop_map(Node::InlineCode),
        Just(Node::LineBreak),
        any::<bool>().prop_map(Node::Todo),
        ("[a-z]{1,8}", arb_text()).prop_map(|(href, label)| Node::Link(Link {
            href,
            children: vec![label],
        })),
        ("[a-f0-9]{6}", proptest::option::of("[a-z]{3,5}/[a-z]{3,5}")).prop_map(
            |(hash, mime)| Node::Attachment(Attachment { hash, mime })
        ),
    ]
}

fn arb_block() -> impl Strategy<Value = Node> {
    prop_oneof![
        prop::collection::vec(arb_inline(), 0..4).prop_map(Node::Paragraph),
        arb_text().prop_map(|t| Node::Paragraph(vec![t])),
        (any::<bool>(), prop::collection::vec(arb_inline(), 1..3))
            .prop_map(|(ordered, children)| Node::List(List {
                ordered,
                items: vec![ListItem { children }],
            })),
        "[a-zA-Z0-9 ]{0,20}".prop_map(|content| Node::CodeBlock(CodeBlock {
            language: None,
            content,
        })),
        prop::collection::vec(prop::collection::vec(arb_inline(), 1..3), 1..3).prop_map(|rows| {
            Node::Table(Table {
                rows: rows
                    .into_iter()
                    .map(|cells| TableRow {
                        cells: cells
                            .into_iter()
                            .map(|node| TableCell {
                                children: vec![node],
                            })
                            .collect(),
                    })
                    .collect(),
            })
        }),
        (
            prop::collection::btree_map("[a-z]{2,6}", "[a-zA-Z0-9]{0,8}", 0..3),
            arb_inline()
        )
            .prop_map(|(attributes, child)| Node::Unknown(Unknown {
                tag: "x-extension".to_string(),
                attributes: attributes.into_iter().collect(),
                children: vec![child],
            })),
    ]
}

proptest! {
    #[test]
    fn prop_tree_survives_roundtrip(blocks in prop::collection::vec(arb_block(), 0..6)) {
        let doc = Document::with_children(blocks);
        prop_assert_eq!(roundtrip(&doc), doc);
    }
}
