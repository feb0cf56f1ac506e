//! Font-face scanning and hoisting against page trees.

use std::collections::HashSet;

use inlay_dom::DomTree;
use inlay_embed::fonts::font_face_rules;
use inlay_embed::{DEFAULT_FONT_BLOCK_ID, extract_font_faces};
use inlay_html::parse_document;
use pretty_assertions::assert_eq;
use quickcheck_macros::quickcheck;

/// Keep only characters that neither change the brace structure of a
/// generated rule body nor get normalized by the HTML parser.
fn sanitize(body: &str) -> String {
    body.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect()
}

#[quickcheck]
fn well_nested_rules_are_all_found(bodies: Vec<String>) -> bool {
    let rules: Vec<String> = bodies
        .iter()
        .map(|body| format!("@font-face {{ {} }}", sanitize(body).trim()))
        .collect();
    let css = rules.join(" p { color: red } ");
    font_face_rules(&css) == rules.iter().map(String::as_str).collect::<Vec<_>>()
}

#[quickcheck]
fn hoisting_appends_each_distinct_rule_exactly_once(bodies: Vec<String>) -> bool {
    let rules: Vec<String> = bodies
        .iter()
        .map(|body| format!("@font-face {{ {} }}", sanitize(body).trim()))
        .collect();
    let distinct: HashSet<&String> = rules.iter().collect();
    let source = parse_document(&format!("<style>{}</style>", rules.join("\n")));
    let mut page = parse_document("");

    let first = extract_font_faces(&source, &mut page, DEFAULT_FONT_BLOCK_ID);
    let second = extract_font_faces(&source, &mut page, DEFAULT_FONT_BLOCK_ID);
    first == distinct.len() && second == 0
}

#[test]
fn head_is_created_when_missing() {
    let source = parse_document("<style>@font-face { font-family: X; }</style>");
    let mut page = DomTree::new();
    let html = page.create_element("html");
    page.append_child(page.root(), html).unwrap();

    assert_eq!(extract_font_faces(&source, &mut page, "fonts"), 1);
    let head = page.head().unwrap();
    let block = page.get_element_by_id("fonts").unwrap();
    assert_eq!(page.parent(block), Some(head));
    assert_eq!(page.text_content(block), "\n@font-face { font-family: X; }");
}

#[test]
fn existing_block_content_is_kept() {
    let mut page = parse_document(
        "<head><style id=\"fonts\">@font-face { font-family: Old; }</style></head>",
    );
    let source = parse_document(
        "<style>@font-face { font-family: Old; } @font-face { font-family: New; }</style>",
    );

    assert_eq!(extract_font_faces(&source, &mut page, "fonts"), 1);
    let block = page.get_element_by_id("fonts").unwrap();
    assert_eq!(
        page.text_content(block),
        "@font-face { font-family: Old; }\n@font-face { font-family: New; }"
    );
}

#[test]
fn page_without_document_element_is_left_alone() {
    let source = parse_document("<style>@font-face { font-family: X; }</style>");
    let mut page = DomTree::new();
    assert_eq!(extract_font_faces(&source, &mut page, "fonts"), 0);
    assert!(page.children(page.root()).is_empty());
}

#[test]
fn rules_in_several_stylesheets_keep_document_order() {
    let source = parse_document(
        "<head><style>@font-face{a:1}</style></head><body><style>@font-face{b:2}</style></body>",
    );
    let mut page = parse_document("");
    assert_eq!(extract_font_faces(&source, &mut page, "f"), 2);
    let block = page.get_element_by_id("f").unwrap();
    assert_eq!(page.text_content(block), "\n@font-face{a:1}\n@font-face{b:2}");
}
