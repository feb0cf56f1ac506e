//! Script extraction and materialization on detached trees.

use inlay_dom::{DomTree, NodeId, inner_html};
use inlay_embed::markers::{IdGenerator, SCRIPT_MARKER_PREFIX, find_marker, marker_payload};
use inlay_embed::scripts::{ScriptRecord, extract_with_placeholders, materialize};
use inlay_html::parse_fragment;
use pretty_assertions::assert_eq;

/// Predictable ids for assertions.
struct Counter(usize);

impl IdGenerator for Counter {
    fn next_id(&mut self) -> String {
        self.0 += 1;
        format!("id-{:04}", self.0)
    }
}

fn extract(markup: &str) -> (DomTree, NodeId, Vec<ScriptRecord>) {
    let mut fragment = parse_fragment(markup);
    let records =
        extract_with_placeholders(&mut fragment.tree, fragment.root, &mut Counter(0)).unwrap();
    (fragment.tree, fragment.root, records)
}

#[test]
fn scripts_become_markers_in_document_order() {
    let (tree, root, records) = extract(
        "<script>a()</script><div><p>x</p><script src=\"b.js\" async></script></div><script type=\"module\" defer>c()</script>",
    );

    assert_eq!(
        inner_html(&tree, root),
        format!(
            "<!--{SCRIPT_MARKER_PREFIX}id-0001--><div><p>x</p><!--{SCRIPT_MARKER_PREFIX}id-0002--></div><!--{SCRIPT_MARKER_PREFIX}id-0003-->"
        )
    );

    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["id-0001", "id-0002", "id-0003"]);

    assert_eq!(records[0].inline_code.as_deref(), Some("a()"));
    assert!(records[1].has_external_source && records[1].is_async);
    assert_eq!(records[1].inline_code, None);
    assert!(records[2].is_module && records[2].is_deferred);

    for record in &records {
        assert!(find_marker(&tree, root, &record.id).is_some());
    }
}

#[test]
fn template_contents_are_left_alone() {
    let (tree, root, records) =
        extract("<template><script>inert()</script></template><script>live()</script>");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].inline_code.as_deref(), Some("live()"));
    assert_eq!(tree.elements_by_tag_name(root, "script").len(), 1);
}

#[test]
fn markup_without_scripts_is_unchanged() {
    let (tree, root, records) = extract("<p class=\"a\">hello <b>world</b></p>");
    assert!(records.is_empty());
    assert_eq!(inner_html(&tree, root), "<p class=\"a\">hello <b>world</b></p>");
}

#[test]
fn materialize_rederives_special_attributes() {
    let (_, _, records) = extract(
        "<script nonce=\"n\" src=\"  x.js\" async defer type=\"MODULE \" data-a=\"1\"></script>",
    );
    let mut dom = DomTree::new();
    let script = materialize(&mut dom, &records[0]).unwrap();

    assert_eq!(dom.parent(script), None);
    let attrs: Vec<(&str, &str)> = dom.as_element(script).unwrap().attrs.iter().collect();
    assert_eq!(
        attrs,
        vec![
            ("nonce", "n"),
            ("data-a", "1"),
            ("type", "module"),
            ("async", ""),
            ("defer", ""),
            ("src", "x.js"),
        ]
    );
    assert_eq!(dom.text_content(script), "");
}

#[test]
fn materialize_inline_sets_text_and_no_type() {
    let (_, _, records) = extract("<script type=\"text/javascript\" id=\"k\">let x = 1 < 2;</script>");
    let mut dom = DomTree::new();
    let script = materialize(&mut dom, &records[0]).unwrap();

    assert_eq!(dom.get_attribute(script, "type"), None);
    assert_eq!(dom.get_attribute(script, "id"), Some("k"));
    assert_eq!(dom.text_content(script), "let x = 1 < 2;");
}

#[test]
fn marker_payload_is_prefix_and_id() {
    assert_eq!(marker_payload("abc"), format!("{SCRIPT_MARKER_PREFIX}abc"));
}

#[test]
fn materialize_keeps_data_block_type() {
    let (_, _, records) = extract(
        "<script type=\"application/ld+json\">{}</script><script type=\"\">a()</script>",
    );
    let mut dom = DomTree::new();
    let data = materialize(&mut dom, &records[0]).unwrap();
    let classic = materialize(&mut dom, &records[1]).unwrap();

    assert_eq!(dom.get_attribute(data, "type"), Some("application/ld+json"));
    assert_eq!(dom.text_content(data), "{}");
    assert_eq!(dom.get_attribute(classic, "type"), None);
}
