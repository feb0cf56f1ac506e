//! Tree serialization and debug printing.
//!
//! [§ 13.3 Serializing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#serialising-html-fragments)

use crate::{DomTree, NodeId, NodeType};
use std::fmt::Write;

/// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
///
/// "Void elements: area, base, br, col, embed, hr, img, input, link, meta,
/// source, track, wbr"
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// "If the parent of current node is a style, script, xmp, iframe, noembed,
/// noframes, or plaintext element ... append the value of current node's
/// data literally."
const RAW_TEXT_PARENTS: &[&str] = &[
    "style", "script", "xmp", "iframe", "noembed", "noframes", "plaintext",
];

/// [§ 13.3 innerHTML getter](https://html.spec.whatwg.org/multipage/dynamic-markup-insertion.html#dom-element-innerhtml)
///
/// Serializes the children of `id`.
#[must_use]
pub fn inner_html(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    let raw = tree
        .as_element(id)
        .is_some_and(|e| RAW_TEXT_PARENTS.iter().any(|t| e.is(t)));
    for &child in tree.children(id) {
        serialize_node(tree, child, raw, &mut out);
    }
    out
}

/// Serializes `id` itself and its subtree. A shadow root attached to an
/// element is written as a declarative `<template shadowrootmode="open">`.
#[must_use]
pub fn outer_html(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    serialize_node(tree, id, false, &mut out);
    out
}

fn serialize_node(tree: &DomTree, id: NodeId, raw_text: bool, out: &mut String) {
    let Some(node) = tree.get(id) else { return };
    match &node.node_type {
        NodeType::Document | NodeType::DocumentFragment | NodeType::ShadowRoot { .. } => {
            out.push_str(&inner_html(tree, id));
        }
        NodeType::Element(data) => {
            let _ = write!(out, "<{}", data.tag_name);
            for (name, value) in data.attrs.iter() {
                let _ = write!(out, " {name}=\"{}\"", escape(value, true));
            }
            out.push('>');
            if VOID_ELEMENTS.iter().any(|t| data.is(t)) {
                return;
            }
            if let Some(shadow) = node.shadow_root {
                out.push_str("<template shadowrootmode=\"open\">");
                out.push_str(&inner_html(tree, shadow));
                out.push_str("</template>");
            }
            out.push_str(&inner_html(tree, id));
            let _ = write!(out, "</{}>", data.tag_name);
        }
        NodeType::Text(text) if raw_text => out.push_str(text),
        NodeType::Text(text) => out.push_str(&escape(text, false)),
        NodeType::Comment(data) => {
            let _ = write!(out, "<!--{data}-->");
        }
    }
}

/// [§ 13.3 Escaping a string](https://html.spec.whatwg.org/multipage/parsing.html#escapingString)
fn escape(text: &str, attribute_mode: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '"' if attribute_mode => out.push_str("&quot;"),
            '<' if !attribute_mode => out.push_str("&lt;"),
            '>' if !attribute_mode => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}
