//! HTML parsing for the inlay renderer.
//!
//! # Scope
//!
//! Tokenization and tree construction are delegated to
//! [html5ever](https://docs.rs/html5ever), which implements the WHATWG
//! parsing algorithm including its error recovery ("unclosed tags are
//! auto-closed", misnested formatting elements, foster parenting, ...).
//! This crate converts html5ever's reference-counted tree into an
//! [`inlay_dom::DomTree`].
//!
//! Two entry points mirror the two ways content is parsed:
//! - [`parse_document`] - a complete document; `html`, `head` and `body`
//!   are synthesised when the input lacks them.
//! - [`parse_fragment`] - markup destined for an existing container; the
//!   result is a detached `DocumentFragment`.
//!
//! Parsing never fails: malformed input produces whatever tree the
//! recovery rules build.

use html5ever::tendril::TendrilSink;
use html5ever::{
    LocalName, Namespace, ParseOpts, QualName, parse_document as html5ever_parse_document,
    parse_fragment as html5ever_parse_fragment,
};
use inlay_dom::{AttributesMap, DomTree, ElementData, NodeId, NodeType};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// [Infra § 8 Namespaces](https://infra.spec.whatwg.org/#html-namespace)
const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// A detached fragment produced by [`parse_fragment`].
#[derive(Debug, Clone)]
pub struct ParsedFragment {
    /// The tree owning the fragment's nodes.
    pub tree: DomTree,
    /// The `DocumentFragment` node holding the parsed content.
    pub root: NodeId,
}

/// [§ 13.2 Parsing HTML documents](https://html.spec.whatwg.org/multipage/parsing.html#parsing)
///
/// Parse `markup` as a complete HTML document.
#[must_use]
pub fn parse_document(markup: &str) -> DomTree {
    let dom = parse_rcdom(markup);
    let mut tree = DomTree::new();
    for child in dom.document.children.borrow().iter() {
        convert_into(child, &mut tree, NodeId::ROOT);
    }
    tree
}

/// [§ 13.4 Parsing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#parsing-html-fragments)
///
/// Parse `markup` as the content of a `<body>` context element.
///
/// "Let root be a new html element with no attributes." Every node the
/// parser produces, comments included, ends up under that root; its
/// children become the `DocumentFragment`. `<style>` and `<script>` stay
/// where they appear, and stray `html`/`head`/`body` tags are ignored, as
/// they are when assigning `innerHTML`.
#[must_use]
pub fn parse_fragment(markup: &str) -> ParsedFragment {
    let context = QualName::new(None, Namespace::from(HTML_NAMESPACE), LocalName::from("body"));
    let dom = html5ever_parse_fragment(RcDom::default(), ParseOpts::default(), context, Vec::new())
        .one(markup);

    let mut tree = DomTree::new();
    let root = tree.create_fragment();
    for top in dom.document.children.borrow().iter() {
        for child in top.children.borrow().iter() {
            convert_into(child, &mut tree, root);
        }
    }

    ParsedFragment { tree, root }
}

fn parse_rcdom(markup: &str) -> RcDom {
    html5ever_parse_document(RcDom::default(), ParseOpts::default()).one(markup)
}

/// Convert `handle` and its subtree, appending the result under `parent`.
///
/// Doctypes and processing instructions have no counterpart in the arena
/// tree and are skipped.
fn convert_into(handle: &Handle, tree: &mut DomTree, parent: NodeId) {
    let node_type = match &handle.data {
        NodeData::Element { name, attrs, .. } => {
            let attrs: AttributesMap = attrs
                .borrow()
                .iter()
                .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                .collect();
            NodeType::Element(ElementData {
                tag_name: name.local.to_string(),
                attrs,
            })
        }
        NodeData::Text { contents } => NodeType::Text(contents.borrow().to_string()),
        NodeData::Comment { contents } => NodeType::Comment(contents.to_string()),
        NodeData::Document
        | NodeData::Doctype { .. }
        | NodeData::ProcessingInstruction { .. } => return,
    };

    let id = tree.alloc(node_type);
    // Both ids come from this tree and `id` is fresh, so the append cannot
    // fail; a failure would only drop the node.
    if tree.append_child(parent, id).is_err() {
        return;
    }

    // Template contents live in a separate fragment in html5ever; the arena
    // tree keeps them as ordinary children of the template element.
    if let NodeData::Element {
        template_contents, ..
    } = &handle.data
        && let Some(contents) = template_contents.borrow().as_ref()
    {
        for child in contents.children.borrow().iter() {
            convert_into(child, tree, id);
        }
    }

    for child in handle.children.borrow().iter() {
        convert_into(child, tree, id);
    }
}
