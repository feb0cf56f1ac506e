//! Positional markers, script ids and attribute normalization.
//!
//! A marker is a comment node left where a script element stood. Its data
//! is a prefix followed by the script's id; lookup is by substring, so ids
//! within one render pass must never contain one another. [`UuidIds`]
//! produces fixed-width ids, which guarantees that.

use inlay_dom::{DomTree, NodeId};
use uuid::Uuid;

/// Prefix of the markers left by direct-mode script extraction.
pub const SCRIPT_MARKER_PREFIX: &str = "DYNAMIC_HTML_SCRIPT:";

/// The `type` value that marks a module script.
pub const MODULE_MARKER: &str = "module";

/// Source of process-unique script ids.
pub trait IdGenerator {
    /// Return a fresh id, never returned before in this process.
    fn next_id(&mut self) -> String;
}

/// Random v4 UUIDs in their 36-character hyphenated form.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().hyphenated().to_string()
    }
}

/// Comment data of the marker for the script `id`.
#[must_use]
pub fn marker_payload(id: &str) -> String {
    format!("{SCRIPT_MARKER_PREFIX}{id}")
}

/// First comment under `root` (tree order) whose data contains the marker
/// payload of `id`.
#[must_use]
pub fn find_marker(dom: &DomTree, root: NodeId, id: &str) -> Option<NodeId> {
    let payload = marker_payload(id);
    dom.descendants(root)
        .find(|&node| dom.as_comment(node).is_some_and(|data| data.contains(&payload)))
}

/// Attribute value normalization applied to re-derived attributes: trim
/// only.
#[must_use]
pub fn normalize_attribute(value: &str) -> &str {
    value.trim()
}
