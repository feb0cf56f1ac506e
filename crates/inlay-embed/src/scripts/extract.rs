//! Pulling scripts out of parsed markup.

use inlay_dom::{DomError, DomTree, NodeId};

use super::record::ScriptRecord;
use crate::markers::{IdGenerator, marker_payload};

/// Replace every `<script>` under `container` by a positional marker and
/// return the records of the removed scripts in document order.
///
/// `tree` is a detached copy of the markup; nothing outside it is touched.
/// Scripts inside `<template>` contents are inert and left alone.
///
/// # Errors
///
/// Returns a [`DomError`] if a script cannot be swapped for its marker,
/// which only happens when `container` is not part of `tree`.
pub fn extract_with_placeholders(
    tree: &mut DomTree,
    container: NodeId,
    ids: &mut dyn IdGenerator,
) -> Result<Vec<ScriptRecord>, DomError> {
    let scripts: Vec<NodeId> = tree
        .elements_by_tag_name(container, "script")
        .into_iter()
        .filter(|&script| !in_template(tree, script, container))
        .collect();

    let mut records = Vec::with_capacity(scripts.len());
    for script in scripts {
        let Some(element) = tree.as_element(script) else {
            continue;
        };
        let record = ScriptRecord::from_element(ids.next_id(), element, tree.text_content(script));

        let marker = tree.create_comment(marker_payload(&record.id));
        tree.replace_with(script, marker)?;
        records.push(record);
    }

    tracing::debug!(count = records.len(), "Extracted scripts");
    Ok(records)
}

fn in_template(tree: &DomTree, node: NodeId, container: NodeId) -> bool {
    tree.ancestors(node)
        .take_while(|&ancestor| ancestor != container)
        .any(|ancestor| tree.as_element(ancestor).is_some_and(|e| e.is("template")))
}
