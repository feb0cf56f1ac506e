//! Rebuilding executable script elements from records.

use inlay_dom::{DomError, DomTree, NodeId};

use super::record::ScriptRecord;
use crate::markers::{MODULE_MARKER, normalize_attribute};
use crate::page::is_javascript_mime_type;

/// Attributes re-derived from the record's flags instead of copied.
const DERIVED_ATTRIBUTES: [&str; 4] = ["async", "defer", "type", "src"];

/// Create a detached `<script>` element equivalent to `record`.
///
/// Plain attributes are copied in order; `type`, `async`, `defer` and `src`
/// are set from the record's flags. A `type` that is neither `module` nor a
/// JavaScript MIME type marks a data block and is kept verbatim, so the
/// element stays inert. The element does nothing until it is inserted into
/// the page.
///
/// # Errors
///
/// Returns a [`DomError`] if the new element cannot be populated.
pub fn materialize(dom: &mut DomTree, record: &ScriptRecord) -> Result<NodeId, DomError> {
    let script = dom.create_element("script");

    for (name, value) in record.attributes.iter() {
        if !DERIVED_ATTRIBUTES.contains(&name) {
            dom.set_attribute(script, name, value)?;
        }
    }

    if record.is_module {
        dom.set_attribute(script, "type", MODULE_MARKER)?;
    } else if let Some(data_type) = data_block_type(record) {
        dom.set_attribute(script, "type", data_type)?;
    }
    if record.is_async {
        dom.set_attribute(script, "async", "")?;
    }
    if record.is_deferred {
        dom.set_attribute(script, "defer", "")?;
    }

    if record.has_external_source {
        let src = record.attributes.get("src").unwrap_or_default();
        dom.set_attribute(script, "src", normalize_attribute(src))?;
    } else if let Some(code) = &record.inline_code {
        dom.set_text_content(script, code)?;
    }

    Ok(script)
}

/// The source `type` when it names something other than JavaScript.
///
/// [§ 4.12.1.1 The script's type](https://html.spec.whatwg.org/multipage/scripting.html#concept-script-type)
/// "Otherwise ... the script's type is "data block"". An empty `type` means
/// a classic script.
fn data_block_type(record: &ScriptRecord) -> Option<&str> {
    let value = record.attributes.get("type")?;
    let trimmed = normalize_attribute(value);
    (!trimmed.is_empty() && !is_javascript_mime_type(trimmed)).then_some(value)
}
