//! Isolated rendering: markup goes into an isolation root and never runs.

use inlay_dom::NodeId;

use crate::error::EmbedError;
use crate::fonts::extract_font_faces;
use crate::page::PageHandle;
use crate::platform::Platform;

/// Replace the content of the isolation root `root` with `markup`.
///
/// The markup is parsed as a whole document, so `html`, `head` and `body`
/// exist even when the input lacks them, and its stylesheets stay inside
/// the root. `@font-face` rules are additionally hoisted into the page
/// head. Scripts are inserted as inert elements. Returns the number of
/// font-face rules hoisted.
///
/// # Errors
///
/// Returns [`EmbedError::Dom`] if `root` is not part of the page.
pub fn render_isolated(
    page: &PageHandle,
    platform: &dyn Platform,
    root: NodeId,
    markup: &str,
    font_block_id: &str,
) -> Result<usize, EmbedError> {
    let mut page = page.borrow_mut();
    let dom = page.dom_mut();
    dom.clear_children(root)?;

    let parsed = platform.parse_document(markup);
    let hoisted = extract_font_faces(&parsed, dom, font_block_id);

    if let Some(html) = parsed.document_element() {
        let imported = dom.import_node(&parsed, html)?;
        dom.append_child(root, imported)?;
    }
    Ok(hoisted)
}
