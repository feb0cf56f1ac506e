//! Direct rendering: markup goes into the page and its scripts run.

use inlay_dom::NodeId;
use inlay_html::ParsedFragment;

use crate::error::EmbedError;
use crate::markers::UuidIds;
use crate::page::PageHandle;
use crate::platform::Platform;
use crate::scripts::{ScriptScheduler, extract_with_placeholders};

/// Replace the content of `target` with `markup` and run its scripts.
///
/// The markup is parsed into a detached fragment, every script is swapped
/// for a marker, the fragment is inserted in one batch and the scheduler
/// then puts live scripts back in place. Resolves when the sequential and
/// deferred scripts are done; returns how many scripts were found.
///
/// # Errors
///
/// Returns [`EmbedError::Dom`] if `target` is not part of the page.
pub async fn render_direct(
    page: &PageHandle,
    platform: &dyn Platform,
    scheduler: &ScriptScheduler,
    target: NodeId,
    markup: &str,
) -> Result<usize, EmbedError> {
    let ParsedFragment { mut tree, root } = platform.parse_fragment(markup);
    let records = extract_with_placeholders(&mut tree, root, &mut UuidIds)?;

    {
        let mut page = page.borrow_mut();
        let dom = page.dom_mut();
        dom.clear_children(target)?;
        let imported = dom.import_node(&tree, root)?;
        dom.append_child(target, imported)?;
    }

    let found = records.len();
    scheduler.run(target, records).await;
    Ok(found)
}
