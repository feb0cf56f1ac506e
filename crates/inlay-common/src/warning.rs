//! Deduplicated warnings.
//!
//! Avoids spamming the same warning multiple times when a page repeatedly
//! hits a feature the renderer does not support (e.g. one warning per
//! unsupported script type, not one per script element).

use std::collections::HashSet;
use std::sync::Mutex;

/// Global set of warnings we've already emitted (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about an unsupported feature (emits once per unique message).
///
/// The warning goes through `tracing` so it lands wherever the embedding
/// application routes its logs.
///
/// # Example
/// ```ignore
/// warn_once("scripts", "unsupported script type 'text/babel'");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let should_emit = WARNED
        .lock()
        .map(|mut guard| guard.get_or_insert_with(HashSet::new).insert(key))
        // A poisoned set only loses deduplication, never the warning.
        .unwrap_or(true);

    if should_emit {
        tracing::warn!(component, "{message}");
    }
}
