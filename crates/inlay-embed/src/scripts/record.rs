//! What is kept of a script between extraction and execution.

use inlay_dom::{AttributesMap, ElementData};

use super::scheduler::SchedulerOptions;
use crate::markers::{MODULE_MARKER, normalize_attribute};

/// One script element found in the source markup.
///
/// Read-only once built; the scheduler consumes each record exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRecord {
    /// Correlates the record with its positional marker.
    pub id: String,
    /// Every attribute of the source element, verbatim and in order.
    pub attributes: AttributesMap,
    /// The script text, when there is no `src`.
    pub inline_code: Option<String>,
    /// Whether the element had a `src` attribute.
    pub has_external_source: bool,
    /// The `async` attribute was present.
    pub is_async: bool,
    /// The `defer` attribute was present.
    pub is_deferred: bool,
    /// `type` was `module` (trimmed, any case).
    pub is_module: bool,
}

impl ScriptRecord {
    /// Build the record of a `<script>` element whose text content is `text`.
    #[must_use]
    pub fn from_element(id: String, element: &ElementData, text: String) -> Self {
        let attrs = &element.attrs;
        let has_external_source = attrs.contains_key("src");
        Self {
            id,
            attributes: attrs.clone(),
            inline_code: (!has_external_source).then_some(text),
            has_external_source,
            is_async: attrs.contains_key("async"),
            is_deferred: attrs.contains_key("defer"),
            is_module: attrs
                .get("type")
                .is_some_and(|t| normalize_attribute(t).eq_ignore_ascii_case(MODULE_MARKER)),
        }
    }

    /// The `src` value, trimmed.
    #[must_use]
    pub fn src(&self) -> Option<&str> {
        self.attributes.get("src").map(normalize_attribute)
    }
}

/// When a script runs relative to the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionClass {
    /// Runs in document order, blocking the scripts after it.
    Sequential,
    /// Runs as soon as it is ready; nothing waits for it.
    Async,
    /// Runs in document order once the tree has settled.
    Deferred,
}

impl ExecutionClass {
    /// [§ 4.12.1.1 prepare the script element](https://html.spec.whatwg.org/multipage/scripting.html#prepare-the-script-element)
    ///
    /// `async` wins over `defer`, as it does for parser-inserted scripts.
    /// Module scripts are deferred unless marked `async` when
    /// `modules_defer_by_default` is set.
    #[must_use]
    pub const fn of(record: &ScriptRecord, options: SchedulerOptions) -> Self {
        if record.is_async {
            Self::Async
        } else if record.is_deferred || (record.is_module && options.modules_defer_by_default) {
            Self::Deferred
        } else {
            Self::Sequential
        }
    }
}
