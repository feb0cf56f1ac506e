//! The live page: document tree plus the JavaScript realm that runs the
//! page's scripts.

use std::cell::RefCell;
use std::rc::Rc;

use inlay_common::resolve_url;
use inlay_common::warning::warn_once;
use inlay_dom::{DomError, DomTree, NodeId};
use inlay_js::JsRuntime;

use crate::markers::MODULE_MARKER;

/// Shared handle to a page. The page and its JS runtime are `!Send`; every
/// holder lives on the same thread.
pub type PageHandle = Rc<RefCell<Page>>;

/// [§ 4.12.1.1 The script's type](https://html.spec.whatwg.org/multipage/scripting.html#concept-script-type)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptKind {
    /// A classic script.
    Classic,
    /// A module script.
    Module,
}

/// What inserting a script element into the page started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptStart {
    /// Inline code ran during insertion.
    Executed,
    /// The script must be fetched from `url` and then evaluated.
    Fetch {
        /// Absolute URL of the script source.
        url: String,
        /// How to evaluate the fetched source.
        kind: ScriptKind,
    },
    /// The element is not a runnable script.
    Ignored,
}

/// A document and the JavaScript runtime bound to it.
pub struct Page {
    dom: DomTree,
    js: JsRuntime,
    base_url: Option<String>,
}

impl Page {
    /// A page holding the parsed `markup`. Relative script URLs resolve
    /// against `base_url`.
    #[must_use]
    pub fn from_html(markup: &str, base_url: Option<&str>) -> Self {
        Self {
            dom: inlay_html::parse_document(markup),
            js: JsRuntime::new(),
            base_url: base_url.map(str::to_owned),
        }
    }

    /// An empty `html`/`head`/`body` page.
    #[must_use]
    pub fn blank() -> Self {
        Self::from_html("", None)
    }

    /// Wrap the page in a shared handle.
    #[must_use]
    pub fn into_handle(self) -> PageHandle {
        Rc::new(RefCell::new(self))
    }

    /// The document tree.
    #[must_use]
    pub const fn dom(&self) -> &DomTree {
        &self.dom
    }

    /// The document tree, mutably. Plain tree mutation never runs scripts.
    pub const fn dom_mut(&mut self) -> &mut DomTree {
        &mut self.dom
    }

    /// The URL relative script sources resolve against.
    #[must_use]
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Evaluate `source` in the page realm and stringify the result.
    ///
    /// # Errors
    ///
    /// Returns the JavaScript error if evaluation throws.
    pub fn eval_to_string(&mut self, source: &str) -> Result<String, inlay_js::JsError> {
        self.js.eval_to_string(source)
    }

    /// Put the detached `script` element where `old` is and prepare it.
    ///
    /// [§ 4.12.1.1 Prepare the script element](https://html.spec.whatwg.org/multipage/scripting.html#prepare-the-script-element)
    ///
    /// This is the only path through which a page runs script: nodes added
    /// with plain tree mutation stay inert.
    ///
    /// # Errors
    ///
    /// Returns a [`DomError`] if `old` has no parent or either node is
    /// unknown.
    pub fn replace_with_script(&mut self, old: NodeId, script: NodeId) -> Result<ScriptStart, DomError> {
        self.dom.replace_with(old, script)?;
        Ok(self.prepare_script(script))
    }

    fn prepare_script(&mut self, script: NodeId) -> ScriptStart {
        // STEP 6: "If el is not connected, then return."
        if !self.dom.is_connected(script) {
            return ScriptStart::Ignored;
        }

        // STEP 8-12: determine the script's type.
        let Some(element) = self.dom.as_element(script) else {
            return ScriptStart::Ignored;
        };
        let kind = match element.attrs.get("type").map(str::trim) {
            None | Some("") => ScriptKind::Classic,
            Some(t) if is_javascript_mime_type(t) => ScriptKind::Classic,
            Some(t) if t.eq_ignore_ascii_case(MODULE_MARKER) => ScriptKind::Module,
            Some(other) => {
                warn_once("scripts", &format!("unsupported script type '{other}'"));
                return ScriptStart::Ignored;
            }
        };

        // STEP 20: "If el has a nomodule content attribute and its type is
        // "classic", then return."
        if kind == ScriptKind::Classic && element.attrs.contains_key("nomodule") {
            return ScriptStart::Ignored;
        }

        // STEP 31: "If el has a src content attribute..."
        if let Some(src) = element.attrs.get("src") {
            // STEP 31.2: "If src is the empty string, queue an element task
            // ... to fire an event named error at el, and return."
            let src = src.trim();
            if src.is_empty() {
                tracing::warn!("Script has an empty src attribute");
                return ScriptStart::Ignored;
            }
            let url = resolve_url(src, self.base_url.as_deref());
            return ScriptStart::Fetch { url, kind };
        }

        // STEP 32: "If el does not have a src content attribute..."
        let source = self.dom.text_content(script);
        self.evaluate(kind, &source, "inline");
        ScriptStart::Executed
    }

    /// Run `source` as a script of `kind`. Errors are logged, not returned:
    /// a failing script still counts as having run.
    pub fn evaluate(&mut self, kind: ScriptKind, source: &str, origin: &str) {
        let result = match kind {
            ScriptKind::Classic => self.js.execute(source).map(drop),
            ScriptKind::Module => self.js.execute_module(source),
        };
        if let Err(e) = result {
            tracing::warn!(origin, error = %e, "Script failed");
        }
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("nodes", &self.dom.len())
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// [MIME Sniffing § 4.6 JavaScript MIME type](https://mimesniff.spec.whatwg.org/#javascript-mime-type)
pub(crate) fn is_javascript_mime_type(value: &str) -> bool {
    const ESSENCES: [&str; 16] = [
        "application/ecmascript",
        "application/javascript",
        "application/x-ecmascript",
        "application/x-javascript",
        "text/ecmascript",
        "text/javascript",
        "text/javascript1.0",
        "text/javascript1.1",
        "text/javascript1.2",
        "text/javascript1.3",
        "text/javascript1.4",
        "text/javascript1.5",
        "text/jscript",
        "text/livescript",
        "text/x-ecmascript",
        "text/x-javascript",
    ];
    ESSENCES.iter().any(|essence| value.eq_ignore_ascii_case(essence))
}
