//! JavaScript engine integration for the inlay renderer.
//!
//! Uses [Boa](https://boajs.dev/) as the JavaScript engine.
//!
//! # Example
//!
//! ```ignore
//! use inlay_js::JsRuntime;
//!
//! let mut runtime = JsRuntime::new();
//! runtime.execute("console.log('Hello from JS!');").unwrap();
//! ```
//!
//! # Implemented
//!
//! - Classic script execution via `JsRuntime::execute()`
//! - Module script execution via `JsRuntime::execute_module()`
//! - `console.log()`, `console.info()`, `console.debug()`, `console.warn()`,
//!   `console.error()`, `console.assert()`
//! - `window` / `self` aliases of the global object
//!
//! # Not Yet Implemented
//!
//! [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#interface-document)
//! - A `document` global bound to the page tree
//!
//! [§ 8.6 Timers](https://html.spec.whatwg.org/multipage/timers-and-user-prompts.html#timers)
//! - `setTimeout()` / `setInterval()`
//!
//! [§ 8.1.5.5 Module resolution](https://html.spec.whatwg.org/multipage/webappapis.html#resolve-a-module-specifier)
//! - `import` of other modules: modules are evaluated standalone

mod globals;

use boa_engine::builtins::promise::PromiseState;
use boa_engine::{Context, Module, Source};

pub use boa_engine::{JsError, JsValue};

/// JavaScript runtime for a page.
///
/// [§ 8.1.6 JavaScript execution context](https://html.spec.whatwg.org/multipage/webappapis.html)
///
/// Each page has one runtime with its own global object, shared by every
/// script the page runs. Globals a script defines are visible to the
/// scripts that run after it.
pub struct JsRuntime {
    /// The Boa JavaScript context.
    context: Context,
}

impl JsRuntime {
    /// Create a new JavaScript runtime with global objects registered.
    ///
    /// This initializes the Boa context and registers built-in globals
    /// like `console`.
    #[must_use]
    pub fn new() -> Self {
        let mut context = Context::default();
        globals::register_globals(&mut context);
        Self { context }
    }

    /// Execute classic script source code.
    ///
    /// [§ 8.1.4.4 Run a classic script](https://html.spec.whatwg.org/multipage/webappapis.html#run-a-classic-script)
    ///
    /// Promise jobs queued by the script are drained before returning, so
    /// the script's microtasks have run by the time the caller continues.
    ///
    /// # Errors
    ///
    /// Returns `JsError` if the JavaScript code contains syntax errors or
    /// throws an uncaught exception.
    pub fn execute(&mut self, source: &str) -> Result<JsValue, JsError> {
        let result = self.context.eval(Source::from_bytes(source));
        self.context.run_jobs();
        result
    }

    /// Execute module script source code.
    ///
    /// [§ 8.1.4.5 Run a module script](https://html.spec.whatwg.org/multipage/webappapis.html#run-a-module-script)
    ///
    /// The module is parsed, linked and evaluated; its jobs are drained
    /// before returning.
    ///
    /// # Errors
    ///
    /// Returns `JsError` if the module fails to parse, fails to link (an
    /// `import` that cannot be loaded) or throws during evaluation.
    pub fn execute_module(&mut self, source: &str) -> Result<(), JsError> {
        let module = Module::parse(Source::from_bytes(source), None, &mut self.context)?;
        let evaluation = module.load_link_evaluate(&mut self.context);
        self.context.run_jobs();

        // A top-level await that never settles leaves the promise pending;
        // that is not a failure.
        match evaluation.state() {
            PromiseState::Rejected(reason) => Err(JsError::from_opaque(reason)),
            PromiseState::Fulfilled(_) | PromiseState::Pending => Ok(()),
        }
    }

    /// Evaluate an expression and convert the result to a string.
    ///
    /// # Errors
    ///
    /// Returns `JsError` if evaluation throws or the value cannot be
    /// converted with `ToString`.
    pub fn eval_to_string(&mut self, source: &str) -> Result<String, JsError> {
        let value = self.execute(source)?;
        Ok(value.to_string(&mut self.context)?.to_std_string_escaped())
    }
}

impl Default for JsRuntime {
    fn default() -> Self {
        Self::new()
    }
}
