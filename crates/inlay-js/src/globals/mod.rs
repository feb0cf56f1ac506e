//! JavaScript global objects.
//!
//! This module registers built-in global objects that are available to all
//! JavaScript code run by a page.
//!
//! # Implemented
//!
//! - `console` (`log`, `info`, `debug`, `warn`, `error`, `assert`) - [Console Standard](https://console.spec.whatwg.org/)
//! - `window`, `self` - [§ 7.2 The Window object](https://html.spec.whatwg.org/multipage/window-object.html)

mod console;

use boa_engine::{Context, js_string, property::Attribute};

/// Register all global objects on the context.
///
/// [§ 8.1.6.1 Realms and their counterparts](https://html.spec.whatwg.org/multipage/webappapis.html#realms-settings-objects-global-objects)
///
/// "A global object is a JavaScript object that is the global object for
/// a JavaScript realm."
///
/// This should be called once when creating a new `JsRuntime`.
pub fn register_globals(context: &mut Context) {
    console::register_console(context);
    register_window(context);
}

/// [§ 7.2.2 window](https://html.spec.whatwg.org/multipage/nav-history-apis.html#dom-window)
///
/// "The window, frames, and self getter steps are to return this's relevant
/// realm.\[\[GlobalEnv\]\].\[\[GlobalThisValue\]\]."
fn register_window(context: &mut Context) {
    let global = context.global_object();
    for name in [js_string!("window"), js_string!("self")] {
        context
            .register_global_property(name, global.clone(), Attribute::all())
            .expect("window aliases should not already exist");
    }
}
