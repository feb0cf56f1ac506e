//! Direct-mode script handling.
//!
//! [§ 4.12.1.1 Processing model](https://html.spec.whatwg.org/multipage/scripting.html#script-processing-model)
//!
//! Scripts inserted through `innerHTML`-like paths never run, so direct
//! rendering takes them out of the parsed markup ([`extract`]), inserts the
//! rest, and then puts a freshly created copy of each script back
//! ([`materialize`]) in the order a parser would have run them
//! ([`scheduler`]).

pub mod extract;
pub mod materialize;
pub mod record;
pub mod scheduler;

pub use extract::extract_with_placeholders;
pub use materialize::materialize;
pub use record::{ExecutionClass, ScriptRecord};
pub use scheduler::{BackgroundScripts, SchedulerOptions, ScriptScheduler};
