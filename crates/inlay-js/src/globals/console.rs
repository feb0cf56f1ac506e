//! Console API implementation.
//!
//! [Console Standard](https://console.spec.whatwg.org/)
//!
//! Every console call becomes a `tracing` event on the `inlay::console`
//! target at the level matching the method, so script output lands in the
//! embedder's logs next to the renderer's own.

use boa_engine::{
    Context, JsResult, JsValue, NativeFunction, js_string, object::ObjectInitializer,
    property::Attribute,
};

/// The log level of a console method.
///
/// [§ 2.2 Printer](https://console.spec.whatwg.org/#printer)
/// "logLevel: the name of the method that was called"
#[derive(Debug, Clone, Copy)]
enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Register the console global object on the context.
///
/// [§ 1.1 Logging](https://console.spec.whatwg.org/#logging)
///
/// # Not Yet Implemented
///
/// [§ 1.2 Counting](https://console.spec.whatwg.org/#counting),
/// [§ 1.3 Grouping](https://console.spec.whatwg.org/#grouping),
/// [§ 1.4 Timing](https://console.spec.whatwg.org/#timing)
pub fn register_console(context: &mut Context) {
    let console = ObjectInitializer::new(context)
        .function(logger(LogLevel::Info), js_string!("log"), 0)
        .function(logger(LogLevel::Info), js_string!("info"), 0)
        .function(logger(LogLevel::Debug), js_string!("debug"), 0)
        .function(logger(LogLevel::Warn), js_string!("warn"), 0)
        .function(logger(LogLevel::Error), js_string!("error"), 0)
        .function(NativeFunction::from_copy_closure(console_assert), js_string!("assert"), 0)
        .build();

    context
        .register_global_property(js_string!("console"), console, Attribute::all())
        .expect("console global should not already exist");
}

/// A console method that performs "Logger(level, data)".
fn logger(level: LogLevel) -> NativeFunction {
    NativeFunction::from_copy_closure(move |_this, args, context| {
        print(level, args, context)?;
        Ok(JsValue::undefined())
    })
}

/// `console.assert(condition, ...data)`
///
/// [§ 1.1.1 assert](https://console.spec.whatwg.org/#assert)
///
/// STEP 1: "If condition is true, return."
/// STEP 2-5: prefix the message with "Assertion failed" and perform
/// Logger("assert", data).
fn console_assert(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let condition = args.first().is_some_and(JsValue::to_boolean);
    if !condition {
        let mut data = vec![JsValue::from(js_string!("Assertion failed:"))];
        data.extend(args.iter().skip(1).cloned());
        print(LogLevel::Error, &data, context)?;
    }
    Ok(JsValue::undefined())
}

/// [§ 2.2 Printer](https://console.spec.whatwg.org/#printer)
///
/// Arguments are converted with `ToString` and joined with spaces; format
/// specifiers are not interpreted.
fn print(level: LogLevel, args: &[JsValue], context: &mut Context) -> JsResult<()> {
    let mut parts = Vec::with_capacity(args.len());
    for arg in args {
        parts.push(arg.to_string(context)?.to_std_string_escaped());
    }
    let message = parts.join(" ");

    match level {
        LogLevel::Debug => tracing::debug!(target: "inlay::console", "{message}"),
        LogLevel::Info => tracing::info!(target: "inlay::console", "{message}"),
        LogLevel::Warn => tracing::warn!(target: "inlay::console", "{message}"),
        LogLevel::Error => tracing::error!(target: "inlay::console", "{message}"),
    }
    Ok(())
}
