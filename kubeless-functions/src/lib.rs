//! Support crate for kubeless Functions
//!
//! A Function is a plain Rust function that receives an [Event](kubeless_functions_host::event::Event)
//! and an [InvocationContext](kubeless_functions_host::context::InvocationContext) and returns a
//! result string or an error. This crate turns such functions into [Handler]s, picks the one the
//! runtime asked for with [select_function!], and calls it through [invoke].
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use kubeless_functions::{echo, handler_fn, invoke};
//! use kubeless_functions_host::{
//!     context::InvocationContext, environment::FunctionEnvironment, event::Event,
//!     logging::MemorySink,
//! };
//!
//! let sink = Arc::new(MemorySink::new());
//! let context = InvocationContext::new(FunctionEnvironment::new("echo")).with_logger(sink.clone());
//!
//! let result = invoke(&handler_fn(echo), Event::new("hello"), &context);
//! assert_eq!(result.unwrap(), "hello");
//! assert_eq!(sink.records().len(), 1);
//! ```
//!
//! You are likely to be interested in the sibling crates:
//! * `kubeless-functions-host`: Events, invocation contexts and log sinks.
//! * `kubeless-functions-log`: Standard `log` adapter.

mod echo;
mod handler;
mod into_result;
mod invoke;
mod macros;
mod registry;

/// Re-exported for use by the [select_function!] macro.
#[doc(hidden)]
pub use kubeless_functions_host as host;

pub use echo::echo;
pub use handler::{Handler, HandlerFn, handler_fn, invoke_template};
pub use into_result::IntoFunctionResult;
pub use invoke::invoke;
pub use registry::Registry;
