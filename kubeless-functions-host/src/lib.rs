#![deny(missing_docs)]

//! Host interface tools for kubeless Functions
//!
//! This crate holds the values a kubeless runtime hands to a Function: the [Event](event::Event),
//! the [InvocationContext](context::InvocationContext) and the deployment's
//! [FunctionEnvironment](environment::FunctionEnvironment), plus the log sinks a Function
//! writes its diagnostics to.
//!
//! You are likely to be interested in the sibling crates:
//! * `kubeless-functions`: The handler contract, handler selection and the invoke entry point.
//! * `kubeless-functions-log`: Standard `log` adapter.

pub mod context;
pub mod encoding;
pub mod environment;
mod error;
pub mod event;
pub mod logging;

pub use error::{Error, FunctionResult};
