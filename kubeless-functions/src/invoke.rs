use std::{
    any::Any,
    panic::{AssertUnwindSafe, catch_unwind},
    time::Instant,
};

use kubeless_functions_host::{
    Error, FunctionResult, context::InvocationContext, event::Event,
};

use crate::Handler;

/// Calls `handler` once for `event`.
///
/// A panic inside the handler is reported as [Error::Panicked] instead of unwinding into the
/// runtime. The deadline on the context is not enforced; a call that overruns it is only logged.
pub fn invoke(
    handler: &dyn Handler,
    event: Event,
    context: &InvocationContext,
) -> FunctionResult<String> {
    let started = Instant::now();
    let result = catch_unwind(AssertUnwindSafe(|| handler.invoke(event, context)))
        .unwrap_or_else(|payload| Err(Error::Panicked(panic_message(payload))));

    log::debug!(
        "{} finished in {:?}",
        context.function_name(),
        started.elapsed()
    );
    if Instant::now() > context.deadline() {
        log::warn!(
            "{} returned after its deadline of {:?}",
            context.function_name(),
            context.environment().timeout()
        );
    }
    result
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    match payload.downcast::<String>() {
        Ok(message) => *message,
        Err(payload) => match payload.downcast::<&'static str>() {
            Ok(message) => message.to_string(),
            Err(_) => "<non-string panic payload>".to_string(),
        },
    }
}
