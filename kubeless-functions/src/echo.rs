use kubeless_functions_host::{FunctionResult, context::InvocationContext, event::Event};

/// Returns the given data.
///
/// The received event is logged once, through the invocation's sink, before returning.
pub fn echo(event: Event, context: &InvocationContext) -> FunctionResult<String> {
    context.log(log::Level::Info, format_args!("{event:?}"));
    Ok(event.data)
}
