use std::marker::PhantomData;

use kubeless_functions_host::{
    FunctionResult, context::InvocationContext, encoding::Extract, event::Event,
};

use crate::IntoFunctionResult;

/// A function callable from kubeless.
///
/// The runtime calls [Handler::invoke] once per event, possibly from many threads at once.
/// Implementations must not keep the event or the context past the call.
pub trait Handler: Send + Sync {
    /// Turns one event into a result string or an error.
    fn invoke(&self, event: Event, context: &InvocationContext) -> FunctionResult<String>;
}

impl<H: Handler + ?Sized> Handler for Box<H> {
    fn invoke(&self, event: Event, context: &InvocationContext) -> FunctionResult<String> {
        (**self).invoke(event, context)
    }
}

impl<H: Handler + ?Sized> Handler for std::sync::Arc<H> {
    fn invoke(&self, event: Event, context: &InvocationContext) -> FunctionResult<String> {
        (**self).invoke(event, context)
    }
}

/// A plain function adapted into a [Handler]. See [handler_fn].
pub struct HandlerFn<TExtract, TResponse> {
    function: fn(TExtract, &InvocationContext) -> TResponse,
    _types: PhantomData<fn(TExtract) -> TResponse>,
}

/// Adapts a function into a [Handler].
///
/// The function's first argument can be anything implementing [Extract]: the whole [Event],
/// its data as a [String], or [Json](kubeless_functions_host::encoding::Json) parsed from the
/// data. If extraction fails, the function is not called and the host receives a
/// [DecodeError](kubeless_functions_host::Error::DecodeError).
///
/// The return value can be anything implementing [IntoFunctionResult].
///
/// ```rust
/// use kubeless_functions::{Handler, handler_fn};
/// use kubeless_functions_host::{
///     FunctionResult, context::InvocationContext, encoding::Json,
///     environment::FunctionEnvironment, event::Event,
/// };
///
/// #[derive(serde::Deserialize)]
/// struct Request {
///     name: String,
/// }
///
/// fn greet(Json(request): Json<Request>, _context: &InvocationContext) -> FunctionResult<String> {
///     Ok(format!("Hello, {}!", request.name))
/// }
///
/// let handler = handler_fn(greet);
/// let context = InvocationContext::new(FunctionEnvironment::new("greet"));
/// let result = handler.invoke(Event::new(r#"{"name": "kubeless"}"#), &context);
/// assert_eq!(result.unwrap(), "Hello, kubeless!");
/// ```
pub fn handler_fn<TExtract, TResponse>(
    function: fn(TExtract, &InvocationContext) -> TResponse,
) -> HandlerFn<TExtract, TResponse>
where
    TExtract: Extract,
    TResponse: IntoFunctionResult,
{
    HandlerFn {
        function,
        _types: PhantomData,
    }
}

impl<TExtract, TResponse> Handler for HandlerFn<TExtract, TResponse>
where
    TExtract: Extract,
    TResponse: IntoFunctionResult,
{
    fn invoke(&self, event: Event, context: &InvocationContext) -> FunctionResult<String> {
        invoke_template(event, context, self.function)
    }
}

/// An internal helper for [handler_fn] and the [select_function!](crate::select_function) macro.
#[doc(hidden)]
pub fn invoke_template<TExtract, TResponse>(
    event: Event,
    context: &InvocationContext,
    handler: fn(TExtract, &InvocationContext) -> TResponse,
) -> FunctionResult<String>
where
    TExtract: Extract,
    TResponse: IntoFunctionResult,
{
    let request = TExtract::extract(event)?;
    handler(request, context).into_result()
}
