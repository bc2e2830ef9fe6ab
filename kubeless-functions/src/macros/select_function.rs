/// Given a list of functions, return the handler whose identifier matches the `FUNC_HANDLER`
/// environment variable.
///
/// Each function is adapted with [handler_fn](crate::handler_fn), so any signature it accepts
/// works here. The macro evaluates to a
/// `FunctionResult<Arc<dyn Handler>>`; an unknown name produces
/// [FunctionNotFound](kubeless_functions_host::Error::FunctionNotFound) listing the
/// functions that are available.
///
/// ```rust,no_run
/// use kubeless_functions::select_function;
/// use kubeless_functions_host::{FunctionResult, context::InvocationContext, event::Event};
///
/// fn say_hello(data: String, _context: &InvocationContext) -> String {
///     format!("Hello, {data}")
/// }
///
/// fn say_goodbye(event: Event, _context: &InvocationContext) -> FunctionResult<String> {
///     Ok(format!("Goodbye, {}", event.data))
/// }
///
/// // Expose say_hello and say_goodbye to kubeless
/// let handler = select_function!(say_hello, say_goodbye)?;
/// # Ok::<(), kubeless_functions_host::Error>(())
/// ```
#[macro_export]
macro_rules! select_function {
    ( $( $function:ident ),+ $(,)? ) => {
        $crate::select_function!(
            @environment $crate::host::environment::FunctionEnvironment::get();
            $( $function ),+
        )
    };

    ( @environment $environment:expr; $( $function:ident ),+ $(,)? ) => {
        {
            let mut registry = $crate::Registry::new();
            $(
                registry.register(stringify!($function), $crate::handler_fn($function));
            )+
            registry.select($environment)
        }
    };
}

#[cfg(test)]
mod tests {
    use kubeless_functions_host::{
        Error, FunctionResult, context::InvocationContext, environment::FunctionEnvironment,
        event::Event,
    };

    use crate::Handler;

    fn say_hello(data: String, _context: &InvocationContext) -> String {
        format!("Hello, {data}")
    }

    fn say_goodbye(event: Event, _context: &InvocationContext) -> FunctionResult<String> {
        Ok(format!("Goodbye, {}", event.data))
    }

    #[test]
    fn selects_by_identifier() {
        let environment = FunctionEnvironment::new("say_hello");
        let handler = crate::select_function!(@environment &environment; say_hello, say_goodbye)
            .expect("say_hello is registered");
        let context = InvocationContext::new(environment.clone());
        assert_eq!(
            handler.invoke(Event::new("kubeless"), &context).expect("infallible"),
            "Hello, kubeless"
        );
    }

    #[test]
    fn unknown_identifier_lists_every_function() {
        let environment = FunctionEnvironment::new("echo");
        let Err(error) = crate::select_function!(@environment &environment; say_hello, say_goodbye)
        else {
            panic!("echo is not registered");
        };
        assert_eq!(
            error.to_string(),
            "no function named echo available, available functions are: say_hello, say_goodbye"
        );
        assert!(matches!(error, Error::FunctionNotFound { .. }));
    }
}
