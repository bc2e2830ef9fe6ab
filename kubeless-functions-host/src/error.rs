//! Common host interfaces types

/// An alias for Result<T, Error> for convenience.
pub type FunctionResult<T> = std::result::Result<T, Error>;

/// An error during the execution of a Function.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The event could not be turned into the type the handler asked for.
    #[error("failed to decode event: {0}")]
    DecodeError(String),

    /// The handler's return value could not be turned into a result string.
    #[error("failed to encode result: {0}")]
    EncodeError(String),

    /// `FUNC_HANDLER` names a function that was never registered.
    #[error("no function named {requested} available, available functions are: {available}")]
    FunctionNotFound {
        /// The requested function name.
        requested: String,
        /// Comma separated list of the registered names.
        available: String,
    },

    /// No function name was provided to select a handler with.
    #[error("the FUNC_HANDLER environment variable must be provided")]
    HandlerNotConfigured,

    /// The handler panicked. The message is the panic payload, when it was a string.
    #[error("function panicked: {0}")]
    Panicked(String),

    /// A catch-all error with a message.
    #[error("{0}")]
    MessageError(String),
}

impl From<String> for Error {
    fn from(message: String) -> Self {
        Error::MessageError(message)
    }
}

impl From<&str> for Error {
    fn from(message: &str) -> Self {
        Error::MessageError(message.to_string())
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for Error {
    fn from(e: Box<dyn std::error::Error + Send + Sync>) -> Self {
        Error::MessageError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_not_found_lists_available_functions() {
        let error = Error::FunctionNotFound {
            requested: "greet".to_string(),
            available: "echo, say_hello".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "no function named greet available, available functions are: echo, say_hello"
        );
    }

    #[test]
    fn boxed_errors_become_messages() {
        let boxed: Box<dyn std::error::Error + Send + Sync> = "disk on fire".into();
        let error: Error = boxed.into();
        assert!(matches!(error, Error::MessageError(ref m) if m == "disk on fire"));
    }
}
