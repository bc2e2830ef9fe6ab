use kubeless_functions_host::{
    Error, FunctionResult,
    encoding::{Encode, Json},
};
use serde::Serialize;

/// Values returned by a function adapted with [crate::handler_fn] must implement this trait.
///
/// Implementations are provided for
/// - [String] and [&str]: The result is the string.
/// - [()] and `Option<String>::None`: The result is empty.
/// - [serde_json::Value] and [Json]: The result is the serialized JSON.
/// - `Result<impl IntoFunctionResult, E>`: Errors are converted into [Error] and returned to the host.
pub trait IntoFunctionResult {
    fn into_result(self) -> FunctionResult<String>;
}

impl IntoFunctionResult for String {
    fn into_result(self) -> FunctionResult<String> {
        self.try_serialize()
    }
}

impl IntoFunctionResult for &str {
    fn into_result(self) -> FunctionResult<String> {
        self.try_serialize()
    }
}

impl IntoFunctionResult for () {
    fn into_result(self) -> FunctionResult<String> {
        self.try_serialize()
    }
}

impl IntoFunctionResult for Option<String> {
    fn into_result(self) -> FunctionResult<String> {
        self.try_serialize()
    }
}

impl IntoFunctionResult for serde_json::Value {
    fn into_result(self) -> FunctionResult<String> {
        self.try_serialize()
    }
}

impl<T: Serialize> IntoFunctionResult for Json<T> {
    fn into_result(self) -> FunctionResult<String> {
        self.try_serialize()
    }
}

impl<R, E> IntoFunctionResult for Result<R, E>
where
    R: IntoFunctionResult,
    E: Into<Error>,
{
    fn into_result(self) -> FunctionResult<String> {
        match self {
            Ok(r) => r.into_result(),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strings_pass_through() {
        assert_eq!("pong".into_result().expect("infallible"), "pong");
        assert_eq!(String::from("pong").into_result().expect("infallible"), "pong");
    }

    #[test]
    fn json_values_are_serialized() {
        let value = serde_json::json!({"message": "Hello, kubeless!"});
        assert_eq!(
            value.into_result().expect("values serialize"),
            r#"{"message":"Hello, kubeless!"}"#
        );
    }

    #[test]
    fn errors_are_returned_to_the_host() {
        let failed: Result<String, &str> = Err("out of coffee");
        assert!(matches!(
            failed.into_result(),
            Err(Error::MessageError(ref m)) if m == "out of coffee"
        ));
    }

    #[test]
    fn nested_results_keep_the_inner_value() {
        let ok: FunctionResult<Json<Vec<u8>>> = Ok(Json(vec![1, 2, 3]));
        assert_eq!(ok.into_result().expect("vectors serialize"), "[1,2,3]");
    }
}
