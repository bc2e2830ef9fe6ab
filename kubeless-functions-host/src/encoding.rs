//! Decoding events into handler inputs and encoding handler outputs into result strings

use crate::{Error, FunctionResult, event::Event};

/// A value which can be converted to a Function result string
pub trait Encode {
    /// Convert the value to the result string
    fn try_serialize(self) -> FunctionResult<String>;
}

impl Encode for String {
    fn try_serialize(self) -> FunctionResult<String> {
        Ok(self)
    }
}
impl Encode for &str {
    fn try_serialize(self) -> FunctionResult<String> {
        Ok(self.to_string())
    }
}
impl Encode for Option<String> {
    fn try_serialize(self) -> FunctionResult<String> {
        Ok(self.unwrap_or_default())
    }
}
impl Encode for () {
    fn try_serialize(self) -> FunctionResult<String> {
        Ok(String::new())
    }
}
impl Encode for serde_json::Value {
    fn try_serialize(self) -> FunctionResult<String> {
        serde_json::to_string(&self)
            .map_err(|e| Error::EncodeError(format!("failed to serialize json: {e}")))
    }
}

/// Event extractor for handler inputs
pub trait Extract: Sized {
    /// Convert from an event to a value
    fn extract(event: Event) -> FunctionResult<Self>;
}

impl Extract for Event {
    fn extract(event: Event) -> FunctionResult<Self> {
        Ok(event)
    }
}

impl Extract for String {
    fn extract(event: Event) -> FunctionResult<Self> {
        Ok(event.data)
    }
}

/// JSON encoding and decoding
///
/// As an input, the event data is parsed as JSON. As an output, the value is serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Json<T>(pub T);

impl<T: serde::de::DeserializeOwned> Extract for Json<T> {
    fn extract(event: Event) -> FunctionResult<Self> {
        Ok(Json(serde_json::from_str(&event.data).map_err(|e| {
            Error::DecodeError(format!("failed to deserialize json: {e}"))
        })?))
    }
}
impl<T: serde::Serialize> Encode for Json<T> {
    fn try_serialize(self) -> FunctionResult<String> {
        serde_json::to_string(&self.0)
            .map_err(|e| Error::EncodeError(format!("failed to serialize json: {e}")))
    }
}
