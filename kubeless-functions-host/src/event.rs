//! The unit of inbound work delivered to a Function.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Metadata key carrying the event identifier.
pub const EVENT_ID: &str = "event-id";
/// Metadata key carrying the event type.
pub const EVENT_TYPE: &str = "event-type";
/// Metadata key carrying the time the event was produced.
pub const EVENT_TIME: &str = "event-time";
/// Metadata key carrying the namespace the event was produced in.
pub const EVENT_NAMESPACE: &str = "event-namespace";

/// Contains the data passed to the Function and whatever else the host attached to it.
///
/// Only `data` is required. Every other field the host sends lands in the metadata map
/// untouched, so a Function never has to know the full shape of the host's events.
///
/// ```rust
/// use kubeless_functions_host::event::Event;
///
/// let event: Event = serde_json::from_str(
///     r#"{"data": "hello", "event-id": "1f3c", "retries": 2}"#,
/// ).unwrap();
/// assert_eq!(event.data, "hello");
/// assert_eq!(event.event_id(), Some("1f3c"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// The request body. Opaque to the host SDK.
    #[serde(alias = "Data")]
    pub data: String,

    /// Host-defined fields other than `data`.
    #[serde(flatten)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl Event {
    /// Creates an event without metadata.
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Attaches a metadata field to the event.
    pub fn with_metadata(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Looks up a string metadata field. Non-string values are treated as absent.
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(serde_json::Value::as_str)
    }

    /// The `event-id` metadata field.
    pub fn event_id(&self) -> Option<&str> {
        self.metadata_str(EVENT_ID)
    }

    /// The `event-type` metadata field.
    pub fn event_type(&self) -> Option<&str> {
        self.metadata_str(EVENT_TYPE)
    }

    /// The `event-time` metadata field.
    pub fn event_time(&self) -> Option<&str> {
        self.metadata_str(EVENT_TIME)
    }

    /// The `event-namespace` metadata field.
    pub fn event_namespace(&self) -> Option<&str> {
        self.metadata_str(EVENT_NAMESPACE)
    }
}
