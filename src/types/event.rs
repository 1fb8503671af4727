//! Event payloads going to and coming from the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// An event to append.
///
/// Serialized as one element of the `application/vnd.eventstore.events+json`
/// batch: `{"eventId", "eventType", "data", "metadata"}`. The id lets the store
/// detect a retried append of the same event.
///
/// # Examples
///
/// ```
/// use eventstore_http::NewEventData;
/// use serde_json::json;
///
/// let event = NewEventData::new("OrderPlaced", json!({"order": 17}))
///     .with_metadata(json!({"correlationId": "abc"}));
/// assert_eq!(event.event_type(), "OrderPlaced");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEventData {
    event_id: Uuid,
    event_type: String,
    data: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<Value>,
}

impl NewEventData {
    /// Create an event with a fresh v4 id.
    pub fn new(event_type: impl Into<String>, data: Value) -> Self {
        NewEventData {
            event_id: Uuid::new_v4(),
            event_type: event_type.into(),
            data,
            metadata: None,
        }
    }

    /// Create an event by serializing `data` to JSON.
    pub fn json<T: Serialize>(
        event_type: impl Into<String>,
        data: &T,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self::new(event_type, serde_json::to_value(data)?))
    }

    /// Replace the generated id, e.g. to make a retried append idempotent.
    pub fn with_id(mut self, event_id: Uuid) -> Self {
        self.event_id = event_id;
        self
    }

    /// Attach metadata.
    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Event id
    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    /// Event type tag
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// Event body
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Event metadata
    pub fn metadata(&self) -> Option<&Value> {
        self.metadata.as_ref()
    }
}

/// A link from an Atom entry or feed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Link {
    /// Absolute target URL
    pub uri: String,
    /// Relation, e.g. `edit`, `next`, `previous`
    pub relation: String,
}

/// An event as stored, read back from the store.
///
/// `data` and `metadata` are kept as raw JSON; depending on the event and the
/// representation requested they may be objects, strings or absent.
#[derive(Debug, Clone, PartialEq)]
pub struct EventInfo {
    /// Stream the event belongs to
    pub stream_id: String,
    /// Position in the stream
    pub event_number: u64,
    /// Id supplied when the event was appended
    pub event_id: Option<Uuid>,
    /// Type tag
    pub event_type: String,
    /// Raw event body
    pub data: Option<Value>,
    /// Raw event metadata
    pub metadata: Option<Value>,
    /// When the event was written
    pub updated: Option<DateTime<Utc>>,
    /// Atom title, `{number}@{stream}`
    pub title: String,
    /// Canonical event URL
    pub id: String,
    /// Atom summary (the event type on most nodes)
    pub summary: Option<String>,
    /// Links advertised for the event
    pub links: Vec<Link>,
}

impl EventInfo {
    /// Decode `data` into an application type.
    ///
    /// Returns `Ok(None)` if the event carries no body.
    pub fn data_as<T: serde::de::DeserializeOwned>(
        &self,
    ) -> Result<Option<T>, serde_json::Error> {
        self.data.clone().map(serde_json::from_value).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_event_wire_shape() {
        let id = Uuid::parse_str("fbf4a1a1-b4a3-4dfe-a01f-ec52c34e16e4").unwrap();
        let event = NewEventData::new("event-type", json!({"a": "1"})).with_id(id);

        let wire = serde_json::to_value(&event).unwrap();
        assert_eq!(
            wire,
            json!({
                "eventId": "fbf4a1a1-b4a3-4dfe-a01f-ec52c34e16e4",
                "eventType": "event-type",
                "data": {"a": "1"}
            })
        );
    }

    #[test]
    fn test_new_event_with_metadata() {
        let event = NewEventData::new("t", json!(1)).with_metadata(json!({"m": true}));
        let wire = serde_json::to_value(&event).unwrap();
        assert_eq!(wire["metadata"], json!({"m": true}));
    }

    #[test]
    fn test_new_event_ids_are_unique() {
        let a = NewEventData::new("t", json!(null));
        let b = NewEventData::new("t", json!(null));
        assert_ne!(a.event_id(), b.event_id());
    }

    #[test]
    fn test_json_constructor() {
        #[derive(Serialize)]
        struct Placed {
            order: u32,
        }

        let event = NewEventData::json("OrderPlaced", &Placed { order: 3 }).unwrap();
        assert_eq!(event.data(), &json!({"order": 3}));
        assert!(event.metadata().is_none());
    }

    #[test]
    fn test_data_as() {
        let info = EventInfo {
            stream_id: "s".into(),
            event_number: 0,
            event_id: None,
            event_type: "t".into(),
            data: Some(json!({"order": 3})),
            metadata: None,
            updated: None,
            title: "0@s".into(),
            id: "http://localhost:2113/streams/s/0".into(),
            summary: None,
            links: Vec::new(),
        };

        let value: Option<Value> = info.data_as().unwrap();
        assert_eq!(value, Some(json!({"order": 3})));
    }
}
