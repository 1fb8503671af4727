//! Atom-over-JSON representations returned by the store.
//!
//! Two shapes are decoded:
//!
//! - A single **entry**, returned for an event URL with
//!   `Accept: application/vnd.eventstore.atom+json`. The event itself sits under
//!   `content`.
//! - A **feed**, returned for a slice URL. With `?embed=rich` every entry carries
//!   its event fields inline. Entries are always listed newest-first.

use crate::types::{EventInfo, Link};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

/// A single event rendered as an Atom entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtomEntry {
    #[serde(default)]
    title: String,
    #[serde(default)]
    id: String,
    #[serde(default)]
    updated: Option<DateTime<Utc>>,
    #[serde(default)]
    summary: Option<String>,
    content: EntryContent,
    #[serde(default)]
    links: Vec<Link>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EntryContent {
    event_stream_id: String,
    event_number: u64,
    event_type: String,
    #[serde(default)]
    event_id: Option<Uuid>,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    metadata: Option<Value>,
}

impl From<AtomEntry> for EventInfo {
    fn from(entry: AtomEntry) -> Self {
        EventInfo {
            stream_id: entry.content.event_stream_id,
            event_number: entry.content.event_number,
            event_id: entry.content.event_id,
            event_type: entry.content.event_type,
            data: entry.content.data,
            metadata: entry.content.metadata,
            updated: entry.updated,
            title: entry.title,
            id: entry.id,
            summary: entry.summary,
            links: entry.links,
        }
    }
}

/// A page of a stream's feed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtomFeed {
    #[serde(default)]
    pub(crate) head_of_stream: bool,
    #[serde(default)]
    pub(crate) links: Vec<Link>,
    #[serde(default)]
    pub(crate) entries: Vec<FeedEntry>,
}

/// One entry of a feed page embedded with `rich`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedEntry {
    #[serde(default)]
    title: String,
    #[serde(default)]
    id: String,
    #[serde(default)]
    updated: Option<DateTime<Utc>>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    links: Vec<Link>,
    event_type: String,
    event_number: u64,
    stream_id: String,
    #[serde(default)]
    event_id: Option<Uuid>,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default, alias = "metaData")]
    metadata: Option<Value>,
}

impl From<FeedEntry> for EventInfo {
    fn from(entry: FeedEntry) -> Self {
        EventInfo {
            stream_id: entry.stream_id,
            event_number: entry.event_number,
            event_id: entry.event_id,
            event_type: entry.event_type,
            data: entry.data,
            metadata: entry.metadata,
            updated: entry.updated,
            title: entry.title,
            id: entry.id,
            summary: entry.summary,
            links: entry.links,
        }
    }
}

/// Decode a single-event body.
pub fn decode_entry(body: &[u8]) -> Result<EventInfo, serde_json::Error> {
    serde_json::from_slice::<AtomEntry>(body).map(EventInfo::from)
}

/// Decode a feed page.
pub fn decode_feed(body: &[u8]) -> Result<AtomFeed, serde_json::Error> {
    serde_json::from_slice(body)
}

impl AtomFeed {
    /// Entries converted to events, oldest-first.
    ///
    /// The store lists entries newest-first for both directions, so the decoded
    /// order is reversed.
    pub fn into_events(self) -> Vec<EventInfo> {
        self.entries.into_iter().rev().map(EventInfo::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rich_entry(number: u64) -> Value {
        json!({
            "eventId": "fbf4a1a1-b4a3-4dfe-a01f-ec52c34e16e4",
            "eventType": "event-type",
            "eventNumber": number,
            "streamId": "newstream",
            "isJson": true,
            "isMetaData": false,
            "isLinkMetaData": false,
            "positionEventNumber": number,
            "positionStreamId": "newstream",
            "title": format!("{}@newstream", number),
            "id": format!("http://127.0.0.1:2113/streams/newstream/{}", number),
            "updated": "2015-03-13T12:13:42.492473Z",
            "author": {"name": "EventStore"},
            "summary": "event-type",
            "links": [{
                "uri": format!("http://127.0.0.1:2113/streams/newstream/{}", number),
                "relation": "edit"
            }]
        })
    }

    #[test]
    fn test_decode_entry() {
        let body = json!({
            "title": "0@newstream",
            "id": "http://127.0.0.1:2113/streams/newstream/0",
            "updated": "2015-03-13T12:13:42.492473Z",
            "author": {"name": "EventStore"},
            "summary": "SomeEvent",
            "content": {
                "eventStreamId": "newstream",
                "eventNumber": 0,
                "eventType": "SomeEvent",
                "eventId": "fbf4a1a1-b4a3-4dfe-a01f-ec52c34e16e4",
                "data": {"a": "1"},
                "metadata": ""
            },
            "links": [
                {"uri": "http://127.0.0.1:2113/streams/newstream/0", "relation": "edit"}
            ]
        });

        let event = decode_entry(body.to_string().as_bytes()).unwrap();
        assert_eq!(event.stream_id, "newstream");
        assert_eq!(event.event_number, 0);
        assert_eq!(event.event_type, "SomeEvent");
        assert_eq!(event.data, Some(json!({"a": "1"})));
        assert_eq!(event.metadata, Some(json!("")));
        assert_eq!(event.title, "0@newstream");
        assert_eq!(event.links[0].relation, "edit");
        assert!(event.updated.is_some());
        assert!(event.event_id.is_some());
    }

    #[test]
    fn test_decode_entry_missing_content() {
        let body = br#"{"title": "0@s", "id": "x"}"#;
        assert!(decode_entry(body).is_err());
    }

    #[test]
    fn test_feed_reverses_entries() {
        let body = json!({
            "title": "Event stream 'newstream'",
            "streamId": "newstream",
            "headOfStream": true,
            "links": [{"uri": "http://127.0.0.1:2113/streams/newstream", "relation": "self"}],
            "entries": [rich_entry(2), rich_entry(1), rich_entry(0)]
        });

        let feed = decode_feed(body.to_string().as_bytes()).unwrap();
        assert!(feed.head_of_stream);
        let numbers: Vec<u64> = feed.into_events().iter().map(|e| e.event_number).collect();
        assert_eq!(numbers, vec![0, 1, 2]);
    }

    #[test]
    fn test_feed_entry_metadata_alias() {
        let mut entry = rich_entry(4);
        entry["data"] = json!("{\"a\":1}");
        entry["metaData"] = json!("{\"m\":2}");

        let feed = decode_feed(json!({"entries": [entry]}).to_string().as_bytes()).unwrap();
        let events = feed.into_events();
        assert_eq!(events[0].metadata, Some(json!("{\"m\":2}")));
        assert_eq!(events[0].data, Some(json!("{\"a\":1}")));
    }

    #[test]
    fn test_empty_feed() {
        let feed = decode_feed(br#"{"headOfStream": false}"#).unwrap();
        assert!(!feed.head_of_stream);
        assert!(feed.into_events().is_empty());
    }
}
