//! Outcomes of read operations.
//!
//! Missing or deleted streams are expected outcomes, so the typed reads report
//! them as a status instead of an error.

use super::event::{EventInfo, Link};
use super::version::{ReadDirection, StreamPosition};

/// Status of a single-event read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventReadStatus {
    /// The event was found
    Success,
    /// The stream or event does not exist (`404`)
    NotFound,
    /// The stream was deleted (`410`)
    StreamDeleted,
}

/// Result of a single-event read. `event` is `Some` exactly when the status is `Success`.
#[derive(Debug, Clone, PartialEq)]
pub struct EventReadResult {
    /// Read status
    pub status: EventReadStatus,
    /// The event, on success
    pub event: Option<EventInfo>,
}

impl EventReadResult {
    /// A successful read.
    pub fn success(event: EventInfo) -> Self {
        EventReadResult {
            status: EventReadStatus::Success,
            event: Some(event),
        }
    }

    /// Nothing at the requested position.
    pub fn not_found() -> Self {
        EventReadResult {
            status: EventReadStatus::NotFound,
            event: None,
        }
    }

    /// The stream has been deleted.
    pub fn stream_deleted() -> Self {
        EventReadResult {
            status: EventReadStatus::StreamDeleted,
            event: None,
        }
    }

    /// Whether an event was returned.
    pub fn is_success(&self) -> bool {
        self.status == EventReadStatus::Success
    }
}

/// Status of a slice read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceReadStatus {
    /// Entries were decoded
    Success,
    /// The stream does not exist (`404`)
    StreamNotFound,
    /// The stream was deleted (`410`)
    StreamDeleted,
}

/// A page of events from a stream.
///
/// `events` is always oldest-first, whichever direction was requested.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamEventsSlice {
    /// Read status
    pub status: SliceReadStatus,
    /// Stream that was read
    pub stream: String,
    /// Requested start position
    pub from: StreamPosition,
    /// Requested direction
    pub direction: ReadDirection,
    /// Events in increasing event-number order
    pub events: Vec<EventInfo>,
    /// Whether the page reaches the head of the stream
    pub head_of_stream: bool,
    /// Feed links (`first`, `last`, `next`, `previous`, ...)
    pub links: Vec<Link>,
}

impl StreamEventsSlice {
    pub(crate) fn empty(
        status: SliceReadStatus,
        stream: &str,
        from: StreamPosition,
        direction: ReadDirection,
    ) -> Self {
        StreamEventsSlice {
            status,
            stream: stream.to_string(),
            from,
            direction,
            events: Vec::new(),
            head_of_stream: false,
            links: Vec::new(),
        }
    }

    /// URL of the feed link with the given relation.
    pub fn link(&self, relation: &str) -> Option<&str> {
        self.links
            .iter()
            .find(|l| l.relation == relation)
            .map(|l| l.uri.as_str())
    }

    /// Event number of the newest event on this page.
    pub fn last_event_number(&self) -> Option<u64> {
        self.events.last().map(|e| e.event_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_read_result_constructors() {
        assert!(EventReadResult::not_found().event.is_none());
        assert_eq!(
            EventReadResult::stream_deleted().status,
            EventReadStatus::StreamDeleted
        );
        assert!(!EventReadResult::not_found().is_success());
    }

    #[test]
    fn test_slice_link_lookup() {
        let mut slice = StreamEventsSlice::empty(
            SliceReadStatus::Success,
            "orders",
            StreamPosition::START,
            ReadDirection::Forward,
        );
        slice.links.push(Link {
            uri: "http://localhost:2113/streams/orders/20/forward/20".into(),
            relation: "previous".into(),
        });

        assert_eq!(
            slice.link("previous"),
            Some("http://localhost:2113/streams/orders/20/forward/20")
        );
        assert_eq!(slice.link("next"), None);
        assert_eq!(slice.last_event_number(), None);
    }
}
