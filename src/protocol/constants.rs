//! Header names, media types and path segments of the store's HTTP API.

/// Request header names.
///
/// Names are lowercase, as they are stored in request header maps.
pub mod headers {
    use http::HeaderName;

    /// Optimistic-concurrency check on writes
    pub const EXPECTED_VERSION: HeaderName = HeaderName::from_static("es-expectedversion");
    /// Tombstones a stream on delete
    pub const HARD_DELETE: HeaderName = HeaderName::from_static("es-harddelete");
    /// Seconds the store may hold a slice read open waiting for new events
    pub const LONG_POLL: HeaderName = HeaderName::from_static("es-longpoll");
    /// Representation requested from the store
    pub const ACCEPT: HeaderName = http::header::ACCEPT;
    /// Media type of a request body
    pub const CONTENT_TYPE: HeaderName = http::header::CONTENT_TYPE;
}

/// Media types understood by the store.
pub mod media_types {
    /// Batch of events posted to a stream
    pub const EVENTS_JSON: &str = "application/vnd.eventstore.events+json";
    /// Atom entries and feeds rendered as JSON
    pub const ATOM_JSON: &str = "application/vnd.eventstore.atom+json";
    /// Bare event body
    pub const JSON: &str = "application/json";
}

/// Root path segment for streams
pub const STREAMS_SEGMENT: &str = "streams";
/// Path segment of a stream's metadata
pub const METADATA_SEGMENT: &str = "metadata";
/// Path segment addressing the newest event
pub const HEAD: &str = "head";
/// Query string appended to slice URLs
pub const EMBED_RICH: &str = "embed=rich";
/// Event type used when writing stream metadata
pub const METADATA_EVENT_TYPE: &str = "$metadata";
/// Shortest long-poll the store is asked for
pub const MIN_LONG_POLL_SECS: u64 = 1;
