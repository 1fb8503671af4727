//! Canonical URLs of streams, events and feed pages.
//!
//! | Resource | Shape |
//! |----------|-------|
//! | Stream | `{endpoint}/streams/{stream}` |
//! | Event | `{endpoint}/streams/{stream}/{number or head}` |
//! | Slice | `{endpoint}/streams/{stream}/{start}/{forward or backward}/{count}?embed=rich` |
//! | Metadata | `{endpoint}/streams/{stream}/metadata` |
//!
//! Stream names are inserted verbatim. No percent-encoding is applied, so callers
//! must pass names that are already URL-safe.
//!
//! # Examples
//!
//! ```
//! use eventstore_http::protocol::{event_url, slice_url};
//! use eventstore_http::{ReadDirection, StreamPosition};
//!
//! let url = event_url("http://127.0.0.1:2113", "orders", StreamPosition::End);
//! assert_eq!(url, "http://127.0.0.1:2113/streams/orders/head");
//!
//! let url = slice_url(
//!     "http://127.0.0.1:2113",
//!     "orders",
//!     StreamPosition::Exact(0),
//!     ReadDirection::Forward,
//!     20,
//! );
//! assert_eq!(url, "http://127.0.0.1:2113/streams/orders/0/forward/20?embed=rich");
//! ```

use super::constants::{EMBED_RICH, METADATA_SEGMENT, STREAMS_SEGMENT};
use crate::error::{EventStoreError, Result};
use crate::types::{ReadDirection, StreamPosition};

/// Validate an endpoint and return it without a trailing slash.
///
/// # Errors
///
/// Fails unless the endpoint is an absolute `http` or `https` URL without a
/// query string or fragment.
pub fn normalize_endpoint(endpoint: &str) -> Result<String> {
    let parsed = url::Url::parse(endpoint).map_err(|e| {
        EventStoreError::InvalidArgument(format!("Invalid endpoint '{}': {}", endpoint, e))
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(EventStoreError::InvalidArgument(format!(
            "Unsupported endpoint scheme '{}'",
            parsed.scheme()
        )));
    }

    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(EventStoreError::InvalidArgument(format!(
            "Endpoint '{}' must not carry a query or fragment",
            endpoint
        )));
    }

    Ok(endpoint.trim_end_matches('/').to_string())
}

/// Reject empty stream names.
pub fn validate_stream_name(stream: &str) -> Result<()> {
    if stream.is_empty() {
        return Err(EventStoreError::InvalidArgument(
            "Stream name must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// URL used to append to or delete a stream.
pub fn stream_url(endpoint: &str, stream: &str) -> String {
    format!("{}/{}/{}", endpoint, STREAMS_SEGMENT, stream)
}

/// Canonical URL of a single event.
pub fn event_url(endpoint: &str, stream: &str, position: StreamPosition) -> String {
    format!("{}/{}", stream_url(endpoint, stream), position)
}

/// URL of a feed page.
pub fn slice_url(
    endpoint: &str,
    stream: &str,
    start: StreamPosition,
    direction: ReadDirection,
    count: usize,
) -> String {
    format!(
        "{}/{}/{}/{}?{}",
        stream_url(endpoint, stream),
        start,
        direction,
        count,
        EMBED_RICH
    )
}

/// URL of a stream's metadata.
pub fn metadata_url(endpoint: &str, stream: &str) -> String {
    format!("{}/{}", stream_url(endpoint, stream), METADATA_SEGMENT)
}
