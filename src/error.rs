//! Error types for the event store HTTP client.
//!
//! Every fallible operation in this crate returns [`Result`], whose error side is
//! [`EventStoreError`]. The taxonomy mirrors what can go wrong on the wire:
//!
//! | Variant | Raised when |
//! |---------|-------------|
//! | [`Transport`](EventStoreError::Transport) | DNS, connect or timeout failure before a response arrived |
//! | [`Store`](EventStoreError::Store) | The store answered with a status that has no dedicated outcome |
//! | [`EventNotFound`](EventStoreError::EventNotFound) | `404` on the object-graph single-event read |
//! | [`Decode`](EventStoreError::Decode) | A `2xx` body did not match the expected JSON shape |
//! | [`Encode`](EventStoreError::Encode) | An append body could not be serialized |
//! | [`InvalidArgument`](EventStoreError::InvalidArgument) | Rejected input, e.g. an empty stream name |
//! | [`ConnectionClosed`](EventStoreError::ConnectionClosed) | The connection was closed before the call |
//! | [`Config`](EventStoreError::Config) | The HTTP client could not be built from the settings |
//!
//! "Stream or event absent" on the typed reads is *not* an error; it is reported
//! through [`EventReadStatus`](crate::EventReadStatus) and
//! [`SliceReadStatus`](crate::SliceReadStatus).

use std::fmt;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EventStoreError>;

/// What kind of network-level failure the transport hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// Could not establish a connection (refused, DNS, TLS handshake).
    Connect,
    /// The configured request timeout elapsed.
    Timeout,
    /// Anything else, e.g. the body stream broke mid-read.
    Other,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportErrorKind::Connect => f.write_str("connect"),
            TransportErrorKind::Timeout => f.write_str("timeout"),
            TransportErrorKind::Other => f.write_str("other"),
        }
    }
}

/// Errors produced by [`EventStoreConnection`](crate::EventStoreConnection) and transports.
#[derive(Debug, Error)]
pub enum EventStoreError {
    /// Network-level failure; no HTTP response was received.
    #[error("transport error ({kind}): {message}")]
    Transport {
        /// Failure category
        kind: TransportErrorKind,
        /// Message from the underlying client
        message: String,
    },

    /// The store returned a non-success status without a dedicated outcome.
    #[error("event store returned {status} {reason}: {body}")]
    Store {
        /// HTTP status code
        status: u16,
        /// Reason phrase reported alongside the status
        reason: String,
        /// Raw response body, lossily decoded as UTF-8
        body: String,
    },

    /// `404` on an object-graph single-event read.
    #[error("event not found at {url}")]
    EventNotFound {
        /// URL that was requested
        url: String,
    },

    /// A successful response body could not be decoded into the target shape.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        /// URL that produced the body
        url: String,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// A request body could not be serialized.
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// Caller input was rejected before any request was sent.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The connection has been closed.
    #[error("connection is closed")]
    ConnectionClosed,

    /// The transport could not be configured.
    #[error("configuration error: {0}")]
    Config(String),
}

impl EventStoreError {
    /// Build a [`Store`](EventStoreError::Store) error from a raw response.
    pub fn store(status: u16, reason: impl Into<String>, body: &[u8]) -> Self {
        EventStoreError::Store {
            status,
            reason: reason.into(),
            body: String::from_utf8_lossy(body).into_owned(),
        }
    }

    /// HTTP status code carried by the error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            EventStoreError::Store { status, .. } => Some(*status),
            EventStoreError::EventNotFound { .. } => Some(404),
            _ => None,
        }
    }

    /// True for [`EventNotFound`](EventStoreError::EventNotFound).
    pub fn is_not_found(&self) -> bool {
        matches!(self, EventStoreError::EventNotFound { .. })
    }

    /// True for network-level failures.
    pub fn is_transport(&self) -> bool {
        matches!(self, EventStoreError::Transport { .. })
    }
}
