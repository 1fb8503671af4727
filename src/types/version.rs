//! Optimistic-concurrency and position types.
//!
//! The store speaks in magic integers (`-1`, `-2`, `-4`) and the literal `head`.
//! These enums keep the sentinels out of application code; they are turned into
//! their wire form only when a request is built.

use crate::error::{EventStoreError, Result};
use crate::protocol::constants::HEAD;
use std::fmt;

/// Version the caller expects a stream to be at before a write.
///
/// Sent as the `ES-ExpectedVersion` header on appends and deletes. Reads never
/// carry it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExpectedVersion {
    /// Write regardless of the stream's current version (`-2`).
    #[default]
    Any,
    /// The stream must not exist yet (`-1`).
    NoStream,
    /// The stream must exist, at any version (`-4`).
    StreamExists,
    /// The stream's last event number must be exactly this.
    Exact(u64),
}

impl ExpectedVersion {
    const NO_STREAM: i64 = -1;
    const ANY: i64 = -2;
    const STREAM_EXISTS: i64 = -4;

    /// Integer form sent on the wire.
    ///
    /// # Errors
    ///
    /// Fails for `Exact(n)` with `n > i64::MAX`, which the store cannot represent
    /// and which would otherwise wrap into a sentinel.
    pub fn as_raw(&self) -> Result<i64> {
        match self {
            ExpectedVersion::Any => Ok(Self::ANY),
            ExpectedVersion::NoStream => Ok(Self::NO_STREAM),
            ExpectedVersion::StreamExists => Ok(Self::STREAM_EXISTS),
            ExpectedVersion::Exact(n) => i64::try_from(*n).map_err(|_| {
                EventStoreError::InvalidArgument(format!(
                    "Expected version {} is out of range",
                    n
                ))
            }),
        }
    }

    /// Map a wire integer back to a variant.
    ///
    /// Returns `None` for negative values that are not a known sentinel.
    pub fn from_raw(raw: i64) -> Option<Self> {
        match raw {
            Self::ANY => Some(ExpectedVersion::Any),
            Self::NO_STREAM => Some(ExpectedVersion::NoStream),
            Self::STREAM_EXISTS => Some(ExpectedVersion::StreamExists),
            n if n >= 0 => Some(ExpectedVersion::Exact(n as u64)),
            _ => None,
        }
    }
}

impl fmt::Display for ExpectedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpectedVersion::Any => write!(f, "{}", Self::ANY),
            ExpectedVersion::NoStream => write!(f, "{}", Self::NO_STREAM),
            ExpectedVersion::StreamExists => write!(f, "{}", Self::STREAM_EXISTS),
            ExpectedVersion::Exact(n) => write!(f, "{}", n),
        }
    }
}

/// Position of an event within a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamPosition {
    /// A concrete event number.
    Exact(u64),
    /// The most recent event, addressed as `head`.
    End,
}

impl StreamPosition {
    /// The first event of a stream.
    pub const START: StreamPosition = StreamPosition::Exact(0);
}

impl From<u64> for StreamPosition {
    fn from(n: u64) -> Self {
        StreamPosition::Exact(n)
    }
}

impl fmt::Display for StreamPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamPosition::Exact(n) => write!(f, "{}", n),
            StreamPosition::End => f.write_str(HEAD),
        }
    }
}

/// Direction in which a slice is paged through the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadDirection {
    /// Towards newer events.
    Forward,
    /// Towards older events.
    Backward,
}

impl ReadDirection {
    /// Path segment used in slice URLs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadDirection::Forward => "forward",
            ReadDirection::Backward => "backward",
        }
    }
}

impl fmt::Display for ReadDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
