//! Formatting of the store's protocol headers.
//!
//! | Header | Format | Example |
//! |--------|--------|---------|
//! | ES-ExpectedVersion | Signed integer | `-2`, `14` |
//! | ES-HardDelete | Boolean literal | `true` |
//! | ES-LongPoll | Whole seconds, at least 1 | `30` |
//!
//! # Examples
//!
//! ```
//! use eventstore_http::protocol::{format_expected_version, format_long_poll};
//! use eventstore_http::ExpectedVersion;
//! use std::time::Duration;
//!
//! assert_eq!(format_expected_version(ExpectedVersion::NoStream).unwrap(), "-1");
//! assert_eq!(format_long_poll(Duration::from_secs(5)), Some("5".to_string()));
//! assert_eq!(format_long_poll(Duration::from_millis(500)), None);
//! ```

use super::constants::MIN_LONG_POLL_SECS;
use crate::error::{EventStoreError, Result};
use crate::types::ExpectedVersion;
use std::time::Duration;

/// Format an `ES-ExpectedVersion` value.
///
/// # Errors
///
/// Fails if an exact version does not fit the header's signed range.
#[inline]
pub fn format_expected_version(expected: ExpectedVersion) -> Result<String> {
    Ok(expected.as_raw()?.to_string())
}

/// Parse an `ES-ExpectedVersion` value.
///
/// # Errors
///
/// Fails if the value is not an integer or is an unknown negative sentinel.
///
/// # Examples
///
/// ```
/// use eventstore_http::protocol::parse_expected_version;
/// use eventstore_http::ExpectedVersion;
///
/// assert_eq!(parse_expected_version(" -4 ").unwrap(), ExpectedVersion::StreamExists);
/// assert!(parse_expected_version("-3").is_err());
/// ```
pub fn parse_expected_version(value: &str) -> Result<ExpectedVersion> {
    let raw: i64 = value.trim().parse().map_err(|_| {
        EventStoreError::InvalidArgument(format!("Invalid expected version: {}", value))
    })?;

    ExpectedVersion::from_raw(raw).ok_or_else(|| {
        EventStoreError::InvalidArgument(format!("Unknown expected version sentinel: {}", raw))
    })
}

/// Format an `ES-LongPoll` value.
///
/// Only whole seconds are sent. Durations under one second yield `None`, meaning
/// the header is omitted and the store answers immediately.
pub fn format_long_poll(duration: Duration) -> Option<String> {
    let secs = duration.as_secs();
    if secs < MIN_LONG_POLL_SECS {
        return None;
    }
    Some(secs.to_string())
}

/// Format an `ES-HardDelete` value.
#[inline]
pub fn format_hard_delete() -> &'static str {
    "true"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_expected_version() {
        assert_eq!(format_expected_version(ExpectedVersion::Any).unwrap(), "-2");
        assert_eq!(
            format_expected_version(ExpectedVersion::StreamExists).unwrap(),
            "-4"
        );
        assert_eq!(format_expected_version(ExpectedVersion::Exact(3)).unwrap(), "3");
    }

    #[test]
    fn test_format_expected_version_out_of_range() {
        assert!(format_expected_version(ExpectedVersion::Exact(u64::MAX)).is_err());
        assert!(format_expected_version(ExpectedVersion::Exact(1 << 63)).is_err());
    }

    #[test]
    fn test_parse_expected_version() {
        assert_eq!(
            parse_expected_version("-1").unwrap(),
            ExpectedVersion::NoStream
        );
        assert_eq!(
            parse_expected_version("9").unwrap(),
            ExpectedVersion::Exact(9)
        );
    }

    #[test]
    fn test_parse_expected_version_invalid() {
        assert!(parse_expected_version("abc").is_err());
        assert!(parse_expected_version("-7").is_err());
    }

    #[test]
    fn test_long_poll_floor() {
        assert_eq!(format_long_poll(Duration::from_millis(500)), None);
        assert_eq!(format_long_poll(Duration::ZERO), None);
        assert_eq!(format_long_poll(Duration::from_secs(1)), Some("1".into()));
    }

    #[test]
    fn test_long_poll_truncates_fraction() {
        assert_eq!(format_long_poll(Duration::from_secs(5)), Some("5".into()));
        assert_eq!(format_long_poll(Duration::from_millis(2900)), Some("2".into()));
    }
}
