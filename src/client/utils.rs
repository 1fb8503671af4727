//! Status-code classification shared by all operations.
//!
//! | Status | Outcome |
//! |--------|---------|
//! | `2xx` | [`StatusClass::Success`] |
//! | `404` | [`StatusClass::NotFound`] |
//! | `410` | [`StatusClass::Gone`] |
//! | anything else | [`StatusClass::Failure`] |
//!
//! Each operation decides what `NotFound` and `Gone` mean for it; writes treat
//! them as failures.

/// Coarse outcome of an HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// `2xx`
    Success,
    /// `404 Not Found`
    NotFound,
    /// `410 Gone`, the stream was deleted
    Gone,
    /// Any other status
    Failure,
}

/// Classify a status code.
pub fn classify_status(status: u16) -> StatusClass {
    match status {
        200..=299 => StatusClass::Success,
        404 => StatusClass::NotFound,
        410 => StatusClass::Gone,
        _ => StatusClass::Failure,
    }
}

/// Check if status code indicates success
pub fn is_success_status(status: u16) -> bool {
    classify_status(status) == StatusClass::Success
}
