//! Error observer hook.
//!
//! An observer is told about every decode failure before the error is returned
//! to the caller. It only observes: it has no return value and cannot change what
//! the operation returns.

use crate::error::EventStoreError;
use std::sync::Arc;

/// Where a reported error happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorContext<'a> {
    /// Endpoint of the connection
    pub endpoint: &'a str,
    /// Operation name, e.g. `read_event`
    pub operation: &'static str,
    /// URL that was requested
    pub url: &'a str,
}

/// Callback receiving `(context, error)` pairs.
pub type ErrorObserver = Arc<dyn Fn(&ErrorContext<'_>, &EventStoreError) + Send + Sync>;
