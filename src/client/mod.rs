//! Event store HTTP client.
//!
//! This module provides the connection and the transport it sends requests
//! through:
//!
//! - **Append** batches of events with optimistic concurrency
//! - **Read** single events, typed or as raw JSON
//! - **Page** through streams forward or backward, with long polling
//! - **Delete** streams, soft or hard
//! - **Read and write** stream metadata
//!
//! # Module Organization
//!
//! ```text
//! client/
//! ├── connection   - EventStoreConnection and stream operations
//! ├── transport    - HttpTransport trait and the reqwest implementation
//! ├── config       - Connection settings and credentials
//! ├── diagnostics  - Error observer hook
//! └── utils        - Status-code classification
//! ```
//!
//! # Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`EventStoreConnection`] | Stream operations against one node |
//! | [`HttpTransport`] | Sends a request, returns the response |
//! | [`ReqwestTransport`] | Default transport |
//! | [`ConnectionSettings`] | Credentials, timeout, logging |
//!
//! # Examples
//!
//! ## Creating a Connection
//!
//! ```
//! use eventstore_http::client::{ConnectionSettings, EventStoreConnection, UserCredentials};
//!
//! // Default settings
//! let conn = EventStoreConnection::new("http://127.0.0.1:2113").unwrap();
//!
//! // Custom settings
//! let settings = ConnectionSettings {
//!     request_timeout_ms: Some(5_000),
//!     ..Default::default()
//! }
//! .with_credentials(UserCredentials::new("admin", "changeit"));
//! let conn = EventStoreConnection::with_settings("http://127.0.0.1:2113", settings).unwrap();
//! ```
//!
//! ## Classifying Statuses
//!
//! ```
//! use eventstore_http::client::{classify_status, StatusClass};
//!
//! assert_eq!(classify_status(201), StatusClass::Success);
//! assert_eq!(classify_status(410), StatusClass::Gone);
//! ```

mod config;
mod connection;
mod diagnostics;
mod transport;
mod utils;

pub use config::{ConnectionSettings, UserCredentials};
pub use connection::EventStoreConnection;
pub use diagnostics::{ErrorContext, ErrorObserver};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
pub use utils::*;
