#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # Event store HTTP client
//!
//! This crate talks to an event store node over its HTTP API. Streams are
//! append-only sequences of events addressed by name; the store exposes them as
//! Atom feeds rendered in JSON.
//!
//! ## Overview
//!
//! The crate maps stream operations onto single HTTP requests:
//!
//! 1. **Append** - `POST /streams/{stream}` with an event batch
//! 2. **Read event** - `GET /streams/{stream}/{number or head}`
//! 3. **Read slice** - `GET /streams/{stream}/{start}/{forward|backward}/{count}?embed=rich`
//! 4. **Delete** - `DELETE /streams/{stream}`, optionally tombstoning it
//!
//! and maps the answers back:
//!
//! - `2xx` - decoded result
//! - `404 Not Found` - `NotFound` / `StreamNotFound` status
//! - `410 Gone` - `StreamDeleted` status
//! - anything else - [`EventStoreError::Store`] with status, reason and body
//!
//! Feed entries arrive newest-first; slices are always returned oldest-first.
//!
//! ## Client Usage
//!
//! ```ignore
//! use eventstore_http::{EventStoreConnection, ExpectedVersion, NewEventData, StreamPosition};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let conn = EventStoreConnection::new("http://127.0.0.1:2113")?;
//!
//!     conn.append_to_stream(
//!         "orders-17",
//!         ExpectedVersion::Any,
//!         &[NewEventData::new("OrderPlaced", json!({"total": 12}))],
//!     )
//!     .await?;
//!
//!     let slice = conn
//!         .read_stream_events_forward("orders-17", StreamPosition::START, 20, None)
//!         .await?;
//!     for event in slice.events {
//!         println!("{}@{}: {}", event.event_number, event.stream_id, event.event_type);
//!     }
//!
//!     conn.close();
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - **[types]** - Versions, positions, events and read results
//! - **[error]** - Error types and result handling
//! - **[client]** - Connection, transport and settings
//! - **[protocol]** - Header formatting, URL construction, Atom decoding

pub mod client;
pub mod error;
pub mod protocol;
pub mod types;

pub use client::{ConnectionSettings, EventStoreConnection, HttpTransport, UserCredentials};
pub use error::{EventStoreError, Result, TransportErrorKind};
pub use types::{
    EventInfo, EventReadResult, EventReadStatus, ExpectedVersion, Link, NewEventData,
    ReadDirection, SliceReadStatus, StreamEventsSlice, StreamPosition,
};

#[cfg(test)]
mod tests;
