//! The event store connection.
//!
//! [`EventStoreConnection`] turns stream operations into single HTTP requests and
//! interprets the store's answers.
//!
//! # Examples
//!
//! ## Appending and reading back
//!
//! ```ignore
//! use eventstore_http::{EventStoreConnection, ExpectedVersion, NewEventData, StreamPosition};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let conn = EventStoreConnection::new("http://127.0.0.1:2113")?;
//!
//!     let event = NewEventData::new("OrderPlaced", json!({"order": 17}));
//!     conn.append_to_stream("orders-17", ExpectedVersion::NoStream, &[event]).await?;
//!
//!     let result = conn.read_event("orders-17", StreamPosition::End).await?;
//!     println!("{:?}", result.event);
//!     Ok(())
//! }
//! ```
//!
//! ## Following a stream with long polling
//!
//! ```ignore
//! use eventstore_http::{EventStoreConnection, StreamPosition};
//! use std::time::Duration;
//!
//! let slice = conn
//!     .read_stream_events_forward("orders-17", StreamPosition::Exact(1), 20, Some(Duration::from_secs(10)))
//!     .await?;
//! for event in &slice.events {
//!     println!("{} {}", event.event_number, event.event_type);
//! }
//! ```
//!
//! # Read outcomes
//!
//! `read_event` and the slice reads report `404` and `410` as statuses. The
//! object-graph reads ([`read_event_json`](EventStoreConnection::read_event_json),
//! [`read_event_as`](EventStoreConnection::read_event_as)) raise
//! [`EventNotFound`](EventStoreError::EventNotFound) on `404` and return `None` on
//! `410`. The two families are kept distinct on purpose.

use crate::client::config::ConnectionSettings;
use crate::client::diagnostics::{ErrorContext, ErrorObserver};
use crate::client::transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
use crate::client::utils::{classify_status, StatusClass};
use crate::error::{EventStoreError, Result};
use crate::protocol::{self, constants::headers, constants::media_types};
use crate::types::{
    EventReadResult, ExpectedVersion, NewEventData, ReadDirection, SliceReadStatus,
    StreamEventsSlice, StreamPosition,
};
use http::Method;
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Client for one event store node.
///
/// Cheap to clone; clones share the transport and are all closed together by
/// [`close`](EventStoreConnection::close). Each operation issues exactly one
/// request and never retries.
#[derive(Clone)]
pub struct EventStoreConnection {
    endpoint: Arc<str>,
    settings: Arc<ConnectionSettings>,
    transport: Arc<RwLock<Option<Arc<dyn HttpTransport>>>>,
    error_observer: Option<ErrorObserver>,
}

impl EventStoreConnection {
    /// Connect to `endpoint` with default settings.
    pub fn new(endpoint: &str) -> Result<Self> {
        Self::with_settings(endpoint, ConnectionSettings::default())
    }

    /// Connect to `endpoint` using a `reqwest` transport built from `settings`.
    pub fn with_settings(endpoint: &str, settings: ConnectionSettings) -> Result<Self> {
        let transport = ReqwestTransport::from_settings(&settings)?;
        Self::with_transport(endpoint, settings, Arc::new(transport))
    }

    /// Connect to `endpoint` through a caller-supplied transport.
    ///
    /// `settings.request_timeout_ms` is not applied here; the transport owns its
    /// timeout.
    pub fn with_transport(
        endpoint: &str,
        settings: ConnectionSettings,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self> {
        let endpoint = protocol::normalize_endpoint(endpoint)?;

        Ok(EventStoreConnection {
            endpoint: Arc::from(endpoint),
            settings: Arc::new(settings),
            transport: Arc::new(RwLock::new(Some(transport))),
            error_observer: None,
        })
    }

    /// Register an observer for decode failures.
    ///
    /// The observer runs before the error is returned and cannot alter it.
    pub fn on_error<F>(mut self, observer: F) -> Self
    where
        F: Fn(&ErrorContext<'_>, &EventStoreError) + Send + Sync + 'static,
    {
        let observer: ErrorObserver = Arc::new(observer);
        self.error_observer = Some(observer);
        self
    }

    /// Base URL of the node.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Settings in effect.
    pub fn settings(&self) -> &ConnectionSettings {
        &self.settings
    }

    /// Release the transport.
    ///
    /// Returns `true` for the call that actually released it. Every operation
    /// started afterwards fails with [`EventStoreError::ConnectionClosed`].
    pub fn close(&self) -> bool {
        let released = self.transport.write().take().is_some();
        if released && self.settings.enable_logging {
            tracing::info!("Connection to {} closed", self.endpoint);
        }
        released
    }

    /// Whether [`close`](EventStoreConnection::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.transport.read().is_none()
    }

    /// Append events to a stream.
    ///
    /// Posts the events as one batch with the `ES-ExpectedVersion` check. An empty
    /// slice still sends a request with body `[]`. The store does not report the
    /// event numbers it assigned.
    ///
    /// # Errors
    ///
    /// [`EventStoreError::Store`] for any non-`2xx` status, including a failed
    /// expected-version check.
    pub async fn append_to_stream(
        &self,
        stream: &str,
        expected_version: ExpectedVersion,
        events: &[NewEventData],
    ) -> Result<()> {
        self.ensure_open()?;
        protocol::validate_stream_name(stream)?;

        let url = protocol::stream_url(&self.endpoint, stream);
        self.post_events("append_to_stream", url, expected_version, events)
            .await?;

        if self.settings.enable_logging {
            tracing::info!(
                "Appended {} event(s) to {} (expected version {})",
                events.len(),
                stream,
                expected_version
            );
        }
        Ok(())
    }

    /// Delete a stream.
    ///
    /// A soft delete lets the stream be written again, continuing its numbering.
    /// A hard delete tombstones it permanently.
    ///
    /// # Errors
    ///
    /// [`EventStoreError::Store`] for any non-`2xx` status.
    pub async fn delete_stream(
        &self,
        stream: &str,
        expected_version: ExpectedVersion,
        hard_delete: bool,
    ) -> Result<()> {
        self.ensure_open()?;
        protocol::validate_stream_name(stream)?;

        let url = protocol::stream_url(&self.endpoint, stream);
        let mut request = HttpRequest::new(Method::DELETE, url.as_str()).with_header(
            headers::EXPECTED_VERSION,
            protocol::format_expected_version(expected_version)?,
        );
        if hard_delete {
            request = request.with_header(headers::HARD_DELETE, protocol::format_hard_delete());
        }

        let response = self.execute("delete_stream", request).await?;
        if !response.is_success() {
            return Err(self.store_failure("delete_stream", &url, response));
        }

        if self.settings.enable_logging {
            tracing::info!(
                "Deleted stream {} (hard: {}, expected version {})",
                stream,
                hard_delete,
                expected_version
            );
        }
        Ok(())
    }

    /// Read one event.
    ///
    /// `404` yields [`EventReadStatus::NotFound`](crate::EventReadStatus::NotFound)
    /// and `410` yields
    /// [`EventReadStatus::StreamDeleted`](crate::EventReadStatus::StreamDeleted).
    pub async fn read_event(
        &self,
        stream: &str,
        position: StreamPosition,
    ) -> Result<EventReadResult> {
        self.ensure_open()?;
        protocol::validate_stream_name(stream)?;

        let url = protocol::event_url(&self.endpoint, stream, position);
        self.read_event_at_url(&url).await
    }

    /// Read one event from its canonical URL, e.g. a link taken from a feed.
    pub async fn read_event_at_url(&self, url: &str) -> Result<EventReadResult> {
        const OPERATION: &str = "read_event";

        let request =
            HttpRequest::new(Method::GET, url).with_header(headers::ACCEPT, media_types::ATOM_JSON);
        let response = self.execute(OPERATION, request).await?;

        match classify_status(response.status) {
            StatusClass::NotFound => Ok(EventReadResult::not_found()),
            StatusClass::Gone => Ok(EventReadResult::stream_deleted()),
            StatusClass::Failure => Err(self.store_failure(OPERATION, url, response)),
            StatusClass::Success => {
                let event =
                    self.decode(OPERATION, url, || protocol::decode_entry(&response.body))?;
                Ok(EventReadResult::success(event))
            }
        }
    }

    /// Read one event's body as a JSON value.
    ///
    /// # Errors
    ///
    /// [`EventStoreError::EventNotFound`] on `404`. A deleted stream (`410`) is
    /// `Ok(None)`.
    pub async fn read_event_json(
        &self,
        stream: &str,
        position: StreamPosition,
    ) -> Result<Option<Value>> {
        self.ensure_open()?;
        protocol::validate_stream_name(stream)?;

        let url = protocol::event_url(&self.endpoint, stream, position);
        self.read_event_json_at_url(&url).await
    }

    /// Read the body of the event at `url` as a JSON value.
    pub async fn read_event_json_at_url(&self, url: &str) -> Result<Option<Value>> {
        self.read_json("read_event_json", url).await
    }

    /// Read one event's body and convert it into `T`.
    ///
    /// Same status rules as [`read_event_json`](EventStoreConnection::read_event_json).
    /// A body that does not fit `T` is a decode failure.
    pub async fn read_event_as<T: DeserializeOwned>(
        &self,
        stream: &str,
        position: StreamPosition,
    ) -> Result<Option<T>> {
        const OPERATION: &str = "read_event_as";

        self.ensure_open()?;
        protocol::validate_stream_name(stream)?;

        let url = protocol::event_url(&self.endpoint, stream, position);
        let value = self.read_json(OPERATION, &url).await?;

        value
            .map(|v| self.decode(OPERATION, &url, || serde_json::from_value::<T>(v)))
            .transpose()
    }

    /// Read a page of events.
    ///
    /// With a `long_poll` of at least one second the store holds the request until
    /// new events arrive or the poll expires. Returned events are oldest-first in
    /// both directions.
    pub async fn read_stream_events(
        &self,
        stream: &str,
        start: StreamPosition,
        count: usize,
        direction: ReadDirection,
        long_poll: Option<Duration>,
    ) -> Result<StreamEventsSlice> {
        const OPERATION: &str = "read_stream_events";

        self.ensure_open()?;
        protocol::validate_stream_name(stream)?;

        let url = protocol::slice_url(&self.endpoint, stream, start, direction, count);
        let mut request = HttpRequest::new(Method::GET, url.as_str())
            .with_header(headers::ACCEPT, media_types::ATOM_JSON);
        if let Some(secs) = long_poll.and_then(protocol::format_long_poll) {
            request = request.with_header(headers::LONG_POLL, secs);
        }

        let response = self.execute(OPERATION, request).await?;

        match classify_status(response.status) {
            StatusClass::NotFound => Ok(StreamEventsSlice::empty(
                SliceReadStatus::StreamNotFound,
                stream,
                start,
                direction,
            )),
            StatusClass::Gone => Ok(StreamEventsSlice::empty(
                SliceReadStatus::StreamDeleted,
                stream,
                start,
                direction,
            )),
            StatusClass::Failure => Err(self.store_failure(OPERATION, &url, response)),
            StatusClass::Success => {
                let mut feed =
                    self.decode(OPERATION, &url, || protocol::decode_feed(&response.body))?;
                let head_of_stream = feed.head_of_stream;
                let links = std::mem::take(&mut feed.links);

                Ok(StreamEventsSlice {
                    status: SliceReadStatus::Success,
                    stream: stream.to_string(),
                    from: start,
                    direction,
                    events: feed.into_events(),
                    head_of_stream,
                    links,
                })
            }
        }
    }

    /// Read a page moving towards newer events.
    pub async fn read_stream_events_forward(
        &self,
        stream: &str,
        start: StreamPosition,
        count: usize,
        long_poll: Option<Duration>,
    ) -> Result<StreamEventsSlice> {
        self.read_stream_events(stream, start, count, ReadDirection::Forward, long_poll)
            .await
    }

    /// Read a page moving towards older events.
    pub async fn read_stream_events_backward(
        &self,
        stream: &str,
        start: StreamPosition,
        count: usize,
    ) -> Result<StreamEventsSlice> {
        self.read_stream_events(stream, start, count, ReadDirection::Backward, None)
            .await
    }

    /// Read a stream's metadata document.
    ///
    /// Returns `None` when the stream is missing (`404`) or deleted (`410`).
    pub async fn read_stream_metadata(&self, stream: &str) -> Result<Option<Value>> {
        const OPERATION: &str = "read_stream_metadata";

        self.ensure_open()?;
        protocol::validate_stream_name(stream)?;

        let url = protocol::metadata_url(&self.endpoint, stream);
        let request = HttpRequest::new(Method::GET, url.as_str())
            .with_header(headers::ACCEPT, media_types::JSON);
        let response = self.execute(OPERATION, request).await?;

        match classify_status(response.status) {
            StatusClass::NotFound | StatusClass::Gone => Ok(None),
            StatusClass::Failure => Err(self.store_failure(OPERATION, &url, response)),
            StatusClass::Success => self
                .decode(OPERATION, &url, || serde_json::from_slice(&response.body))
                .map(Some),
        }
    }

    /// Replace a stream's metadata document.
    ///
    /// Written as a single `$metadata` event to the stream's metadata stream.
    pub async fn set_stream_metadata(
        &self,
        stream: &str,
        expected_version: ExpectedVersion,
        metadata: Value,
    ) -> Result<()> {
        self.ensure_open()?;
        protocol::validate_stream_name(stream)?;

        let url = protocol::metadata_url(&self.endpoint, stream);
        let event = NewEventData::new(protocol::constants::METADATA_EVENT_TYPE, metadata);
        self.post_events("set_stream_metadata", url, expected_version, &[event])
            .await?;

        if self.settings.enable_logging {
            tracing::info!("Updated metadata of {}", stream);
        }
        Ok(())
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_closed() {
            return Err(EventStoreError::ConnectionClosed);
        }
        Ok(())
    }

    async fn post_events(
        &self,
        operation: &'static str,
        url: String,
        expected_version: ExpectedVersion,
        events: &[NewEventData],
    ) -> Result<()> {
        let expected_version = protocol::format_expected_version(expected_version)?;
        let body = serde_json::to_vec(events).map_err(EventStoreError::Encode)?;

        let request = HttpRequest::new(Method::POST, url.as_str())
            .with_header(headers::CONTENT_TYPE, media_types::EVENTS_JSON)
            .with_header(headers::EXPECTED_VERSION, expected_version)
            .with_body(body);

        let response = self.execute(operation, request).await?;
        if !response.is_success() {
            return Err(self.store_failure(operation, &url, response));
        }
        Ok(())
    }

    async fn read_json(&self, operation: &'static str, url: &str) -> Result<Option<Value>> {
        let request =
            HttpRequest::new(Method::GET, url).with_header(headers::ACCEPT, media_types::JSON);
        let response = self.execute(operation, request).await?;

        match classify_status(response.status) {
            StatusClass::NotFound => Err(EventStoreError::EventNotFound {
                url: url.to_string(),
            }),
            StatusClass::Gone => Ok(None),
            StatusClass::Failure => Err(self.store_failure(operation, url, response)),
            StatusClass::Success => self
                .decode(operation, url, || serde_json::from_slice(&response.body))
                .map(Some),
        }
    }

    /// Send one request through the current transport.
    async fn execute(&self, operation: &'static str, request: HttpRequest) -> Result<HttpResponse> {
        // Clone the handle so the lock is not held across the await.
        let transport = self
            .transport
            .read()
            .clone()
            .ok_or(EventStoreError::ConnectionClosed)?;

        if self.settings.enable_logging {
            tracing::debug!(
                operation,
                method = %request.method,
                url = %request.url,
                "Sending request"
            );
        }

        let request = request.with_credentials(self.settings.default_credentials.clone());
        let result = transport.send(request).await;

        if let Err(e) = &result {
            if self.settings.enable_logging {
                tracing::error!(operation, "Transport failure: {}", e);
            }
        }
        result
    }

    fn store_failure(
        &self,
        operation: &'static str,
        url: &str,
        response: HttpResponse,
    ) -> EventStoreError {
        if self.settings.enable_logging {
            tracing::warn!(
                operation,
                "{} returned {} {}",
                url,
                response.status,
                response.reason
            );
        }
        EventStoreError::store(response.status, response.reason, &response.body)
    }

    /// Run a decoder, reporting failures to the log and the observer.
    fn decode<T>(
        &self,
        operation: &'static str,
        url: &str,
        decoder: impl FnOnce() -> std::result::Result<T, serde_json::Error>,
    ) -> Result<T> {
        decoder().map_err(|source| {
            let err = EventStoreError::Decode {
                url: url.to_string(),
                source,
            };

            if self.settings.enable_logging {
                tracing::error!(operation, "Failed to decode response: {}", err);
            }
            if let Some(observer) = &self.error_observer {
                let context = ErrorContext {
                    endpoint: &self.endpoint,
                    operation,
                    url,
                };
                observer(&context, &err);
            }
            err
        })
    }
}

impl std::fmt::Debug for EventStoreConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventStoreConnection")
            .field("endpoint", &self.endpoint)
            .field("settings", &self.settings)
            .field("closed", &self.is_closed())
            .finish()
    }
}
