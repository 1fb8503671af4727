//! Core types shared by the client and the protocol layer.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ExpectedVersion`] | Optimistic-concurrency token for writes |
//! | [`StreamPosition`] | Event number or `head` |
//! | [`ReadDirection`] | Forward or backward paging |
//! | [`NewEventData`] | Event to append |
//! | [`EventInfo`] | Event read back from the store |
//! | [`EventReadResult`] | Outcome of a single-event read |
//! | [`StreamEventsSlice`] | Outcome of a slice read |

mod event;
mod results;
mod version;

pub use event::{EventInfo, Link, NewEventData};
pub use results::{EventReadResult, EventReadStatus, SliceReadStatus, StreamEventsSlice};
pub use version::{ExpectedVersion, ReadDirection, StreamPosition};
