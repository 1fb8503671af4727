//! Wire-level pieces of the store's HTTP API.
//!
//! - [`constants`] - header names, media types, path segments
//! - [`headers`] - formatting of `ES-*` header values
//! - [`urls`] - canonical stream, event and feed-page URLs
//! - [`atom`] - decoding of Atom entries and feeds

pub mod atom;
pub mod constants;
pub mod headers;
pub mod urls;

pub use atom::{decode_entry, decode_feed, AtomEntry, AtomFeed, FeedEntry};
pub use headers::*;
pub use urls::*;
