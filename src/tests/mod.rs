//! Crate-level tests driving [`EventStoreConnection`](crate::EventStoreConnection)
//! through a scripted transport and through `reqwest` against a mock server.

mod reqwest_transport;
