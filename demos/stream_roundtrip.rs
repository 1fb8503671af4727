//! Append to a stream and read it back
//!
//! Demonstrates appending, paging in both directions and deleting against a
//! running node.
//!
//! Run with: cargo run --example stream_roundtrip -- http://127.0.0.1:2113

use eventstore_http::{
    ConnectionSettings, EventStoreConnection, ExpectedVersion, NewEventData, SliceReadStatus,
    StreamPosition, UserCredentials,
};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let endpoint = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://127.0.0.1:2113".to_string());
    let stream = format!("demo-{}", uuid::Uuid::new_v4().simple());

    println!("Event Store Roundtrip Example");
    println!("=============================\n");
    println!("Endpoint: {}", endpoint);
    println!("Stream:   {}\n", stream);

    let settings = ConnectionSettings::default()
        .with_credentials(UserCredentials::new("admin", "changeit"))
        .with_timeout_ms(10_000);
    let conn = EventStoreConnection::with_settings(&endpoint, settings)?.on_error(|ctx, err| {
        eprintln!("[{}] {} failed: {}", ctx.operation, ctx.url, err);
    });

    let events: Vec<NewEventData> = (1..=5)
        .map(|n| NewEventData::new("CounterIncremented", json!({ "value": n })))
        .collect();
    conn.append_to_stream(&stream, ExpectedVersion::NoStream, &events)
        .await?;

    let forward = conn
        .read_stream_events_forward(&stream, StreamPosition::START, 10, None)
        .await?;
    println!("Forward page:");
    for event in &forward.events {
        println!("  {} {}", event.event_number, event.event_type);
    }

    let backward = conn
        .read_stream_events_backward(&stream, StreamPosition::End, 2)
        .await?;
    println!("Last two events (still oldest-first):");
    for event in &backward.events {
        println!("  {} {}", event.event_number, event.event_type);
    }

    let head = conn.read_event(&stream, StreamPosition::End).await?;
    println!("Head: {:?}", head.event.map(|e| e.title));

    conn.delete_stream(&stream, ExpectedVersion::Any, false)
        .await?;
    let after = conn
        .read_stream_events_forward(&stream, StreamPosition::START, 10, None)
        .await?;
    assert_ne!(after.status, SliceReadStatus::Success);
    println!("After delete: {:?}", after.status);

    conn.close();
    Ok(())
}
