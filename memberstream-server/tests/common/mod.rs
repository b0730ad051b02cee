//! Shared helpers for the HTTP API tests.

#![allow(dead_code)]

use memberstream_server::{build_router, AppState};
use memberstream_stream::mock::RecordingSink;
use memberstream_stream::{BackendMode, Dispatcher, RecordSink};
use memberstream_types::EnvelopeBuilder;
use serde_json::{json, Value};
use std::sync::Arc;

/// The member used by the add scenario.
pub fn member_json(id: i64) -> Value {
    json!({
        "id": id,
        "name": "A",
        "age": 30,
        "email": "a@x.com",
        "phone": "555",
        "address": "St",
        "timestamp": "2024-01-01T00:00:00"
    })
}

/// Spin up the HTTP server on an OS-assigned port around `sink`, returning
/// the base URL.
pub async fn spawn_with_sink(sink: Arc<dyn RecordSink>, region: Option<&str>) -> String {
    let dispatcher = Arc::new(Dispatcher::new(sink, EnvelopeBuilder::default()));
    let app = build_router(AppState::new(dispatcher, region.map(str::to_string)));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://127.0.0.1:{}", port)
}

/// Spin up the HTTP server backed by a recording sink.
pub async fn spawn_test_server(mode: BackendMode) -> (String, RecordingSink) {
    let sink = RecordingSink::new(mode, "members");
    let base = spawn_with_sink(Arc::new(sink.clone()), Some("us-east-1")).await;
    (base, sink)
}
