//! Shared helpers for API integration tests.
//!
//! Each test gets its own server on an ephemeral port backed by a fresh
//! in-memory repository, so tests never share records.

#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{json, Value};

use meetnote_api::{app, parse_allowed_origins, AppState};
use meetnote_db::InMemoryMeetingRepository;

/// Spawn the router over an empty in-memory store and return its base URL.
pub async fn spawn_app() -> String {
    spawn_with_state(AppState::new(Arc::new(InMemoryMeetingRepository::new()))).await
}

/// Spawn the router with the given state and return its base URL.
pub async fn spawn_with_state(state: AppState) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");
    let router = app(state, parse_allowed_origins(""));

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Test server failed");
    });

    format!("http://{}", addr)
}

/// Create a meeting through the API and return the response body.
pub async fn create_meeting(client: &reqwest::Client, base_url: &str, body: Value) -> Value {
    let response = client
        .post(format!("{}/api/v1/meetings", base_url))
        .json(&body)
        .send()
        .await
        .expect("Failed to send create request");
    assert_eq!(response.status(), 201, "create should return 201");
    response.json().await.expect("Invalid create response")
}

/// Minimal valid meeting body.
pub fn meeting_body(title: &str) -> Value {
    json!({
        "title": title,
        "date": "2024-01-15T10:00:00Z",
        "attendees": ["Alice", "Bob"],
    })
}
