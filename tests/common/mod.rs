// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use calai_client::config::Config;
use calai_client::models::Session;
use calai_client::store::{MemoryStore, SessionStore};
use calai_client::CalaiClient;
use httpmock::prelude::*;
use httpmock::Mock;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Session header as it arrives at the mock server.
#[allow(dead_code)]
pub const TOKEN_HEADER: &str = "x-auth-token";

/// Client wired to `base_url` with an in-memory store.
#[allow(dead_code)]
pub fn client_for(base_url: &str, store: Arc<MemoryStore>) -> CalaiClient {
    client_with_timeout(base_url, store, Duration::from_secs(5))
}

#[allow(dead_code)]
pub fn client_with_timeout(
    base_url: &str,
    store: Arc<MemoryStore>,
    timeout: Duration,
) -> CalaiClient {
    let config = Config::new(base_url, PathBuf::from("unused"), timeout);
    CalaiClient::with_store(&config, store).expect("Failed to build client")
}

/// Mock backend plus a client pointed at it.
#[allow(dead_code)]
pub async fn test_backend() -> (MockServer, Arc<MemoryStore>, CalaiClient) {
    let server = MockServer::start_async().await;
    let store = Arc::new(MemoryStore::new());
    let client = client_for(&server.base_url(), store.clone());
    (server, store, client)
}

/// Store a session as if acquired earlier.
#[allow(dead_code)]
pub fn seed_session(store: &Arc<MemoryStore>, token: &str) {
    SessionStore::new(store.clone())
        .set(&Session {
            token: token.to_string(),
            user_id: "demo_user".to_string(),
        })
        .expect("Failed to seed session");
}

#[allow(dead_code)]
pub fn stored_token(store: &Arc<MemoryStore>) -> Option<String> {
    SessionStore::new(store.clone()).get().map(|s| s.token)
}

/// Anonymous-session endpoint handing out `token`.
#[allow(dead_code)]
pub async fn mock_session<'a>(server: &'a MockServer, token: &str) -> Mock<'a> {
    mock_session_delayed(server, token, Duration::ZERO).await
}

#[allow(dead_code)]
pub async fn mock_session_delayed<'a>(
    server: &'a MockServer,
    token: &str,
    delay: Duration,
) -> Mock<'a> {
    let body = json!({ "token": token, "user_id": "demo_user" });
    server
        .mock_async(move |when, then| {
            when.method(POST).path("/auth/anonymous-session");
            then.status(200).json_body(body).delay(delay);
        })
        .await
}

/// Catch-all mock for asserting that nothing was sent.
#[allow(dead_code)]
pub async fn mock_any(server: &MockServer) -> Mock<'_> {
    server
        .mock_async(|_when, then| {
            then.status(500);
        })
        .await
}

/// A local address nothing is listening on.
#[allow(dead_code)]
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let port = listener.local_addr().expect("No local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

#[allow(dead_code)]
pub fn meal_json(id: &str) -> serde_json::Value {
    json!({
        "meal_id": id,
        "timestamp": "2024-05-01T12:00:00",
        "source": "text",
        "original_input": "2 eggs",
        "foods": [{
            "name": "egg", "grams": 100, "calories": 155,
            "protein_g": 13, "carbs_g": 1.1, "fat_g": 11,
            "model_label": "egg", "confidence": 0.9
        }],
        "total_calories": 155,
        "total_macros": { "protein_g": 13, "carbs_g": 1.1, "fat_g": 11 },
        "confidence_score": 0.9
    })
}
