// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session gateway for the nutrition backend.
//!
//! Handles:
//! - Anonymous session acquisition (single-flight, persisted)
//! - `X-Auth-Token` decoration of every request
//! - One transparent retry after a 401 with a freshly acquired session
//! - Classification of transport failures as "backend unreachable"

use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::{ImageUpload, Session, WireSession};
use crate::services::single_flight::SingleFlight;
use crate::store::SessionStore;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Header carrying the session token.
pub const AUTH_HEADER: &str = "X-Auth-Token";

/// How many times a request is resent after a 401.
pub const MAX_AUTH_RETRIES: u32 = 1;

const SESSION_PATH: &str = "/auth/anonymous-session";
const HEALTH_PATH: &str = "/health";

/// Longest plain-text error body passed through as a message.
const MAX_TEXT_ERROR_LEN: usize = 200;

// ─────────────────────────────────────────────────────────────────────────────
// Requests
// ─────────────────────────────────────────────────────────────────────────────

/// Request body that can be rebuilt for every attempt.
#[derive(Debug, Clone)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    /// Multipart upload in field `file`
    File(ImageUpload),
}

/// Owned description of a backend call.
///
/// Kept separate from `reqwest::RequestBuilder` so the same call can be
/// sent again after a session renewal.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append a query parameter.
    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    /// Append a query parameter only when a value is present.
    pub fn query_opt(self, key: &str, value: Option<String>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    /// Attach a JSON body.
    pub fn json<B: Serialize>(mut self, body: &B) -> Result<Self> {
        let value = serde_json::to_value(body)
            .map_err(|e| ApiError::Internal(format!("failed to encode request body: {}", e)))?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    /// Attach a multipart file upload.
    pub fn file(mut self, upload: ImageUpload) -> Self {
        self.body = RequestBody::File(upload);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn body(&self) -> &RequestBody {
        &self.body
    }
}

/// Build a path from a collection and a percent-encoded id.
pub fn resource_path(collection: &str, id: &str) -> String {
    format!("{}/{}", collection, urlencoding::encode(id))
}

// ─────────────────────────────────────────────────────────────────────────────
// SessionGateway
// ─────────────────────────────────────────────────────────────────────────────

/// Everything a session acquisition needs, cloned out of the gateway so the
/// pending future does not keep the gateway itself alive.
#[derive(Clone)]
struct Acquirer {
    http: reqwest::Client,
    base_url: String,
    sessions: SessionStore,
    epoch: Arc<AtomicU64>,
}

struct GatewayInner {
    acquirer: Acquirer,
    acquisition: SingleFlight<Session>,
}

/// Gateway that attaches a valid session token to every backend call.
///
/// Cheap to clone; clones share the session state.
#[derive(Clone)]
pub struct SessionGateway {
    inner: Arc<GatewayInner>,
}

impl SessionGateway {
    /// Create a gateway with the configured timeout.
    pub fn new(config: &Config, sessions: SessionStore) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ApiError::Internal(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(http, &config.backend_url, sessions))
    }

    /// Create a gateway around an existing HTTP client.
    pub fn with_client(http: reqwest::Client, base_url: &str, sessions: SessionStore) -> Self {
        Self {
            inner: Arc::new(GatewayInner {
                acquirer: Acquirer {
                    http,
                    base_url: base_url.trim_end_matches('/').to_string(),
                    sessions,
                    epoch: Arc::new(AtomicU64::new(0)),
                },
                acquisition: SingleFlight::new(),
            }),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.inner.acquirer.base_url
    }

    /// Currently stored session, if any.
    pub fn session(&self) -> Option<Session> {
        self.inner.acquirer.sessions.get()
    }

    // ─── Session Management ──────────────────────────────────────────────────

    /// Return a usable token, acquiring a session if none is stored.
    ///
    /// Concurrent callers share a single acquisition request.
    pub async fn ensure_session(&self) -> Result<String> {
        self.current_session().await.map(|session| session.token)
    }

    async fn current_session(&self) -> Result<Session> {
        if let Some(session) = self.inner.acquirer.sessions.get() {
            return Ok(session);
        }

        let acquirer = self.inner.acquirer.clone();
        self.inner
            .acquisition
            .run(move || acquirer.acquire())
            .await
    }

    /// Forget the current session immediately.
    ///
    /// A pending acquisition is detached and its result will not be stored.
    pub fn logout(&self) {
        self.inner.acquirer.epoch.fetch_add(1, Ordering::SeqCst);
        self.inner.acquisition.reset();
        self.inner.acquirer.sessions.clear();
        tracing::info!("Session cleared");
    }

    /// Check whether the backend answers its health endpoint.
    pub async fn ping(&self) -> bool {
        let url = format!("{}{}", self.base_url(), HEALTH_PATH);
        match self.inner.acquirer.http.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!(error = %e, "Health check failed");
                false
            }
        }
    }

    // ─── Requests ────────────────────────────────────────────────────────────

    /// Send an authenticated request.
    ///
    /// Any response other than 401 is returned as-is for the caller to
    /// interpret. A 401 triggers one session renewal and resend; a second
    /// 401 clears the session and fails with `AuthRequired`.
    pub async fn send(&self, request: &ApiRequest) -> Result<reqwest::Response> {
        self.send_with_retries(request, MAX_AUTH_RETRIES).await
    }

    async fn send_with_retries(
        &self,
        request: &ApiRequest,
        max_retries: u32,
    ) -> Result<reqwest::Response> {
        let mut retries = 0;
        loop {
            let session = self.current_session().await?;
            let response = self.dispatch(request, &session.token).await?;

            if response.status() != StatusCode::UNAUTHORIZED {
                return Ok(response);
            }

            // Only drop the session we actually used; a concurrent request
            // may already have replaced it.
            self.inner.acquirer.sessions.clear_if_token(&session.token);

            if retries >= max_retries {
                let body = response.text().await.unwrap_or_default();
                let reason = extract_message(&body)
                    .unwrap_or_else(|| "session rejected by backend".to_string());
                tracing::warn!(
                    method = %request.method,
                    path = %request.path,
                    retries,
                    "Request rejected after session renewal"
                );
                return Err(ApiError::AuthRequired(reason));
            }

            retries += 1;
            tracing::info!(
                method = %request.method,
                path = %request.path,
                "Session rejected (401), acquiring a new one"
            );
        }
    }

    /// Send an authenticated request and decode a successful JSON body.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        request: &ApiRequest,
        operation: &str,
    ) -> Result<T> {
        let response = self.send(request).await?;
        read_json(response, operation).await
    }

    /// Send an authenticated request whose success body is ignored.
    pub async fn execute(&self, request: &ApiRequest, operation: &str) -> Result<()> {
        let response = self.send(request).await?;
        expect_success(response, operation).await
    }

    /// Single attempt: build the HTTP request, attach the token, send it.
    async fn dispatch(&self, request: &ApiRequest, token: &str) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url(), request.path);
        let mut builder = self
            .inner
            .acquirer
            .http
            .request(request.method.clone(), &url)
            .header(AUTH_HEADER, token);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::File(upload) => {
                let part = reqwest::multipart::Part::bytes(upload.bytes.clone())
                    .file_name(upload.file_name.clone())
                    .mime_str(&upload.mime_type)
                    .map_err(|e| {
                        ApiError::Validation(format!(
                            "invalid image type {:?}: {}",
                            upload.mime_type, e
                        ))
                    })?;
                builder.multipart(reqwest::multipart::Form::new().part("file", part))
            }
        };

        let response = builder
            .send()
            .await
            .map_err(|e| transport_error(self.base_url(), &e))?;

        tracing::debug!(
            method = %request.method,
            path = %request.path,
            status = response.status().as_u16(),
            "Backend response"
        );
        Ok(response)
    }
}

impl Acquirer {
    /// Request a new anonymous session and persist it.
    async fn acquire(self) -> Result<Session> {
        // Another flight may have finished between our store check and
        // starting this one.
        if let Some(existing) = self.sessions.get() {
            return Ok(existing);
        }

        let epoch = self.epoch.load(Ordering::SeqCst);
        match self.request_session().await {
            Ok(session) => {
                if self.epoch.load(Ordering::SeqCst) != epoch {
                    tracing::info!("Session acquired after logout, not storing it");
                    return Ok(session);
                }
                if let Err(e) = self.sessions.set(&session) {
                    tracing::warn!(
                        error = %e,
                        "Failed to persist session, using it for this request only"
                    );
                }
                tracing::info!(user_id = %session.user_id, "Anonymous session acquired");
                Ok(session)
            }
            Err(e) => {
                self.sessions.clear();
                tracing::warn!(error = %e, "Session acquisition failed");
                Err(e)
            }
        }
    }

    async fn request_session(&self) -> Result<Session> {
        let url = format!("{}{}", self.base_url, SESSION_PATH);
        let response = self
            .http
            .post(&url)
            .send()
            .await
            .map_err(|e| transport_error(&self.base_url, &e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(&self.base_url, &e))?;

        if !status.is_success() {
            let reason = extract_message(&body)
                .unwrap_or_else(|| format!("session request failed with HTTP {}", status.as_u16()));
            return Err(ApiError::AuthRequired(reason));
        }

        serde_json::from_str::<WireSession>(&body)
            .ok()
            .and_then(WireSession::into_session)
            .ok_or_else(|| {
                ApiError::AuthRequired("session response did not contain a token".to_string())
            })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Response helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Map a failure with no HTTP response.
fn transport_error(base_url: &str, err: &reqwest::Error) -> ApiError {
    if err.is_builder() {
        return ApiError::Internal(format!("invalid request: {}", err));
    }
    if err.is_timeout() {
        return ApiError::Unreachable(format!("request to {} timed out", base_url));
    }
    ApiError::Unreachable(format!("cannot reach backend at {}: {}", base_url, err))
}

/// Check status and decode a JSON body.
pub(crate) async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
    operation: &str,
) -> Result<T> {
    let status = response.status();
    let body = response.text().await.map_err(|e| {
        ApiError::Unreachable(format!("failed to read response to {}: {}", operation, e))
    })?;

    if !status.is_success() {
        return Err(backend_error(status, &body, operation));
    }

    serde_json::from_str(&body).map_err(|e| ApiError::Decode(format!("{}: {}", operation, e)))
}

/// Check status, discarding the body on success.
pub(crate) async fn expect_success(response: reqwest::Response, operation: &str) -> Result<()> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let body = response.text().await.unwrap_or_default();
    Err(backend_error(status, &body, operation))
}

/// Error for a non-success response, preferring the backend's own message.
pub(crate) fn backend_error(status: StatusCode, body: &str, operation: &str) -> ApiError {
    let message = extract_message(body)
        .unwrap_or_else(|| format!("Failed to {} (HTTP {})", operation, status.as_u16()));
    tracing::debug!(status = status.as_u16(), %message, operation, "Backend error");
    ApiError::Backend {
        status: status.as_u16(),
        message,
    }
}

/// Pull a human-readable message out of an error body.
///
/// Understands `{"detail": "..."}`, `{"detail": [{"msg": "..."}]}`,
/// `{"message": "..."}` and `{"error": "..."}`; short plain-text bodies are
/// passed through.
pub(crate) fn extract_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(map)) => {
            let from_detail = match map.get("detail") {
                Some(serde_json::Value::String(s)) => Some(s.clone()),
                Some(serde_json::Value::Array(items)) => items
                    .iter()
                    .find_map(|item| item.get("msg").and_then(|m| m.as_str()))
                    .map(str::to_string),
                _ => None,
            };
            from_detail
                .or_else(|| map.get("message").and_then(|m| m.as_str()).map(str::to_string))
                .or_else(|| map.get("error").and_then(|m| m.as_str()).map(str::to_string))
                .filter(|m| !m.trim().is_empty())
        }
        Ok(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s),
        Ok(_) => None,
        Err(_) => {
            let plain = body.len() <= MAX_TEXT_ERROR_LEN
                && !body.starts_with('<')
                && !body.contains('\n');
            plain.then(|| body.to_string())
        }
    }
}
