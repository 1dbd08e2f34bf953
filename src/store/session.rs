// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Persisted session credentials.

use super::{keys, KeyValueStore};
use crate::error::{ApiError, Result};
use crate::models::Session;
use std::sync::Arc;

/// Holds the single stored session.
///
/// Reads never fail: a missing, unreadable or malformed entry is reported as
/// `None` so the caller simply acquires a new session.
#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Read the persisted session, if any.
    pub fn get(&self) -> Option<Session> {
        let raw = match self.backend.get(keys::SESSION) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored session");
                return None;
            }
        };

        match serde_json::from_str::<Session>(&raw) {
            Ok(session) if session.is_valid() => Some(session),
            Ok(_) => {
                tracing::warn!("Stored session has an empty token, ignoring it");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to parse stored session, ignoring it");
                None
            }
        }
    }

    /// Persist a session, replacing any existing one.
    pub fn set(&self, session: &Session) -> Result<()> {
        let raw = serde_json::to_string(session)
            .map_err(|e| ApiError::Storage(format!("failed to encode session: {}", e)))?;
        self.backend.set(keys::SESSION, &raw)
    }

    /// Remove the persisted session. Safe to call when nothing is stored.
    pub fn clear(&self) {
        if let Err(e) = self.backend.remove(keys::SESSION) {
            tracing::warn!(error = %e, "Failed to clear stored session");
        }
    }

    /// Remove the session only if it still carries `token`.
    ///
    /// Returns whether a session was removed.
    pub fn clear_if_token(&self, token: &str) -> bool {
        match self.get() {
            Some(current) if current.token == token => {
                self.clear();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn session(token: &str) -> Session {
        Session {
            token: token.to_string(),
            user_id: "user-1".to_string(),
        }
    }

    #[test]
    fn test_get_set_clear() {
        let store = SessionStore::new(Arc::new(MemoryStore::new()));
        assert_eq!(store.get(), None);

        store.set(&session("a")).unwrap();
        store.set(&session("b")).unwrap();
        assert_eq!(store.get(), Some(session("b")));

        store.clear();
        store.clear();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_malformed_entries_read_as_absent() {
        let backend = Arc::new(MemoryStore::new());
        let store = SessionStore::new(backend.clone());

        backend.set(keys::SESSION, "not json").unwrap();
        assert_eq!(store.get(), None);

        backend.set(keys::SESSION, r#"{"userId":"u"}"#).unwrap();
        assert_eq!(store.get(), None);

        backend
            .set(keys::SESSION, r#"{"token":"","userId":"u"}"#)
            .unwrap();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_clear_if_token_only_removes_matching() {
        let store = SessionStore::new(Arc::new(MemoryStore::new()));
        store.set(&session("fresh")).unwrap();

        assert!(!store.clear_if_token("stale"));
        assert_eq!(store.get(), Some(session("fresh")));

        assert!(store.clear_if_token("fresh"));
        assert_eq!(store.get(), None);
    }
}
