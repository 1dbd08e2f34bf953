// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Anonymous session credentials.

use serde::{Deserialize, Serialize};

/// Credential pair authenticating every request after bootstrap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Opaque token sent as `X-Auth-Token`
    pub token: String,
    /// Backend user id owning the session
    pub user_id: String,
}

impl Session {
    /// A stored session is only usable with a non-empty token.
    pub fn is_valid(&self) -> bool {
        !self.token.trim().is_empty()
    }
}

/// `POST /auth/anonymous-session` response body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireSession {
    pub token: Option<String>,
    pub user_id: Option<String>,
}

impl WireSession {
    /// Convert to a session, rejecting a response without a token.
    pub fn into_session(self) -> Option<Session> {
        let session = Session {
            token: self.token?,
            user_id: self.user_id.unwrap_or_default(),
        };
        session.is_valid().then_some(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_storage_shape() {
        let session = Session {
            token: "tok".to_string(),
            user_id: "u1".to_string(),
        };
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json, serde_json::json!({"token": "tok", "userId": "u1"}));
    }

    #[test]
    fn test_wire_session_requires_token() {
        let wire: WireSession = serde_json::from_str(r#"{"user_id":"u1"}"#).unwrap();
        assert!(wire.into_session().is_none());

        let wire: WireSession = serde_json::from_str(r#"{"token":"  ","user_id":"u1"}"#).unwrap();
        assert!(wire.into_session().is_none());

        let wire: WireSession =
            serde_json::from_str(r#"{"token":"demo-token","user_id":"demo_user"}"#).unwrap();
        let session = wire.into_session().unwrap();
        assert_eq!(session.token, "demo-token");
        assert_eq!(session.user_id, "demo_user");
    }
}
