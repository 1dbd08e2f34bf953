// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client error types shared by the gateway, stores and resource clients.

/// Error returned by every fallible client operation.
///
/// `Clone` so a single session-acquisition outcome can be handed to every
/// caller waiting on it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("Authentication required: {0}")]
    AuthRequired(String),

    #[error("Backend unreachable: {0}")]
    Unreachable(String),

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("{message}")]
    Backend { status: u16, message: String },

    #[error("Unexpected response body: {0}")]
    Decode(String),

    #[error("Local storage error: {0}")]
    Storage(String),

    #[error("Internal client error: {0}")]
    Internal(String),
}

impl ApiError {
    /// True when the caller must start a fresh session/login flow.
    pub fn is_auth_required(&self) -> bool {
        matches!(self, ApiError::AuthRequired(_))
    }

    /// True when no HTTP response was received (connect error or timeout).
    pub fn is_unreachable(&self) -> bool {
        matches!(self, ApiError::Unreachable(_))
    }

    /// HTTP status reported by the backend, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Backend { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Short message suitable for showing to an end user.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::AuthRequired(_) => "Your session has expired. Please sign in again.".into(),
            ApiError::Unreachable(_) => {
                "Cannot reach the server. Check your connection and try again.".into()
            }
            ApiError::Validation(msg) => msg.clone(),
            ApiError::Backend { message, .. } => message.clone(),
            ApiError::Decode(_) | ApiError::Storage(_) | ApiError::Internal(_) => {
                "Something went wrong. Please try again.".into()
            }
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        // Report the first failing field by name; messages are attached on
        // the derive.
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|(a, _), (b, _)| a.cmp(b));
        let message = fields
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field))
                })
            })
            .next()
            .unwrap_or_else(|| "request is invalid".to_string());
        ApiError::Validation(message)
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ApiError>;
