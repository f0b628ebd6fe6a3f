//! # User administration errors
//!
//! [`AdminError`] covers the user-management endpoints: the caller's own
//! authentication, and the identity provider's answers to admin calls.
//!
//! | Variant | Status | Body `error` |
//! |---------|--------|--------------|
//! | `Auth` | as [`AuthError`] | as [`AuthError`] |
//! | `NotFound` | 404 | `not_found` |
//! | `Conflict` | 409 | `conflict` |
//! | `Upstream`, `MalformedResponse`, `Transport` | 502 | `upstream_error` |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::warn;

use crate::error::AuthError;

#[derive(Debug, Error)]
pub enum AdminError {
    /// The caller is unauthenticated or lacks the admin role.
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("user `{0}` not found")]
    NotFound(String),

    /// The identity provider already holds a user with this name.
    #[error("user `{0}` already exists")]
    Conflict(String),

    #[error("identity provider answered {status}")]
    Upstream { status: u16 },

    #[error("identity provider response lacks {0}")]
    MalformedResponse(&'static str),

    #[error("identity provider request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl AdminError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Auth(inner) => inner.status(),
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Upstream { .. } | Self::MalformedResponse(_) | Self::Transport(_) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        if let Self::Auth(inner) = self {
            return inner.into_response();
        }

        let (code, message) = match &self {
            Self::NotFound(_) => ("not_found", self.to_string()),
            Self::Conflict(_) => ("conflict", self.to_string()),
            _ => {
                warn!(error = %self, "identity provider admin call failed");
                ("upstream_error", "identity provider request failed".to_string())
            }
        };

        (self.status(), Json(json!({ "error": code, "message": message }))).into_response()
    }
}
