//! # Authentication / authorization errors
//!
//! [`AuthError`] is the single failure type of the bearer-token pipeline.
//! It converts directly into an HTTP response:
//!
//! | Variant | Status | Body `error` |
//! |---------|--------|--------------|
//! | `MissingToken` | 401 | `missing_token` |
//! | `InvalidToken` | 401 | `invalid_token` |
//! | `MissingSubject` | 401 | `invalid_token` |
//! | `Forbidden` | 403 | `access_denied` |
//!
//! 401 responses carry `WWW-Authenticate: Bearer`. Verification details stay
//! in the logs and are never echoed to the client.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// No `Authorization: Bearer ...` header on the request.
    #[error("bearer token missing")]
    MissingToken,

    /// Signature, expiry, issuer or audience check failed.
    #[error("bearer token rejected: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    /// Neither the configured subject claim nor `sub` is present.
    #[error("token carries no subject claim")]
    MissingSubject,

    /// Authenticated, but lacking every one of the required authorities.
    #[error("access denied: requires one of {required:?}")]
    Forbidden { required: Vec<String> },
}

impl AuthError {
    /// Builds a [`AuthError::Forbidden`] from role names (without prefix).
    pub fn forbidden_roles<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::Forbidden {
            required: roles
                .into_iter()
                .map(|r| format!("{}{}", crate::auth::authority::ROLE_PREFIX, r.as_ref()))
                .collect(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    /// Stable machine-readable code used in the response body.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingToken => "missing_token",
            Self::InvalidToken(_) | Self::MissingSubject => "invalid_token",
            Self::Forbidden { .. } => "access_denied",
        }
    }

    fn public_message(&self) -> &'static str {
        match self {
            Self::MissingToken => "authentication required",
            Self::InvalidToken(_) | Self::MissingSubject => "bearer token rejected",
            Self::Forbidden { .. } => "insufficient authority",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "error": self.code(),
            "message": self.public_message(),
        }));

        if status == StatusCode::UNAUTHORIZED {
            (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response()
        } else {
            (status, body).into_response()
        }
    }
}
