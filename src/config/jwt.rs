//! # Token verification configuration
//!
//! Reads how bearer tokens are verified:
//! - `JWT_SECRET`: HS256 shared secret
//! - `JWT_PUBLIC_KEY_PEM`: RS256 public key as PEM text (the realm key)
//! - `JWT_PUBLIC_KEY_FILE`: path to a PEM file, read at load time
//! - `JWT_ISSUER`: expected `iss` (unchecked when unset)
//! - `JWT_AUDIENCE`: expected `aud` (unchecked when unset)
//! - `JWT_LEEWAY_SECS`: clock skew tolerance, default `60`
//!
//! When several key sources are set, the secret wins, then the PEM text.

use std::fmt;

use crate::config::env::{non_empty, read_u32_from};
use crate::error::ConfigError;

pub const DEFAULT_LEEWAY_SECS: u32 = 60;

/// Key material used to check token signatures.
#[derive(Clone, PartialEq, Eq)]
pub enum VerificationKey {
    /// HS256 shared secret.
    Secret(String),
    /// RS256 public key, PEM encoded.
    RsaPublicPem(String),
}

// Key material stays out of logs.
impl fmt::Debug for VerificationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Secret(_) => f.write_str("Secret(<redacted>)"),
            Self::RsaPublicPem(_) => f.write_str("RsaPublicPem(..)"),
        }
    }
}

/// Verification settings for incoming bearer tokens.
///
/// # Example
/// ```rust
/// use kc_guard::config::jwt::{JwtConfig, VerificationKey};
///
/// let cfg = JwtConfig::from_env_with(|k| match k {
///     "JWT_SECRET" => Some("s3cret".into()),
///     "JWT_ISSUER" => Some("https://idp.example/realms/demo".into()),
///     _ => None,
/// })
/// .unwrap();
///
/// assert_eq!(cfg.key, VerificationKey::Secret("s3cret".into()));
/// assert_eq!(cfg.leeway_secs, 60);
/// assert!(cfg.audience.is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JwtConfig {
    pub key: VerificationKey,
    pub issuer: Option<String>,
    pub audience: Option<String>,
    pub leeway_secs: u64,
}

impl JwtConfig {
    /// HS256 configuration with no issuer or audience checks.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            key: VerificationKey::Secret(secret.into()),
            issuer: None,
            audience: None,
            leeway_secs: DEFAULT_LEEWAY_SECS as u64,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Loads configuration using a custom key provider (for testing/mocking).
    pub fn from_env_with<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let key = if let Some(secret) = non_empty(get("JWT_SECRET")) {
            VerificationKey::Secret(secret)
        } else if let Some(pem) = non_empty(get("JWT_PUBLIC_KEY_PEM")) {
            VerificationKey::RsaPublicPem(pem)
        } else if let Some(path) = non_empty(get("JWT_PUBLIC_KEY_FILE")) {
            let pem = std::fs::read_to_string(&path)
                .map_err(|source| ConfigError::Io { path, source })?;
            VerificationKey::RsaPublicPem(pem)
        } else {
            return Err(ConfigError::MissingKey);
        };

        Ok(Self {
            key,
            issuer: non_empty(get("JWT_ISSUER")),
            audience: non_empty(get("JWT_AUDIENCE")),
            leeway_secs: read_u32_from(&get, "JWT_LEEWAY_SECS", DEFAULT_LEEWAY_SECS) as u64,
        })
    }
}
