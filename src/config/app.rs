//! # Application Configuration Loader
//!
//! Gathers everything the resource-server guard needs: how tokens are
//! verified and how their claims are mapped.
//!
//! Automatically loads `.env` files for non-production environments.
//! It checks for a custom `DOTENV_FILE` path first, then falls back to
//! `.env.{APP_ENV}` or `.env`.
//!
//! # Environment Variables
//! | Variable | Description | Default |
//! |-----------|-------------|----------|
//! | `APP_ENV` | Current environment (`development`, `production`, etc.) | `"development"` |
//! | `DOTENV_FILE` | Optional path to a custom dotenv file | *none* |
//! | `KEYCLOAK_CLIENT_ID` | Client whose roles are granted | *required* |
//! | `KEYCLOAK_SUBJECT_CLAIM` | Claim preferred as subject | `"sub"` |
//! | `JWT_SECRET` | HS256 shared secret | *one key source required* |
//! | `JWT_PUBLIC_KEY_PEM` | RS256 public key (PEM text) | |
//! | `JWT_PUBLIC_KEY_FILE` | RS256 public key (PEM file path) | |
//! | `JWT_ISSUER` | Expected `iss` | unchecked |
//! | `JWT_AUDIENCE` | Expected `aud` | unchecked |
//! | `JWT_LEEWAY_SECS` | Clock skew tolerance | `60` |
//! | `KEYCLOAK_SERVER_URL` and `KEYCLOAK_ADMIN_*` | User-management facade, see [`crate::config::admin`] | disabled |
//!
//! # Example
//! ```rust,no_run
//! use std::sync::Arc;
//! use kc_guard::auth::TokenAuthenticator;
//! use kc_guard::config::app::AppConfig;
//!
//! let cfg = AppConfig::from_env().expect("invalid configuration");
//! let authenticator = Arc::new(TokenAuthenticator::from_config(&cfg).expect("bad key"));
//! let app = kc_guard::web::router(authenticator);
//! ```

use std::env;

use crate::auth::mapper::MapperConfig;
use crate::config::{admin::AdminConfig, claims::mapper_config_from_env_with, jwt::JwtConfig};
use crate::error::ConfigError;

/// Top-level application configuration.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Claim mapping (client id, subject claim).
    pub mapper: MapperConfig,
    /// Token verification (key, issuer, audience, leeway).
    pub jwt: JwtConfig,
    /// Admin API access for the user-management endpoints, when enabled.
    pub admin: Option<AdminConfig>,
}

impl AppConfig {
    /// Loads application configuration from environment variables.
    ///
    /// ## Behavior
    /// - Reads `APP_ENV` (defaults to `"development"`).
    /// - Loads `.env` or `.env.{APP_ENV}` for non-production environments.
    /// - Fails fast when a required variable or the verification key is missing.
    pub fn from_env() -> Result<Self, ConfigError> {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());

        if app_env != "production" {
            if let Ok(path) = env::var("DOTENV_FILE") {
                let _ = dotenvy::from_filename(path);
            } else {
                let candidate = format!(".env.{}", app_env);
                dotenvy::from_filename(&candidate)
                    .or_else(|_| dotenvy::dotenv())
                    .ok();
            }
        }

        Self::from_env_with(|k| env::var(k).ok())
    }

    /// Builds configuration from a custom key provider, without dotenv loading.
    pub fn from_env_with<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(AppConfig {
            mapper: mapper_config_from_env_with(&get)?,
            jwt: JwtConfig::from_env_with(&get)?,
            admin: AdminConfig::from_env_with(&get)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::jwt::VerificationKey;
    use temp_env;

    #[test]
    fn from_env_reads_mapper_and_jwt_settings() {
        temp_env::with_vars(
            vec![
                ("APP_ENV", Some("production")),
                ("KEYCLOAK_CLIENT_ID", Some("my-app")),
                ("KEYCLOAK_SUBJECT_CLAIM", Some("preferred_username")),
                ("JWT_SECRET", Some("env-secret")),
                ("JWT_PUBLIC_KEY_PEM", None),
                ("JWT_PUBLIC_KEY_FILE", None),
                ("KEYCLOAK_SERVER_URL", None),
            ],
            || {
                let cfg = AppConfig::from_env().unwrap();

                assert_eq!(cfg.mapper.client_id, "my-app");
                assert_eq!(cfg.mapper.subject_claim, "preferred_username");
                assert_eq!(cfg.jwt.key, VerificationKey::Secret("env-secret".into()));
                assert!(cfg.admin.is_none());
            },
        );
    }

    #[test]
    fn from_env_enables_admin_facade_when_server_url_is_set() {
        temp_env::with_vars(
            vec![
                ("APP_ENV", Some("production")),
                ("KEYCLOAK_CLIENT_ID", Some("my-app")),
                ("JWT_SECRET", Some("env-secret")),
                ("KEYCLOAK_SERVER_URL", Some("http://localhost:8080")),
                ("KEYCLOAK_REALM", Some("demo")),
                ("KEYCLOAK_ADMIN_USERNAME", Some("admin")),
                ("KEYCLOAK_ADMIN_PASSWORD", Some("admin-pass")),
            ],
            || {
                let admin = AppConfig::from_env().unwrap().admin.unwrap();

                assert_eq!(admin.realm, "demo");
                assert_eq!(admin.admin_realm, "master");
            },
        );
    }

    #[test]
    fn from_env_fails_without_client_id() {
        temp_env::with_vars(
            vec![
                ("APP_ENV", Some("production")),
                ("KEYCLOAK_CLIENT_ID", None),
                ("JWT_SECRET", Some("env-secret")),
            ],
            || {
                let err = AppConfig::from_env().unwrap_err();
                assert!(matches!(err, ConfigError::MissingVar("KEYCLOAK_CLIENT_ID")));
            },
        );
    }

    #[test]
    fn from_env_with_fails_without_key() {
        let err = AppConfig::from_env_with(|k| {
            (k == "KEYCLOAK_CLIENT_ID").then(|| "my-app".to_string())
        })
        .unwrap_err();

        assert!(matches!(err, ConfigError::MissingKey));
    }
}
