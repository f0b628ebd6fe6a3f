//! # Identity-provider admin configuration
//!
//! Settings for the user-management endpoints. The facade is optional: when
//! `KEYCLOAK_SERVER_URL` is unset, [`AdminConfig::from_env_with`] returns
//! `Ok(None)` and only the guarded test endpoints are served.
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `KEYCLOAK_SERVER_URL` | Base URL, e.g. `http://localhost:8080` | *enables the facade* |
//! | `KEYCLOAK_REALM` | Realm whose users are managed | *required* |
//! | `KEYCLOAK_ADMIN_REALM` | Realm the admin account logs into | `"master"` |
//! | `KEYCLOAK_ADMIN_CLIENT_ID` | Client used for the admin login | `"admin-cli"` |
//! | `KEYCLOAK_ADMIN_USERNAME` | Admin account name | *required* |
//! | `KEYCLOAK_ADMIN_PASSWORD` | Admin account password | *required* |
//! | `KEYCLOAK_ADMIN_CLIENT_SECRET` | Secret for a confidential admin client | *none* |
//! | `KEYCLOAK_ADMIN_TIMEOUT_SECS` | Per-request timeout | `10` |

use std::fmt;

use crate::config::env::{non_empty, read_u32_from, require_from};
use crate::error::ConfigError;

pub const DEFAULT_ADMIN_REALM: &str = "master";
pub const DEFAULT_ADMIN_CLIENT_ID: &str = "admin-cli";
pub const DEFAULT_TIMEOUT_SECS: u32 = 10;

/// Connection and credentials for the identity provider's admin API.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminConfig {
    /// Base URL without trailing slash.
    pub server_url: String,
    pub realm: String,
    pub admin_realm: String,
    pub client_id: String,
    pub username: String,
    pub password: String,
    pub client_secret: Option<String>,
    pub timeout_secs: u64,
}

impl fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminConfig")
            .field("server_url", &self.server_url)
            .field("realm", &self.realm)
            .field("admin_realm", &self.admin_realm)
            .field("client_id", &self.client_id)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("client_secret", &self.client_secret.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl AdminConfig {
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Loads configuration using a custom key provider (for testing/mocking).
    ///
    /// ## Errors
    /// Once `KEYCLOAK_SERVER_URL` is set, a missing realm, admin username or
    /// admin password is reported instead of silently disabling the facade.
    pub fn from_env_with<F>(get: F) -> Result<Option<Self>, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let Some(server_url) = non_empty(get("KEYCLOAK_SERVER_URL")) else {
            return Ok(None);
        };

        Ok(Some(Self {
            server_url: server_url.trim_end_matches('/').to_string(),
            realm: require_from(&get, "KEYCLOAK_REALM")?,
            admin_realm: non_empty(get("KEYCLOAK_ADMIN_REALM"))
                .unwrap_or_else(|| DEFAULT_ADMIN_REALM.into()),
            client_id: non_empty(get("KEYCLOAK_ADMIN_CLIENT_ID"))
                .unwrap_or_else(|| DEFAULT_ADMIN_CLIENT_ID.into()),
            username: require_from(&get, "KEYCLOAK_ADMIN_USERNAME")?,
            password: require_from(&get, "KEYCLOAK_ADMIN_PASSWORD")?,
            client_secret: non_empty(get("KEYCLOAK_ADMIN_CLIENT_SECRET")),
            timeout_secs: read_u32_from(&get, "KEYCLOAK_ADMIN_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)
                as u64,
        }))
    }
}
