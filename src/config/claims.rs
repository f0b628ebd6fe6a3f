//! # Claim mapping configuration
//!
//! Selects which parts of the identity provider's token the mapper reads:
//! - `KEYCLOAK_CLIENT_ID`: client whose `resource_access` roles are granted (required)
//! - `KEYCLOAK_SUBJECT_CLAIM`: claim preferred as the subject (default `sub`)

use crate::auth::mapper::MapperConfig;
use crate::claims::set::SUBJECT;
use crate::config::env::{non_empty, require_from};
use crate::error::ConfigError;

/// Loads a [`MapperConfig`] from environment variables.
///
/// # Example
/// ```rust
/// use kc_guard::config::claims::mapper_config_from_env_with;
///
/// let cfg = mapper_config_from_env_with(|k| match k {
///     "KEYCLOAK_CLIENT_ID" => Some("my-app".into()),
///     "KEYCLOAK_SUBJECT_CLAIM" => Some("preferred_username".into()),
///     _ => None,
/// })
/// .unwrap();
///
/// assert_eq!(cfg.client_id, "my-app");
/// assert_eq!(cfg.subject_claim, "preferred_username");
/// ```
pub fn mapper_config_from_env_with<F>(get: F) -> Result<MapperConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let client_id = require_from(&get, "KEYCLOAK_CLIENT_ID")?;
    let subject_claim =
        non_empty(get("KEYCLOAK_SUBJECT_CLAIM")).unwrap_or_else(|| SUBJECT.to_string());

    Ok(MapperConfig {
        client_id,
        subject_claim,
    })
}

pub fn mapper_config_from_env() -> Result<MapperConfig, ConfigError> {
    mapper_config_from_env_with(|k| std::env::var(k).ok())
}
