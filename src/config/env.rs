//! # Environment Variable Utilities
//!
//! Small helpers shared by the configuration loaders. Each reader takes a
//! provider function so tests never touch the real process environment.
//!
//! # Examples
//! ```rust
//! use kc_guard::config::env::{non_empty, read_u32_from};
//!
//! let leeway = read_u32_from(|_| Some(" 30 ".into()), "JWT_LEEWAY_SECS", 60);
//! assert_eq!(leeway, 30);
//!
//! assert_eq!(non_empty(Some("  ".into())), None);
//! ```

use crate::error::ConfigError;

/// Trims the value and drops it when nothing is left.
///
/// Surrounding quotes are stripped too, since `.env` files often carry them.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().trim_matches(|c| c == '"' || c == '\'').to_string())
        .filter(|v| !v.is_empty())
}

/// Reads a required, non-empty variable.
///
/// # Errors
/// - [`ConfigError::MissingVar`] when unset
/// - [`ConfigError::EmptyVar`] when set to blank
pub fn require_from<F>(provider: F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = provider(name).ok_or(ConfigError::MissingVar(name))?;
    non_empty(Some(raw)).ok_or(ConfigError::EmptyVar(name))
}

/// Reads an unsigned integer (`u32`), returning `default` if missing or
/// unparsable.
pub fn read_u32_from<F>(provider: F, name: &str, default: u32) -> u32
where
    F: Fn(&str) -> Option<String>,
{
    provider(name)
        .and_then(|s| s.trim().parse::<u32>().ok())
        .unwrap_or(default)
}
