//! # Default authorities converter
//!
//! The mapper unions its client-role authorities with whatever a *default*
//! converter derives from the generic OAuth2 claims. That converter is a
//! collaborator, injected through [`AuthoritiesConverter`].
//!
//! [`ScopeAuthorities`] is the standard resource-server rule:
//! the first present claim among `scope` and `scp` is read, either as a
//! space-delimited string or as an array of strings, and every entry becomes
//! `SCOPE_<entry>`.

use serde_json::Value;
use tracing::warn;

use crate::auth::authority::{Authority, AuthoritySet};
use crate::claims::{ClaimSet, as_string_list};

/// Claims inspected by [`ScopeAuthorities`], in priority order.
pub const SCOPE_CLAIMS: [&str; 2] = ["scope", "scp"];

/// Derives baseline authorities from a claim set.
///
/// Any `Fn(&ClaimSet) -> AuthoritySet` closure is a converter.
pub trait AuthoritiesConverter: Send + Sync {
    fn convert(&self, claims: &ClaimSet) -> AuthoritySet;
}

impl<F> AuthoritiesConverter for F
where
    F: Fn(&ClaimSet) -> AuthoritySet + Send + Sync,
{
    fn convert(&self, claims: &ClaimSet) -> AuthoritySet {
        self(claims)
    }
}

/// Maps `scope` / `scp` entries to `SCOPE_` authorities.
///
/// # Example
/// ```
/// use kc_guard::auth::scope::{AuthoritiesConverter, ScopeAuthorities};
/// use kc_guard::claims::ClaimSet;
/// use serde_json::json;
///
/// let claims = ClaimSet::try_from(json!({ "scope": "openid email" })).unwrap();
/// let authorities = ScopeAuthorities.convert(&claims);
///
/// assert!(authorities.contains("SCOPE_openid"));
/// assert!(authorities.contains("SCOPE_email"));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct ScopeAuthorities;

impl AuthoritiesConverter for ScopeAuthorities {
    fn convert(&self, claims: &ClaimSet) -> AuthoritySet {
        let Some((name, value)) = SCOPE_CLAIMS
            .iter()
            .find_map(|name| claims.get(name).map(|v| (*name, v)))
        else {
            return AuthoritySet::new();
        };

        match value {
            Value::String(s) => s.split_whitespace().map(Authority::scope).collect(),
            other => match as_string_list(name, other) {
                Ok(scopes) => scopes.into_iter().map(Authority::scope).collect(),
                Err(err) => {
                    warn!(error = %err, "ignoring malformed scope claim");
                    AuthoritySet::new()
                }
            },
        }
    }
}

/// Contributes nothing; for pipelines that rely on client roles only.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoAuthorities;

impl AuthoritiesConverter for NoAuthorities {
    fn convert(&self, _claims: &ClaimSet) -> AuthoritySet {
        AuthoritySet::new()
    }
}
