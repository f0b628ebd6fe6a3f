//! # Claims Authority Mapper
//!
//! Turns a verified token's claims into the `(authorities, subject)` pair the
//! authorization layer works with.
//!
//! Client roles are read from the identity provider's per-client block:
//!
//! ```json
//! {
//!   "resource_access": {
//!     "my-app": { "roles": ["admin_client", "user_client"] }
//!   }
//! }
//! ```
//!
//! and each role becomes `ROLE_<role>`. These are unioned with whatever the
//! injected [`AuthoritiesConverter`] derives (by default `SCOPE_*` from the
//! `scope` claim).
//!
//! ## Degradation rules
//! - `resource_access`, the client entry or `roles` missing: no roles, no error
//! - any of those present with the wrong shape: logged at `warn`, no roles;
//!   the scope authorities still apply
//!
//! The mapper is pure and holds no mutable state, so one instance can serve
//! every in-flight request.

use tracing::warn;

use crate::auth::authority::{Authority, AuthoritySet};
use crate::auth::principal::AuthenticatedPrincipal;
use crate::auth::scope::{AuthoritiesConverter, ScopeAuthorities};
use crate::claims::set::{SUBJECT, member};
use crate::claims::{ClaimSet, as_mapping, as_string_list};
use crate::error::{AuthError, ClaimShapeError};

pub const RESOURCE_ACCESS: &str = "resource_access";
pub const ROLES: &str = "roles";

/// Which parts of the token the mapper reads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapperConfig {
    /// Identity-provider client whose `resource_access` block holds the roles.
    pub client_id: String,
    /// Claim preferred as the subject identifier; `sub` is the fallback.
    pub subject_claim: String,
}

impl MapperConfig {
    pub fn new(client_id: impl Into<String>, subject_claim: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            subject_claim: subject_claim.into(),
        }
    }
}

/// Reads `resource_access.<client_id>.roles` and prefixes each role.
///
/// Returns an empty set when any level is absent, and an error only when a
/// level exists with the wrong shape.
///
/// # Example
/// ```
/// use kc_guard::auth::mapper::client_roles;
/// use kc_guard::claims::ClaimSet;
/// use serde_json::json;
///
/// let claims = ClaimSet::try_from(json!({
///     "resource_access": { "my-app": { "roles": ["admin_client", "admin_client", "user_client"] } }
/// }))
/// .unwrap();
///
/// let roles = client_roles(&claims, "my-app").unwrap();
/// assert_eq!(roles.to_strings(), vec!["ROLE_admin_client", "ROLE_user_client"]);
///
/// assert!(client_roles(&claims, "other-app").unwrap().is_empty());
/// ```
pub fn client_roles(claims: &ClaimSet, client_id: &str) -> Result<AuthoritySet, ClaimShapeError> {
    let Some(resource_access) = claims.get(RESOURCE_ACCESS) else {
        return Ok(AuthoritySet::new());
    };
    let resource_access = as_mapping(RESOURCE_ACCESS, resource_access)?;

    let Some(client) = member(resource_access, client_id) else {
        return Ok(AuthoritySet::new());
    };
    let client_path = format!("{RESOURCE_ACCESS}.{client_id}");
    let client = as_mapping(&client_path, client)?;

    let Some(roles) = member(client, ROLES) else {
        return Ok(AuthoritySet::new());
    };
    let roles = as_string_list(&format!("{client_path}.{ROLES}"), roles)?;

    Ok(roles.into_iter().map(Authority::role).collect())
}

/// Picks the subject identifier: the configured claim when present and
/// non-null, otherwise the registered `sub` claim.
pub fn resolve_subject(claims: &ClaimSet, subject_claim: &str) -> Option<String> {
    claims
        .get_as_string(subject_claim)
        .or_else(|| claims.get_as_string(SUBJECT))
}

/// Maps verified claims to authorities and a subject.
///
/// # Example
/// ```
/// use kc_guard::auth::mapper::{ClaimsAuthorityMapper, MapperConfig};
/// use kc_guard::claims::ClaimSet;
/// use serde_json::json;
///
/// let mapper = ClaimsAuthorityMapper::new(MapperConfig::new("my-app", "preferred_username"));
/// let claims = ClaimSet::try_from(json!({
///     "sub": "uuid-123",
///     "preferred_username": "alice",
///     "scope": "openid",
///     "resource_access": { "my-app": { "roles": ["user_client"] } }
/// }))
/// .unwrap();
///
/// let (authorities, subject) = mapper.map_to_authorities(&claims).unwrap();
/// assert_eq!(subject, "alice");
/// assert_eq!(authorities.to_strings(), vec!["ROLE_user_client", "SCOPE_openid"]);
/// ```
#[derive(Clone, Debug)]
pub struct ClaimsAuthorityMapper<C = ScopeAuthorities> {
    config: MapperConfig,
    defaults: C,
}

impl ClaimsAuthorityMapper<ScopeAuthorities> {
    /// Mapper using the standard `scope` / `scp` rule for baseline authorities.
    pub fn new(config: MapperConfig) -> Self {
        Self::with_defaults(config, ScopeAuthorities)
    }
}

impl<C: AuthoritiesConverter> ClaimsAuthorityMapper<C> {
    /// Mapper with a custom baseline converter.
    pub fn with_defaults(config: MapperConfig, defaults: C) -> Self {
        Self { config, defaults }
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Computes the authority set and subject for one request.
    ///
    /// # Errors
    /// [`AuthError::MissingSubject`] when neither the configured subject
    /// claim nor `sub` is present. Malformed role structure is not an error.
    pub fn map_to_authorities(
        &self,
        claims: &ClaimSet,
    ) -> Result<(AuthoritySet, String), AuthError> {
        let subject =
            resolve_subject(claims, &self.config.subject_claim).ok_or(AuthError::MissingSubject)?;

        let roles = client_roles(claims, &self.config.client_id).unwrap_or_else(|err| {
            warn!(
                client_id = %self.config.client_id,
                error = %err,
                "ignoring malformed client roles"
            );
            AuthoritySet::new()
        });

        let authorities = self.defaults.convert(claims).union(roles);

        Ok((authorities, subject))
    }

    /// Builds the authenticated principal, keeping the claims attached.
    pub fn map(&self, claims: ClaimSet) -> Result<AuthenticatedPrincipal, AuthError> {
        let (authorities, subject) = self.map_to_authorities(&claims)?;
        Ok(AuthenticatedPrincipal::new(subject, authorities, claims))
    }
}
