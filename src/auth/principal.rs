use chrono::{DateTime, Utc};

use crate::auth::authority::{Authority, AuthoritySet, ROLE_PREFIX};
use crate::claims::ClaimSet;
use crate::error::AuthError;

/// The authenticated caller of one request.
///
/// # Overview
///
/// `AuthenticatedPrincipal` is the *result of authentication*: the subject the
/// token identifies, the authorities granted to it, and the verified claims
/// it was built from. It lives for a single request and is never persisted.
///
/// Role checks follow the usual convention: `has_role("admin_client")` is
/// satisfied by the authority `ROLE_admin_client`.
///
/// # Typical Usage
///
/// ```rust
/// use kc_guard::auth::authority::{Authority, AuthoritySet};
/// use kc_guard::auth::AuthenticatedPrincipal;
/// use kc_guard::claims::ClaimSet;
///
/// let authorities: AuthoritySet = [Authority::role("user_client")].into_iter().collect();
/// let user = AuthenticatedPrincipal::new("alice", authorities, ClaimSet::default());
///
/// assert!(user.has_role("user_client"));
/// assert!(!user.has_role("admin_client"));
/// assert!(user.has_any_role(&["user_client", "admin_client"]));
/// ```
///
/// In a handler:
///
/// ```ignore
/// async fn admin_only(user: AuthenticatedPrincipal) -> Result<&'static str, AuthError> {
///     user.require_role("admin_client")?;
///     Ok("ok")
/// }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct AuthenticatedPrincipal {
    /// Subject identifier, from the configured subject claim or `sub`.
    pub subject: String,
    /// Union of scope authorities and client-role authorities.
    pub authorities: AuthoritySet,
    /// The verified claims this principal was derived from.
    pub claims: ClaimSet,
}

impl AuthenticatedPrincipal {
    pub fn new(subject: impl Into<String>, authorities: AuthoritySet, claims: ClaimSet) -> Self {
        Self {
            subject: subject.into(),
            authorities,
            claims,
        }
    }

    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.contains(authority)
    }

    /// `true` if `ROLE_<role>` was granted.
    pub fn has_role(&self, role: &str) -> bool {
        self.has_authority(Authority::role(role).as_str())
    }

    pub fn has_any_role(&self, roles: &[&str]) -> bool {
        roles.iter().any(|r| self.has_role(r))
    }

    /// # Errors
    /// [`AuthError::Forbidden`] if the role is missing.
    pub fn require_role(&self, role: &str) -> Result<(), AuthError> {
        self.require_any_role(&[role])
    }

    /// # Errors
    /// [`AuthError::Forbidden`] if none of the roles is granted.
    pub fn require_any_role(&self, roles: &[&str]) -> Result<(), AuthError> {
        if self.has_any_role(roles) {
            Ok(())
        } else {
            Err(AuthError::forbidden_roles(roles))
        }
    }

    /// Role names granted, with the `ROLE_` prefix removed.
    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.authorities
            .iter()
            .filter_map(|a| a.as_str().strip_prefix(ROLE_PREFIX))
    }

    /// Token expiry from the `exp` claim, if present and representable.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let exp = self.claims.get("exp")?.as_i64()?;
        DateTime::from_timestamp(exp, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn principal(roles: &[&str]) -> AuthenticatedPrincipal {
        let authorities = roles.iter().map(|r| Authority::role(r)).collect();
        AuthenticatedPrincipal::new("alice", authorities, ClaimSet::default())
    }

    #[test]
    fn has_role_checks_prefixed_authority() {
        let user = principal(&["admin_client"]);

        assert!(user.has_role("admin_client"));
        assert!(user.has_authority("ROLE_admin_client"));
        assert!(!user.has_authority("admin_client"));
    }

    #[test]
    fn role_check_is_case_sensitive() {
        let user = principal(&["Admin_Client"]);

        assert!(user.has_role("Admin_Client"));
        assert!(!user.has_role("admin_client"));
    }

    #[test]
    fn require_any_role_accepts_either() {
        let user = principal(&["admin_client"]);

        assert!(user.require_any_role(&["user_client", "admin_client"]).is_ok());
    }

    #[test]
    fn require_role_reports_required_authorities() {
        let user = principal(&["user_client"]);

        match user.require_role("admin_client") {
            Err(AuthError::Forbidden { required }) => {
                assert_eq!(required, vec!["ROLE_admin_client"]);
            }
            other => panic!("expected Forbidden, got {other:?}"),
        }
    }

    #[test]
    fn roles_strips_prefix_and_skips_scopes() {
        let mut authorities: AuthoritySet = [Authority::role("user_client")].into_iter().collect();
        authorities.insert(Authority::scope("openid"));
        let user = AuthenticatedPrincipal::new("alice", authorities, ClaimSet::default());

        assert_eq!(user.roles().collect::<Vec<_>>(), vec!["user_client"]);
    }

    #[test]
    fn expires_at_reads_exp_claim() {
        let claims = ClaimSet::try_from(json!({ "exp": 1_700_000_000 })).unwrap();
        let user = AuthenticatedPrincipal::new("alice", AuthoritySet::new(), claims);

        assert_eq!(user.expires_at().unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn expires_at_is_none_without_exp() {
        assert!(principal(&[]).expires_at().is_none());
    }

    #[test]
    fn principal_is_cloneable() {
        let user = principal(&["user_client"]);
        assert_eq!(user.clone(), user);
    }
}
