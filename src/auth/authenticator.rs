use tracing::debug;

use crate::auth::jwt::JwtVerifier;
use crate::auth::mapper::{ClaimsAuthorityMapper, MapperConfig};
use crate::auth::principal::AuthenticatedPrincipal;
use crate::auth::scope::{AuthoritiesConverter, ScopeAuthorities};
use crate::config::app::AppConfig;
use crate::error::{AuthError, ConfigError};

/// Verify-then-map pipeline for a single bearer token.
///
/// Shared behind an `Arc` by every request; it holds only immutable
/// configuration.
pub struct TokenAuthenticator<C = ScopeAuthorities> {
    verifier: JwtVerifier,
    mapper: ClaimsAuthorityMapper<C>,
}

impl TokenAuthenticator<ScopeAuthorities> {
    /// Builds the pipeline with the standard scope converter.
    pub fn from_config(cfg: &AppConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(
            JwtVerifier::from_config(&cfg.jwt)?,
            ClaimsAuthorityMapper::new(cfg.mapper.clone()),
        ))
    }
}

impl<C: AuthoritiesConverter> TokenAuthenticator<C> {
    pub fn new(verifier: JwtVerifier, mapper: ClaimsAuthorityMapper<C>) -> Self {
        Self { verifier, mapper }
    }

    pub fn mapper_config(&self) -> &MapperConfig {
        self.mapper.config()
    }

    /// Verifies `token` and maps its claims to a principal.
    pub fn authenticate(&self, token: &str) -> Result<AuthenticatedPrincipal, AuthError> {
        let claims = self.verifier.verify(token).inspect_err(|err| {
            if let AuthError::InvalidToken(e) = err {
                debug!(kind = ?e.kind(), "bearer token rejected");
            }
        })?;

        let principal = self.mapper.map(claims)?;
        debug!(
            subject = %principal.subject,
            authorities = ?principal.authorities.to_strings(),
            "bearer token accepted"
        );

        Ok(principal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::test_support::{CLIENT_ID, SECRET, future_exp, sign};
    use crate::config::jwt::JwtConfig;
    use serde_json::json;

    fn authenticator() -> TokenAuthenticator {
        TokenAuthenticator::from_config(&AppConfig {
            mapper: MapperConfig::new(CLIENT_ID, "preferred_username"),
            jwt: JwtConfig::with_secret(SECRET),
            admin: None,
        })
        .unwrap()
    }

    #[test]
    fn valid_token_becomes_principal() {
        let token = sign(&json!({
            "sub": "uuid-123",
            "preferred_username": "alice",
            "exp": future_exp(),
            "scope": "openid",
            "resource_access": { CLIENT_ID: { "roles": ["admin_client"] } }
        }));

        let principal = authenticator().authenticate(&token).unwrap();

        assert_eq!(principal.subject, "alice");
        assert_eq!(
            principal.authorities.to_strings(),
            vec!["ROLE_admin_client", "SCOPE_openid"]
        );
    }

    #[test]
    fn tampered_token_is_rejected_before_mapping() {
        let mut token = sign(&json!({ "sub": "u", "exp": future_exp() }));
        token.push('x');

        assert!(matches!(
            authenticator().authenticate(&token),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn token_without_subject_is_rejected() {
        let token = sign(&json!({ "exp": future_exp() }));

        assert!(matches!(
            authenticator().authenticate(&token),
            Err(AuthError::MissingSubject)
        ));
    }

    #[test]
    fn exposes_mapper_config() {
        assert_eq!(authenticator().mapper_config().client_id, CLIENT_ID);
    }
}
