//! # Bearer token verification (JWT)
//!
//! Checks the signature and registered claims of an incoming token and hands
//! back its payload as a [`ClaimSet`]. Nothing here interprets roles; that is
//! the mapper's job once the token is trusted.
//!
//! ## Design principles
//! - No dependency on `std::env`; the caller supplies a [`JwtConfig`]
//! - No global state
//! - Fully testable with deterministic inputs
//!
//! ## Checks
//! - signature: HS256 with a shared secret, or RS256 with the realm public key
//! - `exp` (required) and `nbf`, with the configured leeway
//! - `iss` / `aud`, only when configured

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use crate::claims::ClaimSet;
use crate::config::jwt::{JwtConfig, VerificationKey};
use crate::error::{AuthError, ConfigError};

/// Verifies bearer tokens against a fixed key and validation policy.
#[derive(Clone)]
pub struct JwtVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    /// Builds a verifier from configuration.
    ///
    /// ## Errors
    /// [`ConfigError::InvalidKey`] if the PEM key cannot be parsed.
    ///
    /// ## Example
    /// ```
    /// use kc_guard::auth::jwt::JwtVerifier;
    /// use kc_guard::config::jwt::JwtConfig;
    ///
    /// let verifier = JwtVerifier::from_config(&JwtConfig::with_secret("test-secret")).unwrap();
    /// assert!(verifier.verify("not-a-valid-token").is_err());
    /// ```
    pub fn from_config(cfg: &JwtConfig) -> Result<Self, ConfigError> {
        let (key, algorithm) = match &cfg.key {
            VerificationKey::Secret(secret) => {
                (DecodingKey::from_secret(secret.as_bytes()), Algorithm::HS256)
            }
            VerificationKey::RsaPublicPem(pem) => (
                DecodingKey::from_rsa_pem(pem.as_bytes()).map_err(ConfigError::InvalidKey)?,
                Algorithm::RS256,
            ),
        };

        let mut validation = Validation::new(algorithm);
        validation.leeway = cfg.leeway_secs;
        validation.validate_nbf = true;

        if let Some(issuer) = &cfg.issuer {
            validation.set_issuer(&[issuer]);
        }

        match &cfg.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        Ok(Self { key, validation })
    }

    /// Validates `token` and returns its claims.
    ///
    /// ## Errors
    /// [`AuthError::InvalidToken`] if the token is malformed, badly signed,
    /// expired, not yet valid, or fails the issuer / audience checks.
    pub fn verify(&self, token: &str) -> Result<ClaimSet, AuthError> {
        let data = decode::<ClaimSet>(token, &self.key, &self.validation)?;
        Ok(data.claims)
    }
}
