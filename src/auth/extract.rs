use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::{Authorization, authorization::Bearer};

use crate::auth::authenticator::TokenAuthenticator;
use crate::auth::principal::AuthenticatedPrincipal;
use crate::error::AuthError;

/// Authenticates the request from its `Authorization: Bearer` header.
///
/// Stateless: nothing is read from or written to cookies or sessions. Any
/// router whose state yields an `Arc<TokenAuthenticator>` can use it.
impl<S> FromRequestParts<S> for AuthenticatedPrincipal
where
    Arc<TokenAuthenticator>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AuthError::MissingToken)?;

        let authenticator = Arc::<TokenAuthenticator>::from_ref(state);
        authenticator.authenticate(bearer.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::JwtVerifier;
    use crate::auth::mapper::{ClaimsAuthorityMapper, MapperConfig};
    use crate::auth::test_support::{CLIENT_ID, SECRET, future_exp, sign};
    use crate::config::jwt::JwtConfig;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode, header},
        routing::get,
    };
    use http_body_util::BodyExt;
    use serde_json::json;
    use tower::ServiceExt;

    fn app() -> Router {
        let authenticator = Arc::new(TokenAuthenticator::new(
            JwtVerifier::from_config(&JwtConfig::with_secret(SECRET)).unwrap(),
            ClaimsAuthorityMapper::new(MapperConfig::new(CLIENT_ID, "sub")),
        ));

        Router::new()
            .route(
                "/whoami",
                get(|user: AuthenticatedPrincipal| async move { user.subject }),
            )
            .with_state(authenticator)
    }

    fn request(auth: Option<String>) -> Request<Body> {
        let mut builder = Request::builder().uri("/whoami");
        if let Some(value) = auth {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn valid_bearer_token_reaches_handler() {
        let token = sign(&json!({ "sub": "uuid-123", "exp": future_exp() }));

        let res = app()
            .oneshot(request(Some(format!("Bearer {token}"))))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        let body = res.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"uuid-123");
    }

    #[tokio::test]
    async fn missing_header_is_unauthorized() {
        let res = app().oneshot(request(None)).await.unwrap();

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(res.headers().get(header::WWW_AUTHENTICATE).unwrap(), "Bearer");
    }

    #[tokio::test]
    async fn non_bearer_scheme_is_unauthorized() {
        let res = app()
            .oneshot(request(Some("Basic dXNlcjpwYXNz".into())))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn invalid_token_is_unauthorized() {
        let res = app()
            .oneshot(request(Some("Bearer invalid.jwt.token".into())))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body = res.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "invalid_token");
    }
}
