//! # HTTP surface
//!
//! [`router`] serves the role-checked test endpoints behind bearer-token
//! authentication. [`router_with_admin`] adds the user-management endpoints.
//! Every route requires a valid token; role checks happen per handler.

pub mod admin;
pub mod fallback;
pub mod routes;

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::admin::UserAdmin;
use crate::auth::TokenAuthenticator;

/// Builds the application router.
///
/// # Example
/// ```rust
/// use std::sync::Arc;
/// use kc_guard::auth::TokenAuthenticator;
/// use kc_guard::auth::mapper::MapperConfig;
/// use kc_guard::config::{app::AppConfig, jwt::JwtConfig};
///
/// let cfg = AppConfig {
///     mapper: MapperConfig::new("my-app", "preferred_username"),
///     jwt: JwtConfig::with_secret("change-me"),
///     admin: None,
/// };
/// let authenticator = Arc::new(TokenAuthenticator::from_config(&cfg).unwrap());
///
/// let app: axum::Router = kc_guard::web::router(authenticator);
/// ```
pub fn router(authenticator: Arc<TokenAuthenticator>) -> Router {
    finish(test_routes(authenticator))
}

/// Builds the application router including `/api/keycloak/*`.
pub fn router_with_admin(
    authenticator: Arc<TokenAuthenticator>,
    users: Arc<dyn UserAdmin>,
) -> Router {
    let admin = admin::routes(admin::AdminState {
        authenticator: authenticator.clone(),
        users,
    });

    finish(test_routes(authenticator).merge(admin))
}

fn test_routes(authenticator: Arc<TokenAuthenticator>) -> Router {
    Router::new()
        .route("/api/v1/test/admin", get(routes::admin_test))
        .route("/api/v1/test/user", get(routes::user_test))
        .with_state(authenticator)
}

fn finish(app: Router) -> Router {
    app.fallback(fallback::not_found)
        .layer(TraceLayer::new_for_http())
}
