//! # kc_guard
//!
//! Bearer-token guard for services sitting behind a Keycloak-style identity
//! provider.
//!
//! This crate provides:
//! - JWT verification (`auth::jwt`)
//! - Mapping of per-client `resource_access` roles and `scope` entries to
//!   authorities (`auth::mapper`, `auth::scope`)
//! - An axum extractor yielding the authenticated principal (`auth::extract`)
//! - Environment-driven configuration (`config`)
//! - Role-checked test endpoints and a user-management facade over the
//!   identity provider's admin API (`web`, `admin`)
//!
//! ## Example usage (in another crate)
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use kc_guard::admin::KeycloakUserAdmin;
//! use kc_guard::auth::TokenAuthenticator;
//! use kc_guard::config::app::AppConfig;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = AppConfig::from_env()?;
//! let authenticator = Arc::new(TokenAuthenticator::from_config(&cfg)?);
//!
//! let app = match cfg.admin.clone() {
//!     Some(admin) => kc_guard::web::router_with_admin(
//!         authenticator,
//!         Arc::new(KeycloakUserAdmin::new(admin)?),
//!     ),
//!     None => kc_guard::web::router(authenticator),
//! };
//!
//! let listener = kc_guard::tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! kc_guard::axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

// ===============================
// Re-exports of external crates
// ===============================

pub use axum;
pub use axum_extra;
pub use chrono;
pub use jsonwebtoken;
pub use serde;
pub use serde_json;
pub use tokio;
pub use tower;
pub use tower_http;

// ===============================
// Public modules
// ===============================
pub mod admin;
pub mod auth;
pub mod claims;
pub mod config;
pub mod error;
pub mod web;
