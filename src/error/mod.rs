pub mod admin;
pub mod auth;
pub mod claims;
pub mod config;

pub use admin::AdminError;
pub use auth::AuthError;
pub use claims::ClaimShapeError;
pub use config::ConfigError;
