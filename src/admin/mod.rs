//! # User administration
//!
//! A thin CRUD facade over the identity provider's user-management API:
//! - [`port::UserAdmin`]: the operations the HTTP layer needs
//! - [`keycloak::KeycloakUserAdmin`]: the Keycloak admin REST implementation
//! - [`user`]: request/response values and realm-role selection

pub mod keycloak;
pub mod port;
pub mod user;

pub use keycloak::KeycloakUserAdmin;
pub use port::UserAdmin;
pub use user::{UserDto, UserRecord};
