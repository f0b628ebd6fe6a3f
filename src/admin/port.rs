use async_trait::async_trait;

use crate::admin::user::{UserDto, UserRecord};
use crate::error::AdminError;

/// Port trait for the identity provider's user-management API.
///
/// Implementations may talk to:
/// - the Keycloak admin REST API ([`crate::admin::KeycloakUserAdmin`])
/// - an in-memory double (for tests)
///
/// The trait does **not** check who is calling. The HTTP layer requires the
/// admin role before any method runs.
///
/// Implementations must be `Send + Sync` so one instance can be shared via
/// `Arc` by every request handler.
#[async_trait]
pub trait UserAdmin: Send + Sync {
    /// Every user of the managed realm.
    async fn list_users(&self) -> Result<Vec<UserRecord>, AdminError>;

    /// Users whose username equals `username` exactly. Empty when none do.
    async fn find_by_username(&self, username: &str) -> Result<Vec<UserRecord>, AdminError>;

    /// Creates an enabled, email-verified user, sets its permanent password
    /// and assigns realm roles. Returns the new user's id.
    async fn create_user(&self, user: &UserDto) -> Result<String, AdminError>;

    /// Replaces the user's profile and resets its password.
    ///
    /// ## Errors
    /// [`AdminError::NotFound`] when `user_id` is unknown.
    async fn update_user(&self, user_id: &str, user: &UserDto) -> Result<(), AdminError>;

    /// ## Errors
    /// [`AdminError::NotFound`] when `user_id` is unknown.
    async fn delete_user(&self, user_id: &str) -> Result<(), AdminError>;
}
