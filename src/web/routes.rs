//! # Role-checked test endpoints
//!
//! Two endpoints that exercise the whole pipeline, handy for checking an
//! identity-provider client setup end to end:
//!
//! | Route | Requires |
//! |-------|----------|
//! | `GET /api/v1/test/admin` | role `admin_client` |
//! | `GET /api/v1/test/user` | role `user_client` or `admin_client` |

use crate::auth::AuthenticatedPrincipal;
use crate::error::AuthError;

pub const ADMIN_ROLE: &str = "admin_client";
pub const USER_ROLE: &str = "user_client";

pub async fn admin_test(user: AuthenticatedPrincipal) -> Result<&'static str, AuthError> {
    user.require_role(ADMIN_ROLE)?;
    Ok("ADMIN - access granted")
}

pub async fn user_test(user: AuthenticatedPrincipal) -> Result<&'static str, AuthError> {
    user.require_any_role(&[USER_ROLE, ADMIN_ROLE])?;
    Ok("USER - access granted")
}
