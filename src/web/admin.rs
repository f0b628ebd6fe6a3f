//! # User-management endpoints
//!
//! Every route requires role `admin_client`; the check runs before the
//! request body is read.
//!
//! | Route | Success |
//! |-------|---------|
//! | `GET /api/keycloak/users` | 200, all users |
//! | `GET /api/keycloak/users/{username}` | 200, exact matches; 404 when none |
//! | `POST /api/keycloak/save` | 201, `{ "id", "message" }` |
//! | `PUT /api/keycloak/update/{user_id}` | 200, `{ "message" }` |
//! | `DELETE /api/keycloak/delete/{user_id}` | 204 |

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{FromRef, FromRequestParts, Path, State},
    http::{StatusCode, request::Parts},
    routing::{delete, get, post, put},
};
use serde_json::{Value, json};
use tracing::info;

use crate::admin::{UserAdmin, UserDto, UserRecord};
use crate::auth::{AuthenticatedPrincipal, TokenAuthenticator};
use crate::error::{AdminError, AuthError};
use crate::web::routes::ADMIN_ROLE;

/// Router state: the bearer-token pipeline plus the admin port.
#[derive(Clone, FromRef)]
pub struct AdminState {
    pub authenticator: Arc<TokenAuthenticator>,
    pub users: Arc<dyn UserAdmin>,
}

/// An authenticated caller holding role `admin_client`.
pub struct RequireAdmin(pub AuthenticatedPrincipal);

impl<S> FromRequestParts<S> for RequireAdmin
where
    Arc<TokenAuthenticator>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let principal = AuthenticatedPrincipal::from_request_parts(parts, state).await?;
        principal.require_role(ADMIN_ROLE)?;
        Ok(Self(principal))
    }
}

pub fn routes(state: AdminState) -> Router {
    Router::new()
        .route("/api/keycloak/users", get(list_users))
        .route("/api/keycloak/users/{username}", get(find_user))
        .route("/api/keycloak/save", post(save_user))
        .route("/api/keycloak/update/{user_id}", put(update_user))
        .route("/api/keycloak/delete/{user_id}", delete(delete_user))
        .with_state(state)
}

pub async fn list_users(
    _: RequireAdmin,
    State(users): State<Arc<dyn UserAdmin>>,
) -> Result<Json<Vec<UserRecord>>, AdminError> {
    Ok(Json(users.list_users().await?))
}

pub async fn find_user(
    _: RequireAdmin,
    State(users): State<Arc<dyn UserAdmin>>,
    Path(username): Path<String>,
) -> Result<Json<Vec<UserRecord>>, AdminError> {
    let found = users.find_by_username(&username).await?;
    if found.is_empty() {
        return Err(AdminError::NotFound(username));
    }
    Ok(Json(found))
}

pub async fn save_user(
    RequireAdmin(caller): RequireAdmin,
    State(users): State<Arc<dyn UserAdmin>>,
    Json(user): Json<UserDto>,
) -> Result<(StatusCode, Json<Value>), AdminError> {
    let id = users.create_user(&user).await?;
    info!(by = %caller.subject, user_id = %id, "created user");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "id": id,
            "message": format!("User created successfully with ID: {id}"),
        })),
    ))
}

pub async fn update_user(
    RequireAdmin(caller): RequireAdmin,
    State(users): State<Arc<dyn UserAdmin>>,
    Path(user_id): Path<String>,
    Json(user): Json<UserDto>,
) -> Result<Json<Value>, AdminError> {
    users.update_user(&user_id, &user).await?;
    info!(by = %caller.subject, user_id = %user_id, "updated user");

    Ok(Json(json!({ "message": "User updated successfully" })))
}

pub async fn delete_user(
    RequireAdmin(caller): RequireAdmin,
    State(users): State<Arc<dyn UserAdmin>>,
    Path(user_id): Path<String>,
) -> Result<StatusCode, AdminError> {
    users.delete_user(&user_id).await?;
    info!(by = %caller.subject, user_id = %user_id, "deleted user");

    Ok(StatusCode::NO_CONTENT)
}
