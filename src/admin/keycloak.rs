//! # Keycloak admin REST adapter
//!
//! Implements [`UserAdmin`] over the Keycloak admin API with `reqwest`.
//!
//! Each operation logs in first (password grant against the admin realm,
//! usually `master` with client `admin-cli`) and uses that token only for
//! the calls of the same operation. Nothing is cached between requests; the
//! HTTP connection pool is the only shared resource.
//!
//! | Operation | Calls |
//! |-----------|-------|
//! | list | `GET /admin/realms/{realm}/users` |
//! | find | `GET .../users?username=..&exact=true` |
//! | create | `POST .../users`, then `PUT .../users/{id}/reset-password`, `GET .../roles` and `POST .../users/{id}/role-mappings/realm` |
//! | update | `PUT .../users/{id}` (credentials included) |
//! | delete | `DELETE .../users/{id}` |

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Response, StatusCode, header::LOCATION};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::admin::port::UserAdmin;
use crate::admin::user::{RealmRole, UserDto, UserRecord, select_realm_roles};
use crate::config::admin::AdminConfig;
use crate::error::AdminError;

/// Keycloak-backed user administration.
pub struct KeycloakUserAdmin {
    config: AdminConfig,
    http: reqwest::Client,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UserPayload<'a> {
    username: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    enabled: bool,
    email_verified: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    credentials: Vec<PasswordCredential<'a>>,
}

impl<'a> UserPayload<'a> {
    fn new(user: &'a UserDto) -> Self {
        Self {
            username: &user.username,
            first_name: user.first_name.as_deref(),
            last_name: user.last_name.as_deref(),
            email: user.email.as_deref(),
            enabled: true,
            email_verified: true,
            credentials: Vec::new(),
        }
    }

    fn with_password(mut self, password: &'a str) -> Self {
        self.credentials.push(PasswordCredential::permanent(password));
        self
    }
}

#[derive(Serialize)]
struct PasswordCredential<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    value: &'a str,
    temporary: bool,
}

impl<'a> PasswordCredential<'a> {
    fn permanent(value: &'a str) -> Self {
        Self {
            kind: "password",
            value,
            temporary: false,
        }
    }
}

/// Any non-success status is the identity provider's failure.
fn expect_success(response: Response) -> Result<Response, AdminError> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(AdminError::Upstream {
            status: response.status().as_u16(),
        })
    }
}

/// Maps an admin API status to the facade's error, naming `user` on 404/409.
fn check(response: Response, user: &str) -> Result<Response, AdminError> {
    match response.status() {
        status if status.is_success() => Ok(response),
        StatusCode::NOT_FOUND => Err(AdminError::NotFound(user.to_string())),
        StatusCode::CONFLICT => Err(AdminError::Conflict(user.to_string())),
        status => Err(AdminError::Upstream {
            status: status.as_u16(),
        }),
    }
}

/// The new user's id is the last segment of the `Location` header.
fn user_id_from_location(location: &str) -> Option<&str> {
    location
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|id| !id.is_empty())
}

impl KeycloakUserAdmin {
    /// Builds the adapter and its connection pool.
    ///
    /// ## Errors
    /// [`AdminError::Transport`] if the HTTP client cannot be initialised.
    pub fn new(config: AdminConfig) -> Result<Self, AdminError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &AdminConfig {
        &self.config
    }

    fn realm_url(&self, path: &str) -> String {
        format!(
            "{}/admin/realms/{}/{}",
            self.config.server_url, self.config.realm, path
        )
    }

    async fn admin_token(&self) -> Result<String, AdminError> {
        let url = format!(
            "{}/realms/{}/protocol/openid-connect/token",
            self.config.server_url, self.config.admin_realm
        );

        let mut form = vec![
            ("grant_type", "password"),
            ("client_id", self.config.client_id.as_str()),
            ("username", self.config.username.as_str()),
            ("password", self.config.password.as_str()),
        ];
        if let Some(secret) = &self.config.client_secret {
            form.push(("client_secret", secret.as_str()));
        }

        let response = self.http.post(url).form(&form).send().await?;
        let token: TokenResponse = expect_success(response)?.json().await?;
        Ok(token.access_token)
    }
}

#[async_trait]
impl UserAdmin for KeycloakUserAdmin {
    async fn list_users(&self) -> Result<Vec<UserRecord>, AdminError> {
        let token = self.admin_token().await?;
        let response = self
            .http
            .get(self.realm_url("users"))
            .bearer_auth(&token)
            .send()
            .await?;

        Ok(expect_success(response)?.json().await?)
    }

    async fn find_by_username(&self, username: &str) -> Result<Vec<UserRecord>, AdminError> {
        let token = self.admin_token().await?;
        let response = self
            .http
            .get(self.realm_url("users"))
            .query(&[("username", username), ("exact", "true")])
            .bearer_auth(&token)
            .send()
            .await?;

        Ok(expect_success(response)?.json().await?)
    }

    async fn create_user(&self, user: &UserDto) -> Result<String, AdminError> {
        let token = self.admin_token().await?;

        let response = self
            .http
            .post(self.realm_url("users"))
            .bearer_auth(&token)
            .json(&UserPayload::new(user))
            .send()
            .await?;
        let response = check(response, &user.username)?;

        let user_id = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .and_then(user_id_from_location)
            .map(str::to_owned)
            .ok_or(AdminError::MalformedResponse("a Location header"))?;

        let response = self
            .http
            .put(self.realm_url(&format!("users/{user_id}/reset-password")))
            .bearer_auth(&token)
            .json(&PasswordCredential::permanent(&user.password))
            .send()
            .await?;
        check(response, &user_id)?;

        let response = self
            .http
            .get(self.realm_url("roles"))
            .bearer_auth(&token)
            .send()
            .await?;
        let available: Vec<RealmRole> = expect_success(response)?.json().await?;

        let roles = select_realm_roles(&user.roles, available);
        if roles.is_empty() {
            debug!(user_id = %user_id, requested = ?user.roles, "no matching realm roles");
        } else {
            let response = self
                .http
                .post(self.realm_url(&format!("users/{user_id}/role-mappings/realm")))
                .bearer_auth(&token)
                .json(&roles)
                .send()
                .await?;
            check(response, &user_id)?;
        }

        info!(user_id = %user_id, roles = roles.len(), "user created");
        Ok(user_id)
    }

    async fn update_user(&self, user_id: &str, user: &UserDto) -> Result<(), AdminError> {
        let token = self.admin_token().await?;
        let response = self
            .http
            .put(self.realm_url(&format!("users/{user_id}")))
            .bearer_auth(&token)
            .json(&UserPayload::new(user).with_password(&user.password))
            .send()
            .await?;
        check(response, user_id)?;

        info!(user_id = %user_id, "user updated");
        Ok(())
    }

    async fn delete_user(&self, user_id: &str) -> Result<(), AdminError> {
        let token = self.admin_token().await?;
        let response = self
            .http
            .delete(self.realm_url(&format!("users/{user_id}")))
            .bearer_auth(&token)
            .send()
            .await?;
        check(response, user_id)?;

        info!(user_id = %user_id, "user deleted");
        Ok(())
    }
}
