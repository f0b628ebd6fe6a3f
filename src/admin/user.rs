//! # User values exchanged with the admin API
//!
//! - [`UserDto`]: what a caller submits to create or update a user
//! - [`UserRecord`]: a user as the identity provider reports it
//! - [`RealmRole`]: a realm-level role, as listed and assigned

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Realm role given to new users who ask for none.
pub const DEFAULT_REALM_ROLE: &str = "user";

/// User details submitted to the create and update endpoints.
///
/// The password is always set as a permanent (non-temporary) credential.
///
/// # Example
/// ```
/// use kc_guard::admin::UserDto;
///
/// let dto: UserDto = serde_json::from_str(
///     r#"{ "username": "bob", "firstName": "Bob", "password": "pw", "roles": ["ADMIN"] }"#,
/// )
/// .unwrap();
///
/// assert_eq!(dto.first_name.as_deref(), Some("Bob"));
/// assert!(dto.last_name.is_none());
/// assert!(!format!("{dto:?}").contains("pw"));
/// ```
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub username: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub password: String,
    /// Requested realm role names; matched case-insensitively on create.
    #[serde(default)]
    pub roles: BTreeSet<String>,
}

impl fmt::Debug for UserDto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserDto")
            .field("username", &self.username)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("roles", &self.roles)
            .finish()
    }
}

/// A user held by the identity provider.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub email_verified: bool,
    /// Milliseconds since the epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_timestamp: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealmRole {
    pub id: String,
    pub name: String,
}

/// Picks the realm roles to assign to a new user.
///
/// Requested names are lowercased and compared against the realm's role
/// names exactly. An empty request selects [`DEFAULT_REALM_ROLE`]. Names
/// the realm does not define are dropped.
///
/// # Example
/// ```
/// use std::collections::BTreeSet;
/// use kc_guard::admin::user::{RealmRole, select_realm_roles};
///
/// let realm = vec![
///     RealmRole { id: "1".into(), name: "user".into() },
///     RealmRole { id: "2".into(), name: "admin".into() },
/// ];
///
/// let requested: BTreeSet<String> = ["ADMIN".to_string()].into();
/// assert_eq!(select_realm_roles(&requested, realm.clone())[0].name, "admin");
///
/// assert_eq!(select_realm_roles(&BTreeSet::new(), realm)[0].name, "user");
/// ```
pub fn select_realm_roles(
    requested: &BTreeSet<String>,
    available: Vec<RealmRole>,
) -> Vec<RealmRole> {
    let wanted: BTreeSet<String> = if requested.is_empty() {
        [DEFAULT_REALM_ROLE.to_string()].into()
    } else {
        requested.iter().map(|r| r.to_lowercase()).collect()
    };

    available
        .into_iter()
        .filter(|role| wanted.contains(&role.name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn realm() -> Vec<RealmRole> {
        ["user", "admin", "Manager"]
            .iter()
            .enumerate()
            .map(|(i, name)| RealmRole {
                id: format!("r{i}"),
                name: name.to_string(),
            })
            .collect()
    }

    fn names(roles: Vec<RealmRole>) -> Vec<String> {
        roles.into_iter().map(|r| r.name).collect()
    }

    #[test]
    fn empty_request_selects_default_role() {
        assert_eq!(names(select_realm_roles(&BTreeSet::new(), realm())), vec!["user"]);
    }

    #[test]
    fn requested_names_are_lowercased_before_matching() {
        let requested: BTreeSet<String> = ["Admin", "USER"].into_iter().map(String::from).collect();

        assert_eq!(names(select_realm_roles(&requested, realm())), vec!["user", "admin"]);
    }

    #[test]
    fn unknown_and_mixed_case_realm_roles_are_not_assigned() {
        let requested: BTreeSet<String> =
            ["manager", "auditor"].into_iter().map(String::from).collect();

        assert!(select_realm_roles(&requested, realm()).is_empty());
    }

    #[test]
    fn dto_requires_username_and_password() {
        let missing_password = json!({ "username": "bob" });
        assert!(serde_json::from_value::<UserDto>(missing_password).is_err());

        let minimal: UserDto =
            serde_json::from_value(json!({ "username": "bob", "password": "pw" })).unwrap();
        assert!(minimal.roles.is_empty());
    }

    #[test]
    fn record_reads_admin_api_representation() {
        let record: UserRecord = serde_json::from_value(json!({
            "id": "5c1e",
            "username": "alice",
            "firstName": "Alice",
            "emailVerified": true,
            "enabled": true,
            "createdTimestamp": 1710000000000_i64,
            "access": { "manage": true }
        }))
        .unwrap();

        assert_eq!(record.id.as_deref(), Some("5c1e"));
        assert_eq!(record.first_name.as_deref(), Some("Alice"));
        assert!(record.email_verified);

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back["firstName"], "Alice");
        assert!(back.get("lastName").is_none());
    }
}
