//! # Authorities
//!
//! An [`Authority`] is the textual permission token checked by endpoint
//! guards. Two families exist:
//! - roles: `ROLE_<name>`, derived from the identity provider's client roles
//! - scopes: `SCOPE_<name>`, derived from the standard `scope` / `scp` claims
//!
//! The name part is never case-folded or otherwise altered.

use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

pub const ROLE_PREFIX: &str = "ROLE_";
pub const SCOPE_PREFIX: &str = "SCOPE_";

/// A single granted permission.
///
/// # Example
/// ```
/// use kc_guard::auth::authority::Authority;
///
/// assert_eq!(Authority::role("Admin_Client").as_str(), "ROLE_Admin_Client");
/// assert_eq!(Authority::scope("email").as_str(), "SCOPE_email");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Authority(String);

impl Authority {
    /// Wraps an already-prefixed authority string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn role(name: &str) -> Self {
        Self(format!("{ROLE_PREFIX}{name}"))
    }

    pub fn scope(name: &str) -> Self {
        Self(format!("{SCOPE_PREFIX}{name}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Ordering and equality follow the inner string, so set lookups by `&str` agree.
impl Borrow<str> for Authority {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A set of unique authorities.
///
/// Backed by an ordered set so that mapping the same claims twice produces
/// byte-identical output, which keeps logs and tests stable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AuthoritySet(BTreeSet<Authority>);

impl AuthoritySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, authority: Authority) -> bool {
        self.0.insert(authority)
    }

    /// Adds every authority from `other` into `self`.
    pub fn extend_from(&mut self, other: AuthoritySet) {
        self.0.extend(other.0);
    }

    /// Consumes both sets and returns their union.
    pub fn union(mut self, other: AuthoritySet) -> Self {
        self.extend_from(other);
        self
    }

    pub fn contains(&self, authority: &str) -> bool {
        self.0.contains(authority)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Authority> {
        self.0.iter()
    }

    /// Authority strings in sorted order.
    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().map(|a| a.0.clone()).collect()
    }
}

impl FromIterator<Authority> for AuthoritySet {
    fn from_iter<I: IntoIterator<Item = Authority>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for AuthoritySet {
    type Item = Authority;
    type IntoIter = std::collections::btree_set::IntoIter<Authority>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a AuthoritySet {
    type Item = &'a Authority;
    type IntoIter = std::collections::btree_set::Iter<'a, Authority>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
