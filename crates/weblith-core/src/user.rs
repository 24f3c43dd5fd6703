//! User identities.
//!
//! Weblith tracks who created, modified, published, or locked a resource.
//! For indexing purposes a user is reduced to a canonical serialized form,
//! which is the value stored in (and matched against) the text index.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A user identity, scoped to an optional login realm.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    login: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    realm: Option<String>,
}

impl User {
    /// Create a user in the default realm.
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            realm: None,
        }
    }

    /// Create a user scoped to a realm.
    pub fn with_realm(login: impl Into<String>, realm: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            realm: Some(realm.into()),
        }
    }

    /// The user's login.
    pub fn login(&self) -> &str {
        &self.login
    }

    /// The user's realm, if scoped.
    pub fn realm(&self) -> Option<&str> {
        self.realm.as_deref()
    }

    /// Canonical serialized form used as the index term for this user.
    ///
    /// `login` for the default realm, `login@realm` otherwise.
    pub fn canonical(&self) -> String {
        match &self.realm {
            Some(realm) => format!("{}@{}", self.login, realm),
            None => self.login.clone(),
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

// ============================================================================
// Tests
// ============================================================================
