// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Identity provider boundary.
//!
//! Registration and login belong to an external system. The service only
//! needs to resolve a bearer token to a caller and to check that a user id
//! exists.

use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;
use tracing::debug;
use zapcot_domain::Caller;

/// Identity resolution errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    /// No access token was supplied.
    #[error("Missing access token")]
    MissingToken,

    /// The access token does not belong to any user.
    #[error("Unrecognised access token")]
    UnknownToken,

    /// The identity list could not be parsed.
    #[error("Invalid identity list: {0}")]
    InvalidDefinition(String),

    /// Two users share an access token.
    #[error("Access token of user {user_id} is already in use")]
    DuplicateToken { user_id: String },
}

/// One user known to the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserIdentity {
    pub user_id: String,
    pub username: String,
    pub company_code: String,
    #[serde(default)]
    pub admin: bool,
    pub access_token: String,
}

impl UserIdentity {
    /// Returns the caller this identity acts as.
    #[must_use]
    pub fn to_caller(&self) -> Caller {
        Caller::new(self.user_id.clone(), self.company_code.clone(), self.admin)
    }
}

/// Resolves access tokens to callers.
pub trait IdentityProvider: Send + Sync {
    /// Resolves an access token.
    ///
    /// # Errors
    ///
    /// Returns `UnknownToken` if no user holds the token.
    fn authenticate(&self, access_token: &str) -> Result<Caller, IdentityError>;

    /// Returns true if the user id is registered.
    fn user_exists(&self, user_id: &str) -> bool;
}

/// An identity provider backed by a fixed list of users.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentityProvider {
    by_token: HashMap<String, UserIdentity>,
    user_ids: BTreeSet<String>,
}

impl StaticIdentityProvider {
    /// Builds a provider from a list of users.
    ///
    /// # Errors
    ///
    /// Returns an error if two users share an access token.
    pub fn new(users: Vec<UserIdentity>) -> Result<Self, IdentityError> {
        let mut provider: Self = Self::default();
        for user in users {
            if provider.by_token.contains_key(&user.access_token) {
                return Err(IdentityError::DuplicateToken {
                    user_id: user.user_id,
                });
            }
            provider.user_ids.insert(user.user_id.clone());
            provider.by_token.insert(user.access_token.clone(), user);
        }
        Ok(provider)
    }

    /// Builds a provider from a JSON array of users.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or tokens collide.
    pub fn from_json(json: &str) -> Result<Self, IdentityError> {
        let users: Vec<UserIdentity> = serde_json::from_str(json)
            .map_err(|e| IdentityError::InvalidDefinition(e.to_string()))?;
        Self::new(users)
    }

    /// Development fixture with one user per company and one administrator.
    #[must_use]
    pub fn builtin() -> Self {
        let fixture: [(&str, &str, &str, bool, &str); 4] = [
            ("@testerons:zapcot", "testerons", "ONS", false, "ons-token"),
            ("@testercteep:zapcot", "testercteep", "CTEEP", false, "cteep-token"),
            ("@testerchesf:zapcot", "testerchesf", "CHESF", false, "chesf-token"),
            ("@admin:zapcot", "admin", "ONS", true, "admin-token"),
        ];
        let users: Vec<UserIdentity> = fixture
            .iter()
            .map(|(user_id, username, company, admin, token)| UserIdentity {
                user_id: (*user_id).to_string(),
                username: (*username).to_string(),
                company_code: (*company).to_string(),
                admin: *admin,
                access_token: (*token).to_string(),
            })
            .collect();

        // fixture tokens are distinct
        Self::new(users).unwrap_or_default()
    }

    /// Number of registered users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.user_ids.len()
    }

    /// Returns true if no user is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.user_ids.is_empty()
    }
}

impl IdentityProvider for StaticIdentityProvider {
    fn authenticate(&self, access_token: &str) -> Result<Caller, IdentityError> {
        let user: &UserIdentity = self
            .by_token
            .get(access_token)
            .ok_or(IdentityError::UnknownToken)?;
        debug!(user_id = %user.user_id, "Access token resolved");
        Ok(user.to_caller())
    }

    fn user_exists(&self, user_id: &str) -> bool {
        self.user_ids.contains(user_id)
    }
}
