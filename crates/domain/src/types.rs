// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

use crate::catalog::OPERATOR_COMPANY_CODE;
use crate::equipment::{Action, Equipment};
use crate::status::SolicitationStatus;

/// The user on whose behalf a request is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    /// Fully qualified user id (e.g. `@testerons:zapcot`).
    pub user_id: String,
    /// Company the user belongs to.
    pub company_code: String,
    /// Whether the user is a server administrator.
    pub admin: bool,
}

impl Caller {
    /// Creates a new caller.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user identifier
    /// * `company_code` - The company code of the user
    /// * `admin` - Whether the user is a server administrator
    #[must_use]
    pub const fn new(user_id: String, company_code: String, admin: bool) -> Self {
        Self {
            user_id,
            company_code,
            admin,
        }
    }

    /// Returns true if the caller belongs to the operator company.
    #[must_use]
    pub fn is_operator(&self) -> bool {
        self.company_code == OPERATOR_COMPANY_CODE
    }
}

/// One entry of a solicitation's status history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolicitationEvent {
    pub status: SolicitationStatus,
    pub user_id: String,
    /// Unix time in milliseconds.
    pub timestamp: i64,
}

/// A persisted voltage control solicitation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solicitation {
    pub id: i64,
    pub action: Action,
    pub equipment: Equipment,
    pub substation_code: String,
    pub amount: Option<String>,
    pub voltage: Option<String>,
    pub staggered: Option<bool>,
    /// The target company.
    pub company_code: String,
    pub request_user_id: String,
    /// Unix time in milliseconds.
    pub creation_time: i64,
    pub status: SolicitationStatus,
    /// Chronological status history; never empty.
    pub events: Vec<SolicitationEvent>,
}

/// A validated solicitation awaiting an id from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSolicitation {
    pub action: Action,
    pub equipment: Equipment,
    pub substation_code: String,
    pub amount: Option<String>,
    pub voltage: Option<String>,
    pub staggered: Option<bool>,
    pub company_code: String,
    pub request_user_id: String,
    pub creation_time: i64,
    pub status: SolicitationStatus,
}

impl NewSolicitation {
    /// Returns the creation event recorded alongside the solicitation.
    #[must_use]
    pub fn creation_event(&self) -> SolicitationEvent {
        SolicitationEvent {
            status: self.status,
            user_id: self.request_user_id.clone(),
            timestamp: self.creation_time,
        }
    }
}
