// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authorization guard.
//!
//! Decides whether a caller may perform an action, based on the caller's
//! company and admin flag. Existence checks on the referenced resources are
//! made by the handlers before the guard runs.

use std::str::FromStr;
use zapcot_domain::{Caller, Solicitation, SolicitationStatus, TransitionParty};

use crate::error::AuthError;

const OPERATOR_ONLY_MESSAGE: &str = "User should to belong ONS.";
const FOREIGN_COMPANY_MESSAGE: &str = "User can only access the solicitations of your company";
const NOT_ADMIN_MESSAGE: &str = "You are not a server admin";

/// Authorization service for the solicitation workflow.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if a caller may create solicitations.
    ///
    /// Only members of the operator company may.
    ///
    /// # Errors
    ///
    /// Returns `NotAllowed` if the caller is not from the operator company.
    pub fn authorize_create_solicitations(caller: &Caller) -> Result<(), AuthError> {
        if caller.is_operator() {
            Ok(())
        } else {
            Err(AuthError::NotAllowed {
                action: String::from("create_solicitations"),
                message: String::from(OPERATOR_ONLY_MESSAGE),
            })
        }
    }

    /// Checks if a caller may move a solicitation to the requested status.
    ///
    /// Each destination is bound to a party. Destinations without a binding,
    /// including unknown names, pass the guard and are rejected later by the
    /// state machine.
    ///
    /// # Arguments
    ///
    /// * `caller` - The caller
    /// * `solicitation` - The solicitation being changed
    /// * `requested_status` - The requested destination, unparsed
    ///
    /// # Errors
    ///
    /// Returns `NotAllowed` if the caller does not belong to the bound party.
    pub fn authorize_status_change(
        caller: &Caller,
        solicitation: &Solicitation,
        requested_status: &str,
    ) -> Result<(), AuthError> {
        let Ok(destination) = SolicitationStatus::from_str(requested_status) else {
            return Ok(());
        };

        let allowed: bool = match destination.required_party() {
            None => true,
            Some(TransitionParty::Operator) => caller.is_operator(),
            Some(TransitionParty::TargetCompany) => {
                caller.company_code == solicitation.company_code
            }
        };

        if allowed {
            Ok(())
        } else {
            Err(AuthError::NotAllowed {
                action: String::from("change_solicitation_status"),
                message: format!("Not allowed for users from {}", caller.company_code),
            })
        }
    }

    /// Checks if a caller may read data of a company.
    ///
    /// The operator company may read every company; others only their own.
    ///
    /// # Arguments
    ///
    /// * `caller` - The caller
    /// * `company_code` - The company whose data is requested
    /// * `action` - The read being attempted, for error reporting
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` if a non-operator caller names another company.
    pub fn authorize_company_read(
        caller: &Caller,
        company_code: &str,
        action: &str,
    ) -> Result<(), AuthError> {
        if caller.is_operator() || caller.company_code == company_code {
            Ok(())
        } else {
            Err(AuthError::Forbidden {
                action: action.to_string(),
                message: String::from(FOREIGN_COMPANY_MESSAGE),
            })
        }
    }

    /// Checks if a caller is a server administrator.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` if the caller is not an administrator.
    pub fn authorize_admin(caller: &Caller, action: &str) -> Result<(), AuthError> {
        if caller.admin {
            Ok(())
        } else {
            Err(AuthError::Forbidden {
                action: action.to_string(),
                message: String::from(NOT_ADMIN_MESSAGE),
            })
        }
    }
}
