// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.
//!
//! `Display` on both enums yields the caller-facing message only; the HTTP
//! layer chooses status code and body shape from the variant.

use zapcot::CoreError;
use zapcot_domain::DomainError;

/// Authorization failures raised by the guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The caller may not perform a write (reported as a soft logout).
    NotAllowed {
        /// The action that was attempted.
        action: String,
        /// The caller-facing reason.
        message: String,
    },
    /// The caller may not see or manage the requested resource.
    Forbidden {
        /// The action that was attempted.
        action: String,
        /// The caller-facing reason.
        message: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAllowed { message, .. } | Self::Forbidden { message, .. } => {
                write!(f, "{message}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The caller may not perform a write.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// A human-readable reason.
        message: String,
    },
    /// The caller may not access the requested resource.
    Forbidden {
        /// The action that was attempted.
        action: String,
        /// A human-readable reason.
        message: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized { message, .. }
            | Self::Forbidden { message, .. }
            | Self::DomainRuleViolation { message, .. }
            | Self::InvalidInput { message, .. }
            | Self::ResourceNotFound { message, .. } => write!(f, "{message}"),
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::NotAllowed { action, message } => Self::Unauthorized { action, message },
            AuthError::Forbidden { action, message } => Self::Forbidden { action, message },
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::InvalidEquipment(_) => ApiError::InvalidInput {
            field: String::from("equipment"),
            message,
        },
        DomainError::InvalidAction { .. } => ApiError::InvalidInput {
            field: String::from("action"),
            message,
        },
        DomainError::VoltageRequired { .. } | DomainError::InvalidVoltage { .. } => {
            ApiError::InvalidInput {
                field: String::from("voltage"),
                message,
            }
        }
        DomainError::InvalidAmount { .. } => ApiError::InvalidInput {
            field: String::from("amount"),
            message,
        },
        DomainError::StaggeredNotAllowed { .. } => ApiError::InvalidInput {
            field: String::from("staggered"),
            message,
        },
        DomainError::InvalidSubstation { .. } => ApiError::InvalidInput {
            field: String::from("substation"),
            message,
        },
        DomainError::InvalidCompany(_) => ApiError::InvalidInput {
            field: String::from("company_code"),
            message,
        },
        DomainError::EmptySolicitationBatch => ApiError::InvalidInput {
            field: String::from("solicitations"),
            message,
        },
        DomainError::InvalidSortKey(_) => ApiError::InvalidInput {
            field: String::from("sort"),
            message,
        },
        DomainError::InconsistentStatusChange { .. } => ApiError::DomainRuleViolation {
            rule: String::from("status_transition"),
            message,
        },
        DomainError::CompanyNotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("Company"),
            message,
        },
        DomainError::TableNotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("Table"),
            message,
        },
        DomainError::SubstationNotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("Substation"),
            message,
        },
        DomainError::InvalidCatalog(_) => ApiError::Internal { message },
    }
}

/// Translates a core error into an API error.
///
/// Batch item failures are reported with the item's own message.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) | CoreError::InvalidBatchItem {
            error: domain_err, ..
        } => translate_domain_error(domain_err),
    }
}
