// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod catalog;
mod equipment;
mod error;
mod ordering;
mod status;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use catalog::{
    CatalogDefinition, Company, OPERATOR_COMPANY_CODE, ReferenceCatalog, Substation, Table,
};
pub use equipment::{Action, Equipment};
pub use error::DomainError;
pub use ordering::{
    SortDirection, SortKey, StatusGroup, ViewerOrdering, compare_by_keys, parse_sort_keys,
};
pub use status::{SolicitationStatus, StatusProtocol, TransitionParty};
pub use types::{Caller, NewSolicitation, Solicitation, SolicitationEvent};
pub use validation::{
    DEFAULT_SYNCHRONOUS_AMOUNT_CAP, RuleConfig, SolicitationParams, ValidatedParams,
    validate_solicitation_params, validate_solicitation_target,
};
