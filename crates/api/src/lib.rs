// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the voltage control solicitation service.
//!
//! Handlers here are transport agnostic: they take an authenticated caller
//! and typed requests, enforce authorization, drive the core, and return
//! typed responses or an `ApiError`.

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
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod handlers;
mod identity;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::AuthorizationService;
pub use error::{ApiError, AuthError, translate_core_error, translate_domain_error};
pub use handlers::{
    associate_tables, change_solicitation_status, create_solicitations, current_time,
    get_user_tables, list_solicitations, list_substations, list_tables, now_millis,
};
pub use identity::{IdentityError, IdentityProvider, StaticIdentityProvider, UserIdentity};
pub use request_response::{
    AssociateTablesRequest, ChangeStatusRequest, CodeNameView, CreateSolicitationsRequest,
    CreateSolicitationsResponse, CurrentTimeResponse, LegacySolicitationRequest,
    ListSolicitationsQuery, ListTablesQuery, MessageResponse, SolicitationBatchRequest,
    SolicitationEventView, SolicitationItemRequest, SolicitationView, TextOrNumber,
};
