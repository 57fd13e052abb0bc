// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::Arc;
use zapcot_domain::{
    ReferenceCatalog, RuleConfig, SolicitationEvent, SolicitationStatus, StatusProtocol,
};

/// Read-only inputs shared by every command and query.
#[derive(Debug, Clone)]
pub struct ServiceContext {
    /// Reference data snapshot.
    pub catalog: Arc<ReferenceCatalog>,
    /// Equipment rule parameters.
    pub rules: RuleConfig,
    /// Active status protocol revision.
    pub protocol: StatusProtocol,
}

impl ServiceContext {
    /// Creates a new service context.
    ///
    /// # Arguments
    ///
    /// * `catalog` - The reference catalog snapshot
    /// * `rules` - The equipment rule configuration
    /// * `protocol` - The status protocol revision
    #[must_use]
    pub const fn new(
        catalog: Arc<ReferenceCatalog>,
        rules: RuleConfig,
        protocol: StatusProtocol,
    ) -> Self {
        Self {
            catalog,
            rules,
            protocol,
        }
    }
}

impl Default for ServiceContext {
    fn default() -> Self {
        Self::new(
            Arc::new(ReferenceCatalog::builtin()),
            RuleConfig::default(),
            StatusProtocol::default(),
        )
    }
}

/// The outcome of a legal status change, ready to be stored.
///
/// The store applies it only if the solicitation is still in
/// `expected_status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub solicitation_id: i64,
    pub expected_status: SolicitationStatus,
    pub new_status: SolicitationStatus,
    /// Event appended to the solicitation's history.
    pub event: SolicitationEvent,
}
