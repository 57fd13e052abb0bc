// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use zapcot_domain::SolicitationParams;

/// One solicitation as requested by a caller, before validation.
///
/// Drafts represent intent as data only; they become solicitations through
/// `apply_creation`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolicitationDraft {
    /// Action code or alias.
    pub action: String,
    /// Equipment code or alias.
    pub equipment: String,
    /// Target substation code.
    pub substation: String,
    pub amount: Option<String>,
    pub voltage: Option<String>,
    pub staggered: Option<bool>,
    /// The target company.
    pub company_code: String,
}

impl SolicitationDraft {
    /// Borrows the equipment parameters for the rule engine.
    #[must_use]
    pub fn params(&self) -> SolicitationParams<'_> {
        SolicitationParams {
            action: &self.action,
            equipment: &self.equipment,
            amount: self.amount.as_deref(),
            voltage: self.voltage.as_deref(),
            staggered: self.staggered,
        }
    }
}

/// A status change request against one solicitation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChangeCommand {
    pub solicitation_id: i64,
    /// Requested status name, not yet parsed.
    pub status: String,
}
