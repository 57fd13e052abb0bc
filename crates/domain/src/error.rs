// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::equipment::Equipment;

/// Errors that can occur during domain validation.
///
/// The `Display` output of the validation variants is the exact message
/// returned to API callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Equipment code is not recognized.
    InvalidEquipment(String),
    /// Action is not recognized or not allowed for the equipment.
    InvalidAction {
        /// The equipment the action was requested for.
        equipment: Equipment,
        /// The submitted action code.
        action: String,
    },
    /// Voltage is required for the equipment but was missing or empty.
    VoltageRequired {
        /// The equipment requiring a voltage.
        equipment: Equipment,
    },
    /// Voltage was informed but is not an accepted level for the equipment.
    InvalidVoltage {
        /// The equipment the voltage was submitted for.
        equipment: Equipment,
        /// The submitted voltage.
        voltage: String,
    },
    /// Amount is missing, malformed, or out of range for the equipment.
    InvalidAmount {
        /// The equipment the amount was submitted for.
        equipment: Equipment,
    },
    /// Staggered was set on equipment that cannot be staggered.
    StaggeredNotAllowed {
        /// The equipment that rejects staggering.
        equipment: Equipment,
    },
    /// Substation is unknown or does not belong to the target company.
    InvalidSubstation {
        /// The company the substation was expected under.
        company_code: String,
        /// The submitted substation code.
        substation_code: String,
    },
    /// Company code is not part of the reference catalog.
    InvalidCompany(String),
    /// A creation request carried no solicitations.
    EmptySolicitationBatch,
    /// The requested status change is not permitted from the current status.
    InconsistentStatusChange {
        /// The current status (or the raw value if unparseable).
        from: String,
        /// The requested status (or the raw value if unparseable).
        to: String,
    },
    /// Company referenced by a read filter does not exist.
    CompanyNotFound(String),
    /// Table referenced by a read filter does not exist for the company.
    TableNotFound(String),
    /// Substation referenced by a read filter does not exist.
    SubstationNotFound(String),
    /// Unknown sort key.
    InvalidSortKey(String),
    /// Reference catalog definition is inconsistent.
    InvalidCatalog(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEquipment(_) => write!(f, "Invalid Equipment!"),
            Self::InvalidAction { equipment, .. } => write!(
                f,
                "Invalid action for equipment type '{}'.",
                equipment.display_name()
            ),
            Self::VoltageRequired { equipment } => write!(
                f,
                "Voltage value must be informed for '{}'.",
                equipment.display_name()
            ),
            Self::InvalidVoltage { equipment, .. } => write!(
                f,
                "Invalid voltage value for '{}'.",
                equipment.display_name()
            ),
            Self::InvalidAmount { equipment } => write!(
                f,
                "Invalid amount value for equipment type '{}'.",
                equipment.display_name()
            ),
            Self::StaggeredNotAllowed { equipment } => write!(
                f,
                "Staggered value cannot be saved for '{}'.",
                equipment.display_name()
            ),
            Self::InvalidSubstation { .. } => write!(f, "Invalid substation!"),
            Self::InvalidCompany(_) => write!(f, "Invalid company!"),
            Self::EmptySolicitationBatch => write!(f, "Solicitations not informed."),
            Self::InconsistentStatusChange { .. } => write!(f, "Inconsistent change of status."),
            Self::CompanyNotFound(_) => write!(f, "Company not found"),
            Self::TableNotFound(_) => write!(f, "Table not found"),
            Self::SubstationNotFound(code) => write!(f, "Substation '{code}' not found"),
            Self::InvalidSortKey(_) => write!(f, "Invalid sort param"),
            Self::InvalidCatalog(msg) => write!(f, "Invalid reference catalog: {msg}"),
        }
    }
}

impl std::error::Error for DomainError {}
