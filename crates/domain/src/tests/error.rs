// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, Equipment};

#[test]
fn test_domain_error_display() {
    let err: DomainError = DomainError::InvalidEquipment(String::from("GENERATOR"));
    assert_eq!(format!("{err}"), "Invalid Equipment!");

    let err: DomainError = DomainError::InvalidAction {
        equipment: Equipment::Reactor,
        action: String::from("RISE"),
    };
    assert_eq!(
        format!("{err}"),
        "Invalid action for equipment type 'REATOR'."
    );

    let err: DomainError = DomainError::VoltageRequired {
        equipment: Equipment::Transformer,
    };
    assert_eq!(
        format!("{err}"),
        "Voltage value must be informed for 'TRANSFORMADOR'."
    );

    let err: DomainError = DomainError::InvalidAmount {
        equipment: Equipment::Synchronous,
    };
    assert_eq!(
        format!("{err}"),
        "Invalid amount value for equipment type 'SYNCHRONOUS'."
    );

    let err: DomainError = DomainError::StaggeredNotAllowed {
        equipment: Equipment::Transformer,
    };
    assert_eq!(
        format!("{err}"),
        "Staggered value cannot be saved for 'TRANSFORMADOR'."
    );

    let err: DomainError = DomainError::InconsistentStatusChange {
        from: String::from("NEW"),
        to: String::from("RETURNED"),
    };
    assert_eq!(format!("{err}"), "Inconsistent change of status.");

    let err: DomainError = DomainError::SubstationNotFound(String::from("XYZ"));
    assert_eq!(format!("{err}"), "Substation 'XYZ' not found");

    let err: DomainError = DomainError::InvalidSortKey(String::from("amount"));
    assert_eq!(format!("{err}"), "Invalid sort param");

    let err: DomainError = DomainError::EmptySolicitationBatch;
    assert_eq!(format!("{err}"), "Solicitations not informed.");
}
