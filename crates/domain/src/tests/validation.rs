// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Action, DomainError, Equipment, ReferenceCatalog, RuleConfig, SolicitationParams,
    ValidatedParams, validate_solicitation_params, validate_solicitation_target,
};

fn params<'a>(
    action: &'a str,
    equipment: &'a str,
    amount: Option<&'a str>,
    voltage: Option<&'a str>,
    staggered: Option<bool>,
) -> SolicitationParams<'a> {
    SolicitationParams {
        action,
        equipment,
        amount,
        voltage,
        staggered,
    }
}

fn validate(p: SolicitationParams<'_>) -> Result<ValidatedParams, DomainError> {
    validate_solicitation_params(&p, &RuleConfig::default())
}

fn message(p: SolicitationParams<'_>) -> String {
    validate(p).unwrap_err().to_string()
}

#[test]
fn test_capacitor_without_voltage_is_valid() {
    let validated: ValidatedParams =
        validate(params("TURN_ON", "CAPACITOR", Some("5"), None, None)).unwrap();
    assert_eq!(validated.action, Action::TurnOn);
    assert_eq!(validated.equipment, Equipment::Capacitor);
    assert_eq!(validated.amount.as_deref(), Some("5"));
    assert_eq!(validated.voltage, None);
}

#[test]
fn test_capacitor_accepts_legacy_aliases_and_staggered() {
    let validated: ValidatedParams =
        validate(params("LIGAR", "CAPACITOR", Some("5"), Some(""), Some(true))).unwrap();
    assert_eq!(validated.action, Action::TurnOn);
    assert_eq!(validated.staggered, Some(true));
}

#[test]
fn test_unknown_equipment_reported_first() {
    assert_eq!(
        message(params("JUMP", "GENERATOR", None, None, Some(true))),
        "Invalid Equipment!"
    );
}

#[test]
fn test_action_not_allowed_for_equipment() {
    assert_eq!(
        message(params("RISE", "CAPACITOR", Some("5"), None, None)),
        "Invalid action for equipment type 'CAPACITOR'."
    );
    assert_eq!(
        message(params("LIGAR", "TRANSFORMADOR", Some("5"), Some("500kV"), None)),
        "Invalid action for equipment type 'TRANSFORMADOR'."
    );
    assert_eq!(
        message(params("TURN_ON", "SYNCHRONOUS", Some("5"), None, None)),
        "Invalid action for equipment type 'SYNCHRONOUS'."
    );
}

#[test]
fn test_reactor_requires_voltage() {
    assert_eq!(
        message(params("TURN_ON", "REACTOR", Some("5"), Some(""), None)),
        "Voltage value must be informed for 'REATOR'."
    );
    assert_eq!(
        message(params("TURN_ON", "REATOR", Some("5"), None, None)),
        "Voltage value must be informed for 'REATOR'."
    );
}

#[test]
fn test_reactor_accepts_any_voltage_text() {
    let validated: ValidatedParams =
        validate(params("TURN_ON", "REACTOR", Some("5"), Some("550kV"), None)).unwrap();
    assert_eq!(validated.voltage.as_deref(), Some("550kV"));
}

#[test]
fn test_voltage_checked_before_amount() {
    assert_eq!(
        message(params("TURN_ON", "REACTOR", Some("-5"), Some(""), None)),
        "Voltage value must be informed for 'REATOR'."
    );
}

#[test]
fn test_transformer_voltage_levels() {
    assert_eq!(
        message(params("REDUZIR", "TRANSFORMADOR", Some("5"), Some(""), None)),
        "Voltage value must be informed for 'TRANSFORMADOR'."
    );
    assert_eq!(
        message(params("RISE", "TRANSFORMER", Some("5"), Some("13kV"), None)),
        "Invalid voltage value for 'TRANSFORMADOR'."
    );
    assert!(validate(params("ELEVAR", "TRANSFORMADOR", Some("5"), Some("500kV"), None)).is_ok());
}

#[test]
fn test_transformer_voltage_levels_unrestricted_when_empty() {
    let config: RuleConfig = RuleConfig {
        transformer_voltage_levels: Vec::new(),
        ..RuleConfig::default()
    };
    let p: SolicitationParams<'_> = params("RISE", "TRANSFORMER", Some("5"), Some("13kV"), None);
    assert!(validate_solicitation_params(&p, &config).is_ok());
}

#[test]
fn test_transformer_rejects_staggered() {
    assert_eq!(
        message(params("RISE", "TRANSFORMER", Some("5"), Some("500kV"), Some(true))),
        "Staggered value cannot be saved for 'TRANSFORMADOR'."
    );
    assert!(validate(params("RISE", "TRANSFORMER", Some("5"), Some("500kV"), Some(false))).is_ok());
}

#[test]
fn test_amount_must_be_positive_number() {
    for amount in [None, Some(""), Some("0"), Some("-3"), Some("abc"), Some("NaN")] {
        assert_eq!(
            message(params("TURN_OFF", "CAPACITOR", amount, None, None)),
            "Invalid amount value for equipment type 'CAPACITOR'."
        );
    }
    assert_eq!(
        message(params("RISE", "TRANSFORMER", Some("0"), Some("500kV"), None)),
        "Invalid amount value for equipment type 'TRANSFORMADOR'."
    );
}

#[test]
fn test_synchronous_adjust_amount_bounds() {
    for amount in [Some(""), Some("-151"), Some("151"), None] {
        assert_eq!(
            message(params("ADJUST", "SYNCHRONOUS", amount, None, None)),
            "Invalid amount value for equipment type 'SYNCHRONOUS'."
        );
    }
    let validated: ValidatedParams =
        validate(params("ADJUST", "SYNCHRONOUS", Some("150"), None, None)).unwrap();
    assert_eq!(validated.amount.as_deref(), Some("150"));
}

#[test]
fn test_synchronous_cap_is_configurable() {
    let config: RuleConfig = RuleConfig {
        synchronous_amount_cap: 200.0,
        ..RuleConfig::default()
    };
    let p: SolicitationParams<'_> = params("ADJUST", "SYNCHRONOUS", Some("180"), None, None);
    assert!(validate_solicitation_params(&p, &config).is_ok());
}

#[test]
fn test_synchronous_other_actions_ignore_amount() {
    for (action, amount) in [("MAXIMIZE", Some("5")), ("RESET", Some("")), ("MINIMIZE", None)] {
        let validated: ValidatedParams =
            validate(params(action, "SYNCHRONOUS", amount, None, Some(true))).unwrap();
        assert_eq!(validated.amount, None);
        assert_eq!(validated.staggered, None);
    }
}

#[test]
fn test_target_must_exist_in_catalog() {
    let catalog: ReferenceCatalog = ReferenceCatalog::builtin();
    assert!(validate_solicitation_target(&catalog, "CTEEP", "MOS").is_ok());

    let err: DomainError = validate_solicitation_target(&catalog, "CTEEP", "XYZ").unwrap_err();
    assert_eq!(err.to_string(), "Invalid substation!");

    let err: DomainError = validate_solicitation_target(&catalog, "CHESF", "MOS").unwrap_err();
    assert_eq!(err.to_string(), "Invalid substation!");

    let err: DomainError = validate_solicitation_target(&catalog, "ACME", "MOS").unwrap_err();
    assert_eq!(err, DomainError::InvalidCompany(String::from("ACME")));
}
