// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Equipment rule engine.
//!
//! Each solicitation item is checked in a fixed order and the first failing
//! rule is reported: equipment, action, voltage, amount, staggered.

use std::str::FromStr;

use crate::catalog::ReferenceCatalog;
use crate::equipment::{Action, Equipment};
use crate::error::DomainError;

/// Default upper bound for synchronous compensator adjustments.
pub const DEFAULT_SYNCHRONOUS_AMOUNT_CAP: f64 = 150.0;

/// Tunable parameters of the equipment rules.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleConfig {
    /// Largest amount accepted for a synchronous `ADJUST`.
    pub synchronous_amount_cap: f64,
    /// Voltage levels a transformer solicitation may name.
    ///
    /// An empty list accepts any non-empty voltage.
    pub transformer_voltage_levels: Vec<String>,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            synchronous_amount_cap: DEFAULT_SYNCHRONOUS_AMOUNT_CAP,
            transformer_voltage_levels: ["500kV", "440kV", "230kV", "138kV", "88kV"]
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// Raw equipment parameters of one solicitation item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolicitationParams<'a> {
    pub action: &'a str,
    pub equipment: &'a str,
    pub amount: Option<&'a str>,
    pub voltage: Option<&'a str>,
    pub staggered: Option<bool>,
}

/// Equipment parameters after validation and normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedParams {
    pub action: Action,
    pub equipment: Equipment,
    pub amount: Option<String>,
    pub voltage: Option<String>,
    pub staggered: Option<bool>,
}

/// Validates the equipment-specific parameters of a solicitation.
///
/// # Arguments
///
/// * `params` - The raw parameters as submitted
/// * `config` - The rule configuration
///
/// # Returns
///
/// The normalized parameters. Values the equipment ignores (amount for
/// non-adjusting synchronous actions, staggered for synchronous
/// compensators) are dropped.
///
/// # Errors
///
/// Returns the first violated rule:
/// - `DomainError::InvalidEquipment`
/// - `DomainError::InvalidAction`
/// - `DomainError::VoltageRequired` or `DomainError::InvalidVoltage`
/// - `DomainError::InvalidAmount`
/// - `DomainError::StaggeredNotAllowed`
pub fn validate_solicitation_params(
    params: &SolicitationParams<'_>,
    config: &RuleConfig,
) -> Result<ValidatedParams, DomainError> {
    let equipment: Equipment = Equipment::from_str(params.equipment)?;

    let action: Action = Action::from_alias(params.action)
        .filter(|action| equipment.allows(*action))
        .ok_or_else(|| DomainError::InvalidAction {
            equipment,
            action: params.action.to_string(),
        })?;

    let voltage: Option<String> = validate_voltage(equipment, params.voltage, config)?;
    let amount: Option<String> = validate_amount(equipment, action, params.amount, config)?;

    let staggered: Option<bool> = match equipment {
        Equipment::Transformer => {
            if params.staggered == Some(true) {
                return Err(DomainError::StaggeredNotAllowed { equipment });
            }
            params.staggered
        }
        Equipment::Synchronous => None,
        Equipment::Capacitor | Equipment::Reactor => params.staggered,
    };

    Ok(ValidatedParams {
        action,
        equipment,
        amount,
        voltage,
        staggered,
    })
}

fn validate_voltage(
    equipment: Equipment,
    voltage: Option<&str>,
    config: &RuleConfig,
) -> Result<Option<String>, DomainError> {
    let voltage: Option<&str> = voltage.map(str::trim).filter(|v| !v.is_empty());

    match equipment {
        Equipment::Reactor => voltage
            .map(ToString::to_string)
            .map(Some)
            .ok_or(DomainError::VoltageRequired { equipment }),
        Equipment::Transformer => {
            let value: &str = voltage.ok_or(DomainError::VoltageRequired { equipment })?;
            let levels: &[String] = &config.transformer_voltage_levels;
            if !levels.is_empty() && !levels.iter().any(|level| level.eq_ignore_ascii_case(value))
            {
                return Err(DomainError::InvalidVoltage {
                    equipment,
                    voltage: value.to_string(),
                });
            }
            Ok(Some(value.to_string()))
        }
        Equipment::Capacitor | Equipment::Synchronous => Ok(voltage.map(ToString::to_string)),
    }
}

fn validate_amount(
    equipment: Equipment,
    action: Action,
    amount: Option<&str>,
    config: &RuleConfig,
) -> Result<Option<String>, DomainError> {
    let cap: Option<f64> = match (equipment, action) {
        (Equipment::Synchronous, Action::Adjust) => Some(config.synchronous_amount_cap),
        (Equipment::Synchronous, _) => return Ok(None),
        _ => None,
    };

    let raw: &str = amount.map(str::trim).unwrap_or_default();
    let value: f64 = raw
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
        .ok_or(DomainError::InvalidAmount { equipment })?;

    if cap.is_some_and(|cap| value > cap) {
        return Err(DomainError::InvalidAmount { equipment });
    }

    Ok(Some(raw.to_string()))
}

/// Validates a solicitation's target against the reference catalog.
///
/// # Errors
///
/// Returns `DomainError::InvalidCompany` if the company is unknown, or
/// `DomainError::InvalidSubstation` if the substation is not owned by it.
pub fn validate_solicitation_target(
    catalog: &ReferenceCatalog,
    company_code: &str,
    substation_code: &str,
) -> Result<(), DomainError> {
    if !catalog.has_company(company_code) {
        return Err(DomainError::InvalidCompany(company_code.to_string()));
    }
    if catalog
        .substation_of_company(company_code, substation_code)
        .is_none()
    {
        return Err(DomainError::InvalidSubstation {
            company_code: company_code.to_string(),
            substation_code: substation_code.to_string(),
        });
    }
    Ok(())
}
