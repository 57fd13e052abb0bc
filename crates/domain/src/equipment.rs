// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Equipment and action vocabulary.
//!
//! Both vocabularies changed names between protocol revisions
//! (`LIGAR` became `TURN_ON`, `REATOR` became `REACTOR`, and so on).
//! Every accepted spelling is listed in a single alias table per type;
//! nothing else in the workspace knows about synonyms.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::DomainError;

/// Grid equipment a solicitation can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Equipment {
    /// Capacitor bank.
    Capacitor,
    /// Shunt reactor.
    Reactor,
    /// Transformer with tap changer.
    Transformer,
    /// Synchronous compensator.
    Synchronous,
}

/// Accepted spellings for each equipment type.
const EQUIPMENT_ALIASES: &[(&str, Equipment)] = &[
    ("CAPACITOR", Equipment::Capacitor),
    ("REACTOR", Equipment::Reactor),
    ("REATOR", Equipment::Reactor),
    ("TRANSFORMER", Equipment::Transformer),
    ("TRANSFORMADOR", Equipment::Transformer),
    ("TAP", Equipment::Transformer),
    ("SYNCHRONOUS", Equipment::Synchronous),
    ("SINCRONO", Equipment::Synchronous),
];

impl Equipment {
    /// Returns the canonical code used for persistence and API views.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Capacitor => "CAPACITOR",
            Self::Reactor => "REACTOR",
            Self::Transformer => "TRANSFORMER",
            Self::Synchronous => "SYNCHRONOUS",
        }
    }

    /// Returns the name used inside validation messages.
    ///
    /// Operators know reactors and transformers by their Portuguese names,
    /// so messages keep them even though the canonical codes are English.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Capacitor => "CAPACITOR",
            Self::Reactor => "REATOR",
            Self::Transformer => "TRANSFORMADOR",
            Self::Synchronous => "SYNCHRONOUS",
        }
    }

    /// Returns the actions that may be requested for this equipment.
    #[must_use]
    pub const fn allowed_actions(&self) -> &'static [Action] {
        match self {
            Self::Capacitor | Self::Reactor => &[Action::TurnOn, Action::TurnOff],
            Self::Transformer => &[
                Action::Rise,
                Action::Reduce,
                Action::Adjust,
                Action::AdjustForTap,
            ],
            Self::Synchronous => &[
                Action::Maximize,
                Action::Minimize,
                Action::Adjust,
                Action::Reset,
            ],
        }
    }

    /// Returns true if `action` may be requested for this equipment.
    #[must_use]
    pub fn allows(&self, action: Action) -> bool {
        self.allowed_actions().contains(&action)
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        let normalized: String = s.trim().to_ascii_uppercase();
        EQUIPMENT_ALIASES
            .iter()
            .find(|(alias, _)| *alias == normalized)
            .map(|(_, equipment)| *equipment)
            .ok_or_else(|| DomainError::InvalidEquipment(s.to_string()))
    }
}

impl FromStr for Equipment {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

/// Operation requested on a piece of equipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Switch a capacitor or reactor bank on.
    TurnOn,
    /// Switch a capacitor or reactor bank off.
    TurnOff,
    /// Raise a transformer tap.
    Rise,
    /// Lower a transformer tap.
    Reduce,
    /// Set a transformer or synchronous machine to a value.
    Adjust,
    /// Move a transformer to a given tap position.
    AdjustForTap,
    /// Drive a synchronous machine to maximum reactive output.
    Maximize,
    /// Drive a synchronous machine to minimum reactive output.
    Minimize,
    /// Return a synchronous machine to its default setpoint.
    Reset,
}

/// Accepted spellings for each action.
const ACTION_ALIASES: &[(&str, Action)] = &[
    ("TURN_ON", Action::TurnOn),
    ("LIGAR", Action::TurnOn),
    ("TURN_OFF", Action::TurnOff),
    ("DESLIGAR", Action::TurnOff),
    ("RISE", Action::Rise),
    ("ELEVAR", Action::Rise),
    ("REDUCE", Action::Reduce),
    ("REDUZIR", Action::Reduce),
    ("ADJUST", Action::Adjust),
    ("ADJUST_FOR_TAP", Action::AdjustForTap),
    ("MAXIMIZE", Action::Maximize),
    ("MINIMIZE", Action::Minimize),
    ("RESET", Action::Reset),
];

impl Action {
    /// Returns the canonical code used for persistence and API views.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TurnOn => "TURN_ON",
            Self::TurnOff => "TURN_OFF",
            Self::Rise => "RISE",
            Self::Reduce => "REDUCE",
            Self::Adjust => "ADJUST",
            Self::AdjustForTap => "ADJUST_FOR_TAP",
            Self::Maximize => "MAXIMIZE",
            Self::Minimize => "MINIMIZE",
            Self::Reset => "RESET",
        }
    }

    /// Resolves an action code or one of its aliases.
    ///
    /// Returns `None` for unknown codes. Callers report the failure in the
    /// context of the equipment being validated.
    #[must_use]
    pub fn from_alias(s: &str) -> Option<Self> {
        let normalized: String = s.trim().to_ascii_uppercase();
        ACTION_ALIASES
            .iter()
            .find(|(alias, _)| *alias == normalized)
            .map(|(_, action)| *action)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for Equipment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
