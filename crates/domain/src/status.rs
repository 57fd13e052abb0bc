// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Solicitation status tracking and transition logic.
//!
//! The transition graph is data: each protocol revision owns an adjacency
//! table, and each destination status is bound to the party allowed to
//! request it. Nothing advances a status on time alone.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle states of a voltage control solicitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SolicitationStatus {
    /// Created by the operator, awaiting the target company.
    New,
    /// Target company acknowledged and will execute.
    Accepted,
    /// Target company disputes an accepted solicitation.
    Contested,
    /// Operator insists after a contest.
    Required,
    /// Target company executed the maneuver.
    Executed,
    /// Operator withdrew the solicitation.
    Canceled,
    /// Target company cannot execute.
    Blocked,
    /// Past its expected execution window.
    Late,
    /// Legacy initial state.
    NotAnswered,
    /// Legacy: target company is aware.
    Aware,
    /// Legacy: target company answered.
    Answered,
    /// Legacy: expired without answer.
    Expired,
    /// Legacy: returned to the operator.
    Returned,
}

impl SolicitationStatus {
    /// Every known status, in declaration order.
    pub const ALL: [Self; 13] = [
        Self::New,
        Self::Accepted,
        Self::Contested,
        Self::Required,
        Self::Executed,
        Self::Canceled,
        Self::Blocked,
        Self::Late,
        Self::NotAnswered,
        Self::Aware,
        Self::Answered,
        Self::Expired,
        Self::Returned,
    ];

    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Accepted => "ACCEPTED",
            Self::Contested => "CONTESTED",
            Self::Required => "REQUIRED",
            Self::Executed => "EXECUTED",
            Self::Canceled => "CANCELED",
            Self::Blocked => "BLOCKED",
            Self::Late => "LATE",
            Self::NotAnswered => "NOT_ANSWERED",
            Self::Aware => "AWARE",
            Self::Answered => "ANSWERED",
            Self::Expired => "EXPIRED",
            Self::Returned => "RETURNED",
        }
    }

    /// Parses a status from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InconsistentStatusChange` if the string is not a
    /// known status. An unknown name can never be a legal destination.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::InconsistentStatusChange {
                from: String::new(),
                to: s.to_string(),
            })
    }

    /// Returns the party allowed to move a solicitation into this status.
    ///
    /// `None` means no caller may request it directly (system-driven or
    /// retired statuses); such requests fall through to the transition check.
    #[must_use]
    pub const fn required_party(&self) -> Option<TransitionParty> {
        match self {
            Self::Canceled | Self::Required => Some(TransitionParty::Operator),
            Self::Accepted
            | Self::Contested
            | Self::Executed
            | Self::Blocked
            | Self::Aware
            | Self::Answered => Some(TransitionParty::TargetCompany),
            Self::New | Self::Late | Self::NotAnswered | Self::Expired | Self::Returned => None,
        }
    }
}

impl FromStr for SolicitationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for SolicitationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The side of the workflow a status change belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionParty {
    /// The grid operator company.
    Operator,
    /// The company owning the targeted substation.
    TargetCompany,
}

/// Protocol revision governing the transition graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusProtocol {
    /// `NEW`/`ACCEPTED`/`CONTESTED`/`REQUIRED` workflow.
    #[default]
    Current,
    /// `NOT_ANSWERED`/`AWARE`/`ANSWERED` workflow.
    Legacy,
}

const CURRENT_TRANSITIONS: &[(SolicitationStatus, &[SolicitationStatus])] = &[
    (
        SolicitationStatus::New,
        &[
            SolicitationStatus::Accepted,
            SolicitationStatus::Blocked,
            SolicitationStatus::Canceled,
        ],
    ),
    (
        SolicitationStatus::Accepted,
        &[
            SolicitationStatus::Contested,
            SolicitationStatus::Executed,
            SolicitationStatus::Blocked,
        ],
    ),
    (
        SolicitationStatus::Contested,
        &[SolicitationStatus::Required],
    ),
    (
        SolicitationStatus::Required,
        &[SolicitationStatus::Accepted],
    ),
];

const LEGACY_TRANSITIONS: &[(SolicitationStatus, &[SolicitationStatus])] = &[
    (
        SolicitationStatus::NotAnswered,
        &[SolicitationStatus::Aware, SolicitationStatus::Canceled],
    ),
    (
        SolicitationStatus::Aware,
        &[SolicitationStatus::Answered],
    ),
];

impl StatusProtocol {
    /// Returns the string representation of the protocol.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Legacy => "legacy",
        }
    }

    /// The status every new solicitation starts in.
    #[must_use]
    pub const fn initial_status(&self) -> SolicitationStatus {
        match self {
            Self::Current => SolicitationStatus::New,
            Self::Legacy => SolicitationStatus::NotAnswered,
        }
    }

    const fn transitions(&self) -> &'static [(SolicitationStatus, &'static [SolicitationStatus])] {
        match self {
            Self::Current => CURRENT_TRANSITIONS,
            Self::Legacy => LEGACY_TRANSITIONS,
        }
    }

    /// Returns the statuses reachable in one step from `from`.
    ///
    /// Terminal statuses return an empty slice.
    #[must_use]
    pub fn successors(&self, from: SolicitationStatus) -> &'static [SolicitationStatus] {
        match self.transitions().iter().find(|(source, _)| *source == from) {
            Some((_, targets)) => targets,
            None => &[],
        }
    }

    /// Returns true if `status` has no outgoing transitions.
    #[must_use]
    pub fn is_terminal(&self, status: SolicitationStatus) -> bool {
        self.successors(status).is_empty()
    }

    /// Validates if a transition from one status to another is permitted.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InconsistentStatusChange` if `to` is not adjacent
    /// to `from` in this protocol's graph.
    pub fn validate_transition(
        &self,
        from: SolicitationStatus,
        to: SolicitationStatus,
    ) -> Result<(), DomainError> {
        if self.successors(from).contains(&to) {
            Ok(())
        } else {
            Err(DomainError::InconsistentStatusChange {
                from: from.as_str().to_string(),
                to: to.as_str().to_string(),
            })
        }
    }

    fn parse_str(s: &str) -> Result<Self, String> {
        match s.to_ascii_lowercase().as_str() {
            "current" => Ok(Self::Current),
            "legacy" => Ok(Self::Legacy),
            other => Err(format!("unknown status protocol '{other}'")),
        }
    }
}

impl FromStr for StatusProtocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for StatusProtocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
