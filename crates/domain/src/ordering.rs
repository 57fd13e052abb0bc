// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ordering of solicitation lists.
//!
//! The default order depends on who is looking: each viewer kind owns an
//! ordered list of status groups, and each group carries the direction in
//! which its members are ordered by creation time. An explicit sort request
//! replaces the default entirely.

use std::cmp::Ordering;

use crate::error::DomainError;
use crate::status::SolicitationStatus;
use crate::types::Solicitation;

/// Direction applied to creation time (and id) inside a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// A set of statuses ranked together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusGroup {
    /// Statuses that share this rank.
    pub statuses: &'static [SolicitationStatus],
    /// Creation time and id order inside the group.
    pub direction: SortDirection,
}

const OPERATOR_GROUPS: &[StatusGroup] = &[
    StatusGroup {
        statuses: &[
            SolicitationStatus::Blocked,
            SolicitationStatus::Contested,
            SolicitationStatus::New,
            SolicitationStatus::Required,
            SolicitationStatus::NotAnswered,
            SolicitationStatus::Aware,
        ],
        direction: SortDirection::Ascending,
    },
    StatusGroup {
        statuses: &[SolicitationStatus::Late, SolicitationStatus::Accepted],
        direction: SortDirection::Ascending,
    },
    StatusGroup {
        statuses: &[
            SolicitationStatus::Executed,
            SolicitationStatus::Canceled,
            SolicitationStatus::Answered,
        ],
        direction: SortDirection::Descending,
    },
];

const TARGET_COMPANY_GROUPS: &[StatusGroup] = &[
    StatusGroup {
        statuses: &[SolicitationStatus::Late],
        direction: SortDirection::Ascending,
    },
    StatusGroup {
        statuses: &[SolicitationStatus::Accepted, SolicitationStatus::Aware],
        direction: SortDirection::Ascending,
    },
    StatusGroup {
        statuses: &[SolicitationStatus::Required],
        direction: SortDirection::Ascending,
    },
    StatusGroup {
        statuses: &[SolicitationStatus::New, SolicitationStatus::NotAnswered],
        direction: SortDirection::Ascending,
    },
    StatusGroup {
        statuses: &[SolicitationStatus::Contested],
        direction: SortDirection::Ascending,
    },
    StatusGroup {
        statuses: &[
            SolicitationStatus::Blocked,
            SolicitationStatus::Executed,
            SolicitationStatus::Canceled,
            SolicitationStatus::Answered,
        ],
        direction: SortDirection::Descending,
    },
];

/// Role-aware default ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerOrdering {
    groups: &'static [StatusGroup],
}

impl ViewerOrdering {
    /// Ordering seen by the operator company.
    #[must_use]
    pub const fn operator() -> Self {
        Self {
            groups: OPERATOR_GROUPS,
        }
    }

    /// Ordering seen by a target company.
    #[must_use]
    pub const fn target_company() -> Self {
        Self {
            groups: TARGET_COMPANY_GROUPS,
        }
    }

    /// Returns the group rank and direction for a status.
    ///
    /// Statuses outside every group rank after all groups, ascending.
    #[must_use]
    pub fn rank(&self, status: SolicitationStatus) -> (usize, SortDirection) {
        self.groups
            .iter()
            .position(|group| group.statuses.contains(&status))
            .map_or((self.groups.len(), SortDirection::Ascending), |index| {
                (index, self.groups[index].direction)
            })
    }

    /// Compares two solicitations under this ordering.
    #[must_use]
    pub fn compare(&self, a: &Solicitation, b: &Solicitation) -> Ordering {
        let (rank_a, direction) = self.rank(a.status);
        let (rank_b, _) = self.rank(b.status);
        rank_a.cmp(&rank_b).then_with(|| {
            direction.apply(
                a.creation_time
                    .cmp(&b.creation_time)
                    .then_with(|| a.id.cmp(&b.id)),
            )
        })
    }
}

/// A key accepted by the explicit `sort` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    CreationTime,
    Substation,
    Status,
}

impl SortKey {
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "creation_time" => Ok(Self::CreationTime),
            "substation" => Ok(Self::Substation),
            "status" => Ok(Self::Status),
            other => Err(DomainError::InvalidSortKey(other.to_string())),
        }
    }

    fn compare(self, a: &Solicitation, b: &Solicitation) -> Ordering {
        match self {
            Self::CreationTime => a.creation_time.cmp(&b.creation_time),
            Self::Substation => a.substation_code.cmp(&b.substation_code),
            Self::Status => status_sort_rank(a.status).cmp(&status_sort_rank(b.status)),
        }
    }
}

/// Parses a composite sort expression.
///
/// Keys may be separated by `,`, `+` or whitespace (a `+` in a query string
/// arrives decoded as a space).
///
/// # Errors
///
/// Returns `DomainError::InvalidSortKey` for an unknown or empty key list.
pub fn parse_sort_keys(raw: &str) -> Result<Vec<SortKey>, DomainError> {
    let keys: Vec<SortKey> = raw
        .split(|c: char| c == ',' || c == '+' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(SortKey::parse_str)
        .collect::<Result<_, _>>()?;

    if keys.is_empty() {
        return Err(DomainError::InvalidSortKey(raw.to_string()));
    }
    Ok(keys)
}

/// Compares two solicitations by explicit keys, all ascending, then by id.
#[must_use]
pub fn compare_by_keys(keys: &[SortKey], a: &Solicitation, b: &Solicitation) -> Ordering {
    keys.iter()
        .fold(Ordering::Equal, |acc, key| acc.then_with(|| key.compare(a, b)))
        .then_with(|| a.id.cmp(&b.id))
}

/// Open statuses first, then the remainder alphabetically.
fn status_sort_rank(status: SolicitationStatus) -> (u8, &'static str) {
    let leading: u8 = match status {
        SolicitationStatus::NotAnswered => 0,
        SolicitationStatus::New => 1,
        SolicitationStatus::Late => 2,
        SolicitationStatus::Accepted => 3,
        _ => 4,
    };
    (leading, status.as_str())
}
