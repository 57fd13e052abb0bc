// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Query engine for solicitation lists.

use std::collections::BTreeSet;
use zapcot_domain::{
    Caller, DomainError, ReferenceCatalog, Solicitation, SortKey, Table, ViewerOrdering,
    compare_by_keys, parse_sort_keys,
};

use crate::error::CoreError;

/// Largest page size served when the caller asks for one.
pub const MAX_LIST_LIMIT: usize = 100;

/// Raw list filters as received from a caller.
///
/// Company scoping must already have been authorized.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListFilter {
    pub company_code: Option<String>,
    pub table_code: Option<String>,
    /// Comma separated substation codes.
    pub substations: Option<String>,
    /// Sort expression, see `parse_sort_keys`.
    pub sort: Option<String>,
    /// Only solicitations with an id at or above this value.
    pub from_id: Option<i64>,
    /// Page size; absent means every match.
    pub limit: Option<usize>,
}

/// Filters checked against the reference catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedQuery {
    pub company_code: Option<String>,
    /// Allowed substation codes; `None` allows all.
    pub substations: Option<BTreeSet<String>>,
    /// Explicit sort keys; `None` selects the viewer's default ordering.
    pub sort_keys: Option<Vec<SortKey>>,
    pub from_id: Option<i64>,
    /// Clamped page size; `None` returns every match.
    pub limit: Option<usize>,
}

impl ResolvedQuery {
    /// Returns true if the solicitation passes every filter.
    #[must_use]
    pub fn matches(&self, solicitation: &Solicitation) -> bool {
        self.company_code
            .as_ref()
            .is_none_or(|code| solicitation.company_code == *code)
            && self
                .substations
                .as_ref()
                .is_none_or(|allowed| allowed.contains(&solicitation.substation_code))
            && self.from_id.is_none_or(|from| solicitation.id >= from)
    }
}

/// Resolves raw filters against the reference catalog.
///
/// # Arguments
///
/// * `catalog` - The reference catalog
/// * `filter` - The raw filters
///
/// # Errors
///
/// Returns an error if:
/// - The table does not exist for the company (or for any company when no
///   company is given)
/// - A listed substation does not exist
/// - The sort expression contains an unknown key
pub fn resolve_query(
    catalog: &ReferenceCatalog,
    filter: &ListFilter,
) -> Result<ResolvedQuery, CoreError> {
    let mut substations: Option<BTreeSet<String>> = None;

    if let Some(table_code) = &filter.table_code {
        let table: &Table = catalog
            .table(filter.company_code.as_deref(), table_code)
            .ok_or_else(|| DomainError::TableNotFound(table_code.clone()))?;
        substations = Some(table.substations.iter().cloned().collect());
    }

    if let Some(raw) = &filter.substations {
        let mut requested: BTreeSet<String> = BTreeSet::new();
        for code in raw.split(',').map(str::trim).filter(|c| !c.is_empty()) {
            if catalog.substation(code).is_none() {
                return Err(DomainError::SubstationNotFound(code.to_string()).into());
            }
            requested.insert(code.to_string());
        }
        substations = Some(match substations {
            Some(from_table) => from_table.intersection(&requested).cloned().collect(),
            None => requested,
        });
    }

    let sort_keys: Option<Vec<SortKey>> = filter.sort.as_deref().map(parse_sort_keys).transpose()?;

    Ok(ResolvedQuery {
        company_code: filter.company_code.clone(),
        substations,
        sort_keys,
        from_id: filter.from_id,
        limit: filter.limit.map(|limit| limit.min(MAX_LIST_LIMIT)),
    })
}

/// Returns the default ordering for a caller.
#[must_use]
pub fn ordering_for(caller: &Caller) -> ViewerOrdering {
    if caller.is_operator() {
        ViewerOrdering::operator()
    } else {
        ViewerOrdering::target_company()
    }
}

/// Filters, orders and truncates a snapshot of solicitations.
///
/// # Arguments
///
/// * `query` - The resolved filters
/// * `ordering` - The viewer's default ordering, used without explicit keys
/// * `snapshot` - Solicitations read from one consistent store snapshot
#[must_use]
pub fn select_solicitations(
    query: &ResolvedQuery,
    ordering: ViewerOrdering,
    snapshot: Vec<Solicitation>,
) -> Vec<Solicitation> {
    let mut selected: Vec<Solicitation> = snapshot
        .into_iter()
        .filter(|s| query.matches(s))
        .collect();

    match &query.sort_keys {
        Some(keys) => selected.sort_by(|a, b| compare_by_keys(keys, a, b)),
        None => selected.sort_by(|a, b| ordering.compare(a, b)),
    }

    if let Some(limit) = query.limit {
        selected.truncate(limit);
    }
    selected
}
