// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Solicitation queries.
//!
//! Solicitations are always returned with their full status history in
//! chronological order.

use diesel::SqliteConnection;
use diesel::prelude::*;
use std::collections::BTreeMap;
use tracing::debug;
use zapcot_domain::{Solicitation, SolicitationEvent};

use crate::data_models::{EventRow, SolicitationRow};
use crate::diesel_schema::{solicitation_events, solicitations};
use crate::error::PersistenceError;

/// Retrieves one solicitation by id.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `solicitation_id` - The solicitation id
///
/// # Errors
///
/// Returns `SolicitationNotFound` if no such solicitation exists.
pub fn get_solicitation(
    conn: &mut SqliteConnection,
    solicitation_id: i64,
) -> Result<Solicitation, PersistenceError> {
    debug!(solicitation_id, "Looking up solicitation");

    conn.transaction::<_, PersistenceError, _>(|conn| {
        let row: SolicitationRow = solicitations::table
            .filter(solicitations::solicitation_id.eq(solicitation_id))
            .select(SolicitationRow::as_select())
            .first(conn)
            .optional()?
            .ok_or(PersistenceError::SolicitationNotFound(solicitation_id))?;

        let events: Vec<SolicitationEvent> = solicitation_events::table
            .filter(solicitation_events::solicitation_id.eq(solicitation_id))
            .order(solicitation_events::event_id.asc())
            .select(EventRow::as_select())
            .load(conn)?
            .into_iter()
            .map(EventRow::into_event)
            .collect::<Result<_, _>>()?;

        row.into_solicitation(events)
    })
}

/// Lists solicitations from one consistent snapshot.
///
/// Ordering and the remaining filters are applied by the query engine.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `company_code` - Only solicitations targeting this company, if given
/// * `from_id` - Only solicitations with an id at or above this value, if given
///
/// # Errors
///
/// Returns an error if the database query fails or a row is corrupt.
pub fn list_solicitations(
    conn: &mut SqliteConnection,
    company_code: Option<&str>,
    from_id: Option<i64>,
) -> Result<Vec<Solicitation>, PersistenceError> {
    debug!(?company_code, ?from_id, "Listing solicitations");

    conn.transaction::<_, PersistenceError, _>(|conn| {
        let mut rows_query = solicitations::table
            .select(SolicitationRow::as_select())
            .order(solicitations::solicitation_id.asc())
            .into_boxed();
        let mut events_query = solicitation_events::table
            .inner_join(solicitations::table)
            .select(EventRow::as_select())
            .order(solicitation_events::event_id.asc())
            .into_boxed();

        if let Some(company) = company_code {
            rows_query = rows_query.filter(solicitations::company_code.eq(company));
            events_query = events_query.filter(solicitations::company_code.eq(company));
        }
        if let Some(from) = from_id {
            rows_query = rows_query.filter(solicitations::solicitation_id.ge(from));
            events_query = events_query.filter(solicitations::solicitation_id.ge(from));
        }

        let rows: Vec<SolicitationRow> = rows_query.load(conn)?;

        let mut histories: BTreeMap<i64, Vec<SolicitationEvent>> = BTreeMap::new();
        for event_row in events_query.load::<EventRow>(conn)? {
            let solicitation_id: i64 = event_row.solicitation_id;
            histories
                .entry(solicitation_id)
                .or_default()
                .push(event_row.into_event()?);
        }

        rows.into_iter()
            .map(|row| {
                let events: Vec<SolicitationEvent> = histories
                    .remove(&row.solicitation_id)
                    .unwrap_or_default();
                row.into_solicitation(events)
            })
            .collect()
    })
}
