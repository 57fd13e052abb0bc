// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Solicitation mutations.
//!
//! Each mutation runs in a single `IMMEDIATE` transaction so that the
//! solicitation row and its history never diverge.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::{debug, info};
use zapcot::StatusChange;
use zapcot_domain::{NewSolicitation, SolicitationEvent};

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{solicitation_events, solicitations};
use crate::error::PersistenceError;

fn insert_event(
    conn: &mut SqliteConnection,
    solicitation_id: i64,
    event: &SolicitationEvent,
) -> Result<(), PersistenceError> {
    diesel::insert_into(solicitation_events::table)
        .values((
            solicitation_events::solicitation_id.eq(solicitation_id),
            solicitation_events::status.eq(event.status.as_str()),
            solicitation_events::user_id.eq(&event.user_id),
            solicitation_events::event_time.eq(event.timestamp),
        ))
        .execute(conn)?;
    Ok(())
}

/// Inserts a batch of solicitations together with their creation events.
///
/// Either every solicitation is stored or none is.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `batch` - Validated solicitations in submission order
///
/// # Returns
///
/// The assigned ids, in the same order as `batch`.
///
/// # Errors
///
/// Returns an error if any insert fails.
pub fn insert_solicitations(
    conn: &mut SqliteConnection,
    batch: &[NewSolicitation],
) -> Result<Vec<i64>, PersistenceError> {
    conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        let mut ids: Vec<i64> = Vec::with_capacity(batch.len());

        for solicitation in batch {
            diesel::insert_into(solicitations::table)
                .values((
                    solicitations::action_code.eq(solicitation.action.as_str()),
                    solicitations::equipment_code.eq(solicitation.equipment.as_str()),
                    solicitations::substation_code.eq(&solicitation.substation_code),
                    solicitations::amount.eq(solicitation.amount.as_deref()),
                    solicitations::voltage.eq(solicitation.voltage.as_deref()),
                    solicitations::staggered.eq(solicitation.staggered.map(i32::from)),
                    solicitations::company_code.eq(&solicitation.company_code),
                    solicitations::request_user_id.eq(&solicitation.request_user_id),
                    solicitations::creation_time.eq(solicitation.creation_time),
                    solicitations::status.eq(solicitation.status.as_str()),
                ))
                .execute(conn)?;

            let solicitation_id: i64 = conn.get_last_insert_rowid()?;
            insert_event(conn, solicitation_id, &solicitation.creation_event())?;
            debug!(solicitation_id, "Solicitation row inserted");
            ids.push(solicitation_id);
        }

        info!(count = ids.len(), "Solicitation batch persisted");
        Ok(ids)
    })
}

/// Applies a status change if the solicitation is still in the expected status.
///
/// The update and the history entry are written in the same transaction.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `change` - The change computed against the last read of the solicitation
///
/// # Errors
///
/// Returns `SolicitationNotFound` if the solicitation does not exist and
/// `StatusConflict` if another writer changed its status first.
pub fn apply_status_change(
    conn: &mut SqliteConnection,
    change: &StatusChange,
) -> Result<(), PersistenceError> {
    conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        let updated: usize = diesel::update(solicitations::table)
            .filter(solicitations::solicitation_id.eq(change.solicitation_id))
            .filter(solicitations::status.eq(change.expected_status.as_str()))
            .set(solicitations::status.eq(change.new_status.as_str()))
            .execute(conn)?;

        if updated == 0 {
            let exists: bool = diesel::select(diesel::dsl::exists(
                solicitations::table
                    .filter(solicitations::solicitation_id.eq(change.solicitation_id)),
            ))
            .get_result(conn)?;

            return Err(if exists {
                PersistenceError::StatusConflict {
                    solicitation_id: change.solicitation_id,
                    expected: change.expected_status.as_str().to_string(),
                }
            } else {
                PersistenceError::SolicitationNotFound(change.solicitation_id)
            });
        }

        insert_event(conn, change.solicitation_id, &change.event)?;

        info!(
            solicitation_id = change.solicitation_id,
            from = %change.expected_status,
            to = %change.new_status,
            "Solicitation status changed"
        );
        Ok(())
    })
}
