// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use std::str::FromStr;
use zapcot_domain::{Action, Equipment, Solicitation, SolicitationEvent, SolicitationStatus};

use crate::diesel_schema::{solicitation_events, solicitations};
use crate::error::PersistenceError;

/// Diesel Queryable struct for solicitation rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = solicitations)]
pub struct SolicitationRow {
    pub solicitation_id: i64,
    pub action_code: String,
    pub equipment_code: String,
    pub substation_code: String,
    pub amount: Option<String>,
    pub voltage: Option<String>,
    pub staggered: Option<i32>,
    pub company_code: String,
    pub request_user_id: String,
    pub creation_time: i64,
    pub status: String,
}

/// Diesel Queryable struct for status history rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = solicitation_events)]
pub struct EventRow {
    pub solicitation_id: i64,
    pub status: String,
    pub user_id: String,
    pub event_time: i64,
}

fn parse_status(raw: &str, solicitation_id: i64) -> Result<SolicitationStatus, PersistenceError> {
    SolicitationStatus::from_str(raw).map_err(|_| {
        PersistenceError::CorruptRecord(format!(
            "solicitation {solicitation_id} has unknown status '{raw}'"
        ))
    })
}

impl EventRow {
    /// Converts the row into a domain event.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored status is unknown.
    pub fn into_event(self) -> Result<SolicitationEvent, PersistenceError> {
        Ok(SolicitationEvent {
            status: parse_status(&self.status, self.solicitation_id)?,
            user_id: self.user_id,
            timestamp: self.event_time,
        })
    }
}

impl SolicitationRow {
    /// Converts the row and its history into a domain solicitation.
    ///
    /// # Arguments
    ///
    /// * `events` - The solicitation's events in chronological order
    ///
    /// # Errors
    ///
    /// Returns an error if a stored code no longer maps to a domain value
    /// or if the history is empty.
    pub fn into_solicitation(
        self,
        events: Vec<SolicitationEvent>,
    ) -> Result<Solicitation, PersistenceError> {
        let id: i64 = self.solicitation_id;

        let action: Action = Action::from_alias(&self.action_code).ok_or_else(|| {
            PersistenceError::CorruptRecord(format!(
                "solicitation {id} has unknown action '{}'",
                self.action_code
            ))
        })?;
        let equipment: Equipment = Equipment::from_str(&self.equipment_code).map_err(|_| {
            PersistenceError::CorruptRecord(format!(
                "solicitation {id} has unknown equipment '{}'",
                self.equipment_code
            ))
        })?;
        let status: SolicitationStatus = parse_status(&self.status, id)?;

        if events.is_empty() {
            return Err(PersistenceError::CorruptRecord(format!(
                "solicitation {id} has no status history"
            )));
        }

        Ok(Solicitation {
            id,
            action,
            equipment,
            substation_code: self.substation_code,
            amount: self.amount,
            voltage: self.voltage,
            staggered: self.staggered.map(|flag| flag != 0),
            company_code: self.company_code,
            request_user_id: self.request_user_id,
            creation_time: self.creation_time,
            status,
            events,
        })
    }
}
