// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use zapcot::StatusChange;
use zapcot_domain::{Action, Equipment, NewSolicitation, SolicitationEvent, SolicitationStatus};

pub fn create_new_solicitation(substation: &str, creation_time: i64) -> NewSolicitation {
    NewSolicitation {
        action: Action::TurnOn,
        equipment: Equipment::Capacitor,
        substation_code: substation.to_string(),
        amount: Some(String::from("10")),
        voltage: None,
        staggered: Some(true),
        company_code: String::from("CTEEP"),
        request_user_id: String::from("@testerons:zapcot"),
        creation_time,
        status: SolicitationStatus::New,
    }
}

pub fn create_status_change(
    solicitation_id: i64,
    expected_status: SolicitationStatus,
    new_status: SolicitationStatus,
    timestamp: i64,
) -> StatusChange {
    StatusChange {
        solicitation_id,
        expected_status,
        new_status,
        event: SolicitationEvent {
            status: new_status,
            user_id: String::from("@testercteep:zapcot"),
            timestamp,
        },
    }
}
