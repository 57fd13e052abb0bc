// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use zapcot_domain::{
    Action, Caller, Equipment, Solicitation, SolicitationEvent, SolicitationStatus,
};

use crate::SolicitationDraft;

pub fn create_operator_caller() -> Caller {
    Caller::new(
        String::from("@testerons:zapcot"),
        String::from("ONS"),
        false,
    )
}

pub fn create_target_caller() -> Caller {
    Caller::new(
        String::from("@testercteep:zapcot"),
        String::from("CTEEP"),
        false,
    )
}

pub fn create_capacitor_draft(substation: &str) -> SolicitationDraft {
    SolicitationDraft {
        action: String::from("TURN_ON"),
        equipment: String::from("CAPACITOR"),
        substation: substation.to_string(),
        amount: Some(String::from("5")),
        voltage: None,
        staggered: None,
        company_code: String::from("CTEEP"),
    }
}

pub fn create_stored_solicitation(
    id: i64,
    status: SolicitationStatus,
    substation: &str,
    creation_time: i64,
) -> Solicitation {
    Solicitation {
        id,
        action: Action::TurnOn,
        equipment: Equipment::Capacitor,
        substation_code: substation.to_string(),
        amount: Some(String::from("5")),
        voltage: None,
        staggered: None,
        company_code: String::from("CTEEP"),
        request_user_id: String::from("@testerons:zapcot"),
        creation_time,
        status,
        events: vec![SolicitationEvent {
            status,
            user_id: String::from("@testerons:zapcot"),
            timestamp: creation_time,
        }],
    }
}
