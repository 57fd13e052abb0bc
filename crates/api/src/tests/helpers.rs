// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use zapcot::ServiceContext;
use zapcot_domain::Caller;
use zapcot_persistence::Persistence;

use crate::{
    CreateSolicitationsRequest, SolicitationBatchRequest, SolicitationItemRequest, TextOrNumber,
    create_solicitations,
};

pub fn create_operator() -> Caller {
    Caller::new(String::from("@testerons:zapcot"), String::from("ONS"), false)
}

pub fn create_admin() -> Caller {
    Caller::new(String::from("@admin:zapcot"), String::from("ONS"), true)
}

pub fn create_cteep_user() -> Caller {
    Caller::new(
        String::from("@testercteep:zapcot"),
        String::from("CTEEP"),
        false,
    )
}

pub fn create_chesf_user() -> Caller {
    Caller::new(
        String::from("@testerchesf:zapcot"),
        String::from("CHESF"),
        false,
    )
}

pub fn create_capacitor_item(substation: &str) -> SolicitationItemRequest {
    SolicitationItemRequest {
        action: String::from("TURN_ON"),
        equipment: String::from("CAPACITOR"),
        substation: substation.to_string(),
        amount: Some(TextOrNumber::Text(String::from("5"))),
        voltage: None,
        staggered: Some(true),
        company_code: String::from("CTEEP"),
    }
}

pub fn create_batch(items: Vec<SolicitationItemRequest>) -> CreateSolicitationsRequest {
    CreateSolicitationsRequest::Batch(SolicitationBatchRequest {
        solicitations: items,
    })
}

/// Stores one capacitor solicitation per substation and returns the fresh store.
pub fn seed(context: &ServiceContext, substations: &[(&str, i64)]) -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    for (substation, now) in substations {
        create_solicitations(
            &mut persistence,
            context,
            &create_operator(),
            create_batch(vec![create_capacitor_item(substation)]),
            *now,
        )
        .unwrap();
    }
    persistence
}

pub type CallerFactory = fn() -> Caller;
