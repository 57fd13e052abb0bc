// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use zapcot::ServiceContext;
use zapcot_domain::{Solicitation, SolicitationStatus};
use zapcot_persistence::Persistence;

use crate::tests::helpers::{create_chesf_user, create_cteep_user, create_operator, seed};
use crate::{ApiError, ChangeStatusRequest, MessageResponse, change_solicitation_status};

fn request(status: &str) -> ChangeStatusRequest {
    ChangeStatusRequest {
        status: status.to_string(),
        justification: None,
    }
}

fn only_id(persistence: &mut Persistence) -> i64 {
    persistence.list_solicitations(None, None).unwrap()[0].id
}

#[test]
fn test_target_accepts_then_operator_is_refused() {
    let context: ServiceContext = ServiceContext::default();
    let mut persistence: Persistence = seed(&context, &[("MOS", 10)]);
    let id: String = only_id(&mut persistence).to_string();

    let response: MessageResponse = change_solicitation_status(
        &mut persistence,
        &context,
        &create_cteep_user(),
        &id,
        &request("ACCEPTED"),
        20,
    )
    .unwrap();
    assert_eq!(response.message, "Solicitation status changed.");

    let err: ApiError = change_solicitation_status(
        &mut persistence,
        &context,
        &create_operator(),
        &id,
        &request("ACCEPTED"),
        30,
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { .. }));
    assert_eq!(err.to_string(), "Not allowed for users from ONS");
}

#[test]
fn test_history_records_each_change() {
    let context: ServiceContext = ServiceContext::default();
    let mut persistence: Persistence = seed(&context, &[("MOS", 10)]);
    let id: i64 = only_id(&mut persistence);

    for (caller, status, now) in [
        (create_cteep_user(), "ACCEPTED", 20),
        (create_cteep_user(), "CONTESTED", 30),
        (create_operator(), "REQUIRED", 40),
    ] {
        change_solicitation_status(
            &mut persistence,
            &context,
            &caller,
            &id.to_string(),
            &request(status),
            now,
        )
        .unwrap();
    }

    let stored: Solicitation = persistence.get_solicitation(id).unwrap();
    assert_eq!(stored.status, SolicitationStatus::Required);
    assert_eq!(stored.events.len(), 4);
    assert_eq!(stored.events[3].user_id, "@testerons:zapcot");
    assert_eq!(stored.events[3].timestamp, 40);
}

#[test]
fn test_illegal_move_is_inconsistent() {
    let context: ServiceContext = ServiceContext::default();
    let mut persistence: Persistence = seed(&context, &[("MOS", 10)]);
    let id: String = only_id(&mut persistence).to_string();

    for status in ["EXECUTED", "RETURNED", "FINISHED"] {
        let err: ApiError = change_solicitation_status(
            &mut persistence,
            &context,
            &create_cteep_user(),
            &id,
            &request(status),
            20,
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::DomainRuleViolation { .. }));
        assert_eq!(err.to_string(), "Inconsistent change of status.");
    }
}

#[test]
fn test_other_company_cannot_answer() {
    let context: ServiceContext = ServiceContext::default();
    let mut persistence: Persistence = seed(&context, &[("MOS", 10)]);
    let id: String = only_id(&mut persistence).to_string();

    let err: ApiError = change_solicitation_status(
        &mut persistence,
        &context,
        &create_chesf_user(),
        &id,
        &request("BLOCKED"),
        20,
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "Not allowed for users from CHESF");
}

#[test]
fn test_unknown_solicitation() {
    let context: ServiceContext = ServiceContext::default();
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    for id in ["404", "abc"] {
        let err: ApiError = change_solicitation_status(
            &mut persistence,
            &context,
            &create_cteep_user(),
            id,
            &request("ACCEPTED"),
            20,
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::ResourceNotFound { .. }));
        assert_eq!(err.to_string(), "Solicitation not found");
    }
}
