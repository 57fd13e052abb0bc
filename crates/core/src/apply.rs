// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::str::FromStr;
use zapcot_domain::{
    Caller, DomainError, NewSolicitation, Solicitation, SolicitationEvent, SolicitationStatus,
    ValidatedParams, validate_solicitation_params, validate_solicitation_target,
};

use crate::command::{SolicitationDraft, StatusChangeCommand};
use crate::context::{ServiceContext, StatusChange};
use crate::error::CoreError;

/// Validates a batch of drafts and produces the solicitations to store.
///
/// Validation is all-or-nothing: the first failing draft rejects the batch.
///
/// # Arguments
///
/// * `context` - The service context (catalog, rules, protocol)
/// * `caller` - The user creating the solicitations
/// * `drafts` - The requested solicitations
/// * `now` - Creation time in unix milliseconds
///
/// # Returns
///
/// * `Ok(Vec<NewSolicitation>)` in request order, all in the protocol's
///   initial status
/// * `Err(CoreError)` if the batch is empty or any draft is invalid
///
/// # Errors
///
/// Returns an error if:
/// - The batch is empty
/// - A draft violates an equipment rule
/// - A draft names an unknown company or a substation outside it
pub fn apply_creation(
    context: &ServiceContext,
    caller: &Caller,
    drafts: &[SolicitationDraft],
    now: i64,
) -> Result<Vec<NewSolicitation>, CoreError> {
    if drafts.is_empty() {
        return Err(CoreError::DomainViolation(
            DomainError::EmptySolicitationBatch,
        ));
    }

    drafts
        .iter()
        .enumerate()
        .map(|(index, draft)| {
            build_solicitation(context, caller, draft, now)
                .map_err(|error| CoreError::InvalidBatchItem { index, error })
        })
        .collect()
}

fn build_solicitation(
    context: &ServiceContext,
    caller: &Caller,
    draft: &SolicitationDraft,
    now: i64,
) -> Result<NewSolicitation, DomainError> {
    let validated: ValidatedParams = validate_solicitation_params(&draft.params(), &context.rules)?;
    validate_solicitation_target(&context.catalog, &draft.company_code, &draft.substation)?;

    Ok(NewSolicitation {
        action: validated.action,
        equipment: validated.equipment,
        substation_code: draft.substation.clone(),
        amount: validated.amount,
        voltage: validated.voltage,
        staggered: validated.staggered,
        company_code: draft.company_code.clone(),
        request_user_id: caller.user_id.clone(),
        creation_time: now,
        status: context.protocol.initial_status(),
    })
}

/// Evaluates a status change against the protocol's transition graph.
///
/// Authorization is not checked here; callers must run the authorization
/// guard first.
///
/// # Arguments
///
/// * `context` - The service context
/// * `caller` - The user requesting the change
/// * `current` - The solicitation as currently stored
/// * `command` - The requested change
/// * `now` - Event time in unix milliseconds
///
/// # Errors
///
/// Returns `DomainError::InconsistentStatusChange` if the requested status is
/// unknown or not adjacent to the current one.
pub fn apply_status_change(
    context: &ServiceContext,
    caller: &Caller,
    current: &Solicitation,
    command: &StatusChangeCommand,
    now: i64,
) -> Result<StatusChange, CoreError> {
    let requested: SolicitationStatus =
        SolicitationStatus::from_str(&command.status).map_err(|_| {
            DomainError::InconsistentStatusChange {
                from: current.status.as_str().to_string(),
                to: command.status.clone(),
            }
        })?;

    context
        .protocol
        .validate_transition(current.status, requested)?;

    Ok(StatusChange {
        solicitation_id: current.id,
        expected_status: current.status,
        new_status: requested,
        event: SolicitationEvent {
            status: requested,
            user_id: caller.user_id.clone(),
            timestamp: now,
        },
    })
}
