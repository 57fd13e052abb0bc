// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.

use time::OffsetDateTime;
use tracing::{debug, info, warn};
use zapcot::{
    ListFilter, ResolvedQuery, ServiceContext, SolicitationDraft, StatusChange,
    StatusChangeCommand, apply_creation, apply_status_change, ordering_for, resolve_query,
    select_solicitations,
};
use zapcot_domain::{
    Caller, DomainError, NewSolicitation, OPERATOR_COMPANY_CODE, ReferenceCatalog, Solicitation,
};
use zapcot_persistence::{Persistence, PersistenceError};

use crate::auth::AuthorizationService;
use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::identity::IdentityProvider;
use crate::request_response::{
    AssociateTablesRequest, ChangeStatusRequest, CodeNameView, CreateSolicitationsRequest,
    CreateSolicitationsResponse, CurrentTimeResponse, LegacySolicitationRequest,
    ListSolicitationsQuery, ListTablesQuery, MessageResponse, SolicitationItemRequest,
    SolicitationView, TextOrNumber,
};

const BATCH_CREATED_MESSAGE: &str = "Voltage control solicitations created with success.";
const LEGACY_CREATED_MESSAGE: &str = "Voltage control solicitation created with success.";
const STATUS_CHANGED_MESSAGE: &str = "Solicitation status changed.";
const TABLES_ASSOCIATED_MESSAGE: &str = "The tables were associated with the user!";

/// Returns the current Unix time in milliseconds.
#[must_use]
pub fn now_millis() -> i64 {
    let nanos: i128 = OffsetDateTime::now_utc().unix_timestamp_nanos();
    i64::try_from(nanos / 1_000_000).unwrap_or(i64::MAX)
}

fn internal_error(operation: &str, err: &PersistenceError) -> ApiError {
    ApiError::Internal {
        message: format!("Failed to {operation}: {err}"),
    }
}

fn solicitation_not_found() -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: String::from("Solicitation"),
        message: String::from("Solicitation not found"),
    }
}

/// Validates a company named in a query and checks read access to it.
fn authorize_company_param(
    catalog: &ReferenceCatalog,
    caller: &Caller,
    company_code: &str,
    action: &str,
) -> Result<(), ApiError> {
    if !catalog.has_company(company_code) {
        return Err(translate_domain_error(DomainError::CompanyNotFound(
            company_code.to_string(),
        )));
    }
    AuthorizationService::authorize_company_read(caller, company_code, action)?;
    Ok(())
}

impl From<SolicitationItemRequest> for SolicitationDraft {
    fn from(item: SolicitationItemRequest) -> Self {
        Self {
            action: item.action,
            equipment: item.equipment,
            substation: item.substation,
            amount: item.amount.map(TextOrNumber::into_text),
            voltage: item.voltage.map(TextOrNumber::into_text),
            staggered: item.staggered,
            company_code: item.company_code,
        }
    }
}

/// Reshapes a flat request into a batch item.
fn legacy_draft(catalog: &ReferenceCatalog, request: LegacySolicitationRequest) -> SolicitationDraft {
    // An unknown substation belongs to no company; any known company then
    // fails the ownership check with "Invalid substation!".
    let company_code: String = request.company_code.unwrap_or_else(|| {
        catalog.substation(&request.substation).map_or_else(
            || OPERATOR_COMPANY_CODE.to_string(),
            |substation| substation.company_code.clone(),
        )
    });

    SolicitationDraft {
        action: request.action,
        equipment: request.equipment,
        substation: request.substation,
        amount: request.amount.map(TextOrNumber::into_text),
        voltage: request
            .voltage
            .or(request.value)
            .map(TextOrNumber::into_text),
        staggered: request.staggered,
        company_code,
    }
}

/// Creates a batch of solicitations.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `context` - Catalog, rules and status protocol
/// * `caller` - The authenticated caller
/// * `request` - Batch or legacy flat request
/// * `now` - Creation time in Unix milliseconds
///
/// # Returns
///
/// A `{message}` body for batch requests, a bare string for legacy ones.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not from the operator company
/// - The batch is empty or any item fails validation (nothing is stored)
/// - The store fails
pub fn create_solicitations(
    persistence: &mut Persistence,
    context: &ServiceContext,
    caller: &Caller,
    request: CreateSolicitationsRequest,
    now: i64,
) -> Result<CreateSolicitationsResponse, ApiError> {
    AuthorizationService::authorize_create_solicitations(caller)?;

    let (drafts, legacy): (Vec<SolicitationDraft>, bool) = match request {
        CreateSolicitationsRequest::Batch(batch) => (
            batch
                .solicitations
                .into_iter()
                .map(SolicitationDraft::from)
                .collect(),
            false,
        ),
        CreateSolicitationsRequest::Legacy(flat) => {
            (vec![legacy_draft(&context.catalog, flat)], true)
        }
    };

    let solicitations: Vec<NewSolicitation> =
        apply_creation(context, caller, &drafts, now).map_err(|e| {
            debug!(error = %e, "Solicitation batch rejected");
            translate_core_error(e)
        })?;

    let ids: Vec<i64> = persistence
        .insert_solicitations(&solicitations)
        .map_err(|e| internal_error("store solicitations", &e))?;

    info!(user_id = %caller.user_id, ?ids, "Solicitations created");

    Ok(if legacy {
        CreateSolicitationsResponse::Legacy(LEGACY_CREATED_MESSAGE.to_string())
    } else {
        CreateSolicitationsResponse::Batch(MessageResponse::new(BATCH_CREATED_MESSAGE))
    })
}

/// Moves a solicitation to a new status.
///
/// Authorization runs before the adjacency check, so a caller from the
/// wrong party is refused even when the move would be illegal anyway.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `context` - Catalog, rules and status protocol
/// * `caller` - The authenticated caller
/// * `solicitation_id` - The id from the request path
/// * `request` - The requested status
/// * `now` - Event time in Unix milliseconds
///
/// # Errors
///
/// Returns an error if:
/// - The solicitation does not exist
/// - The caller does not belong to the party bound to the destination
/// - The destination is not adjacent to the current status, or another
///   writer changed the status first
/// - The store fails
pub fn change_solicitation_status(
    persistence: &mut Persistence,
    context: &ServiceContext,
    caller: &Caller,
    solicitation_id: &str,
    request: &ChangeStatusRequest,
    now: i64,
) -> Result<MessageResponse, ApiError> {
    let id: i64 = solicitation_id
        .trim()
        .parse()
        .map_err(|_| solicitation_not_found())?;

    let current: Solicitation = match persistence.get_solicitation(id) {
        Ok(solicitation) => solicitation,
        Err(PersistenceError::SolicitationNotFound(_)) => return Err(solicitation_not_found()),
        Err(e) => return Err(internal_error("load solicitation", &e)),
    };

    AuthorizationService::authorize_status_change(caller, &current, &request.status)?;

    let command: StatusChangeCommand = StatusChangeCommand {
        solicitation_id: id,
        status: request.status.clone(),
    };
    let change: StatusChange =
        apply_status_change(context, caller, &current, &command, now).map_err(translate_core_error)?;

    match persistence.apply_status_change(&change) {
        Ok(()) => {}
        Err(PersistenceError::StatusConflict { .. }) => {
            warn!(solicitation_id = id, "Concurrent status change rejected");
            return Err(translate_domain_error(DomainError::InconsistentStatusChange {
                from: change.expected_status.as_str().to_string(),
                to: change.new_status.as_str().to_string(),
            }));
        }
        Err(PersistenceError::SolicitationNotFound(_)) => return Err(solicitation_not_found()),
        Err(e) => return Err(internal_error("store status change", &e)),
    }

    info!(
        solicitation_id = id,
        user_id = %caller.user_id,
        status = %change.new_status,
        "Solicitation status changed"
    );
    Ok(MessageResponse::new(STATUS_CHANGED_MESSAGE))
}

/// Lists solicitations visible to the caller.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `context` - Catalog, rules and status protocol
/// * `caller` - The authenticated caller
/// * `query` - Filters, sort and paging
///
/// # Errors
///
/// Returns an error if:
/// - The company is unknown, or belongs to someone else for a non-operator caller
/// - A non-operator caller omits the company
/// - The table or a substation is unknown, or the sort key is invalid
/// - The store fails
pub fn list_solicitations(
    persistence: &mut Persistence,
    context: &ServiceContext,
    caller: &Caller,
    query: ListSolicitationsQuery,
) -> Result<Vec<SolicitationView>, ApiError> {
    match query.company_code.as_deref() {
        Some(company_code) => authorize_company_param(
            &context.catalog,
            caller,
            company_code,
            "list_solicitations",
        )?,
        None if !caller.is_operator() => {
            return Err(ApiError::InvalidInput {
                field: String::from("company_code"),
                message: String::from("Company code not informed"),
            });
        }
        None => {}
    }

    let filter: ListFilter = ListFilter {
        company_code: query.company_code,
        table_code: query.table_code,
        substations: query.substations,
        sort: query.sort,
        from_id: query.from_id,
        limit: query.limit,
    };
    let resolved: ResolvedQuery =
        resolve_query(&context.catalog, &filter).map_err(translate_core_error)?;

    let snapshot: Vec<Solicitation> = persistence
        .list_solicitations(resolved.company_code.as_deref(), resolved.from_id)
        .map_err(|e| internal_error("list solicitations", &e))?;

    let selected: Vec<Solicitation> =
        select_solicitations(&resolved, ordering_for(caller), snapshot);

    debug!(user_id = %caller.user_id, count = selected.len(), "Solicitations listed");
    Ok(selected.iter().map(SolicitationView::from).collect())
}

/// Lists the tables of a company.
///
/// # Errors
///
/// Returns an error if the company is missing, unknown, or not readable by
/// the caller.
pub fn list_tables(
    context: &ServiceContext,
    caller: &Caller,
    query: &ListTablesQuery,
) -> Result<Vec<CodeNameView>, ApiError> {
    let company_code: &str = query
        .company_code
        .as_deref()
        .ok_or_else(|| ApiError::InvalidInput {
            field: String::from("company_code"),
            message: String::from("It's necessary the param company code"),
        })?;

    authorize_company_param(&context.catalog, caller, company_code, "list_tables")?;

    Ok(context
        .catalog
        .tables_of_company(company_code)
        .map(CodeNameView::from)
        .collect())
}

/// Replaces the tables associated with a user.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `context` - Catalog, rules and status protocol
/// * `identities` - The identity provider
/// * `caller` - The authenticated caller
/// * `user_id` - The user receiving the tables
/// * `request` - The table codes
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not a server administrator
/// - The list is empty, the user is unknown, or any table is unknown
/// - The store fails
pub fn associate_tables(
    persistence: &mut Persistence,
    context: &ServiceContext,
    identities: &dyn IdentityProvider,
    caller: &Caller,
    user_id: &str,
    request: &AssociateTablesRequest,
) -> Result<String, ApiError> {
    AuthorizationService::authorize_admin(caller, "associate_tables")?;

    if request.tables.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("tables"),
            message: String::from("Empty tables!"),
        });
    }

    if !identities.user_exists(user_id) {
        return Err(ApiError::InvalidInput {
            field: String::from("user_id"),
            message: String::from("User not found."),
        });
    }

    if request
        .tables
        .iter()
        .any(|code| context.catalog.table(None, code).is_none())
    {
        return Err(ApiError::InvalidInput {
            field: String::from("tables"),
            message: String::from("One or more invalid table!"),
        });
    }

    persistence
        .replace_user_tables(user_id, &request.tables)
        .map_err(|e| internal_error("associate tables", &e))?;

    info!(admin = %caller.user_id, user_id, tables = ?request.tables, "Tables associated");
    Ok(TABLES_ASSOCIATED_MESSAGE.to_string())
}

/// Lists the table codes associated with a user.
///
/// Users may read their own associations; administrators may read anyone's.
///
/// # Errors
///
/// Returns an error if the caller may not read them, the user is unknown,
/// or the store fails.
pub fn get_user_tables(
    persistence: &mut Persistence,
    identities: &dyn IdentityProvider,
    caller: &Caller,
    user_id: &str,
) -> Result<Vec<String>, ApiError> {
    if caller.user_id != user_id {
        AuthorizationService::authorize_admin(caller, "get_user_tables")?;
    }

    if !identities.user_exists(user_id) {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("User"),
            message: String::from("User not found."),
        });
    }

    persistence
        .list_user_tables(user_id)
        .map_err(|e| internal_error("list user tables", &e))
}

/// Lists every substation in catalog order.
#[must_use]
pub fn list_substations(context: &ServiceContext) -> Vec<CodeNameView> {
    context
        .catalog
        .substations()
        .iter()
        .map(CodeNameView::from)
        .collect()
}

/// Returns the server time.
#[must_use]
pub const fn current_time(now: i64) -> CurrentTimeResponse {
    CurrentTimeResponse { timestamp: now }
}
