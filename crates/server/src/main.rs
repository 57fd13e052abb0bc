// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod session;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State as AxumState,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::{
    net::SocketAddr,
    path::{Path as FsPath, PathBuf},
    sync::Arc,
};
use tokio::sync::Mutex;
use tracing::{error, info, warn};
use zapcot::ServiceContext;
use zapcot_api::{
    ApiError, AssociateTablesRequest, ChangeStatusRequest, CodeNameView,
    CreateSolicitationsRequest, CreateSolicitationsResponse, CurrentTimeResponse,
    IdentityProvider, ListSolicitationsQuery, ListTablesQuery, MessageResponse, SolicitationView,
    StaticIdentityProvider, associate_tables, change_solicitation_status, create_solicitations,
    current_time, get_user_tables, list_solicitations, list_substations, list_tables, now_millis,
};
use zapcot_domain::{CatalogDefinition, ReferenceCatalog, RuleConfig, StatusProtocol};
use zapcot_persistence::Persistence;

use crate::session::SessionUser;

/// Prefix shared by every client route.
const CLIENT_API_PREFIX: &str = "/_matrix/client/r0";

/// Zapcot Server - HTTP server for voltage control solicitations
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 8008)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// JSON reference catalog (companies, substations, tables).
    /// If not provided, uses the built-in catalog.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// JSON list of users and their access tokens.
    /// If not provided, uses the built-in development users.
    #[arg(long)]
    identities: Option<PathBuf>,

    /// Status workflow revision: `current` or `legacy`
    #[arg(long, default_value_t = StatusProtocol::Current)]
    status_protocol: StatusProtocol,

    /// Largest amount accepted for a synchronous ADJUST
    #[arg(long, default_value_t = zapcot_domain::DEFAULT_SYNCHRONOUS_AMOUNT_CAP)]
    synchronous_amount_cap: f64,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The solicitation store.
    persistence: Arc<Mutex<Persistence>>,
    /// Reference catalog and rule settings.
    context: Arc<ServiceContext>,
    /// Resolves access tokens to callers.
    identities: Arc<dyn IdentityProvider>,
}

/// Error body with a machine readable code.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    errcode: String,
    error: String,
}

impl ErrorResponse {
    fn new(errcode: &str, error: &str) -> Self {
        Self {
            errcode: errcode.to_string(),
            error: error.to_string(),
        }
    }
}

/// Error body returned when a caller may not perform a write.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SoftLogoutResponse {
    soft_logout: String,
}

/// Shape of an error body.
enum ErrorBody {
    Coded(&'static str),
    SoftLogout,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    status: StatusCode,
    body: ErrorBody,
    message: String,
}

impl HttpError {
    const fn coded(status: StatusCode, errcode: &'static str, message: String) -> Self {
        Self {
            status,
            body: ErrorBody::Coded(errcode),
            message,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        match self.body {
            ErrorBody::Coded(errcode) => (
                self.status,
                Json(ErrorResponse::new(errcode, &self.message)),
            )
                .into_response(),
            ErrorBody::SoftLogout => (
                self.status,
                Json(SoftLogoutResponse {
                    soft_logout: self.message,
                }),
            )
                .into_response(),
        }
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Unauthorized { .. } => Self {
                status: StatusCode::UNAUTHORIZED,
                body: ErrorBody::SoftLogout,
                message: err.to_string(),
            },
            ApiError::Forbidden { .. } => {
                Self::coded(StatusCode::FORBIDDEN, "M_FORBIDDEN", err.to_string())
            }
            ApiError::DomainRuleViolation { .. } => {
                Self::coded(StatusCode::BAD_REQUEST, "M_UNKNOWN", err.to_string())
            }
            ApiError::InvalidInput { .. } => {
                Self::coded(StatusCode::BAD_REQUEST, "M_INVALID_PARAM", err.to_string())
            }
            ApiError::ResourceNotFound { .. } => {
                Self::coded(StatusCode::NOT_FOUND, "M_NOT_FOUND", err.to_string())
            }
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                Self::coded(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "M_UNKNOWN",
                    String::from("Internal server error"),
                )
            }
        }
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(error = %rejection, "Rejected request body");
        Self::coded(StatusCode::BAD_REQUEST, "M_BAD_JSON", rejection.body_text())
    }
}

impl From<QueryRejection> for HttpError {
    fn from(rejection: QueryRejection) -> Self {
        warn!(error = %rejection, "Rejected query string");
        Self::coded(
            StatusCode::BAD_REQUEST,
            "M_INVALID_PARAM",
            rejection.body_text(),
        )
    }
}

/// Handler for POST `voltage_control_solicitation`.
///
/// Creates a batch of solicitations, or a single one in the legacy shape.
async fn handle_create_solicitations(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(caller): SessionUser,
    payload: Result<Json<CreateSolicitationsRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateSolicitationsResponse>), HttpError> {
    let Json(request) = payload?;

    info!(
        user_id = %caller.user_id,
        company = %caller.company_code,
        "Handling create_solicitations request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: CreateSolicitationsResponse = create_solicitations(
        &mut persistence,
        &app_state.context,
        &caller,
        request,
        now_millis(),
    )?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for PUT `voltage_control_solicitation/{solicitation_id}`.
async fn handle_change_status(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(caller): SessionUser,
    Path(solicitation_id): Path<String>,
    payload: Result<Json<ChangeStatusRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, HttpError> {
    let Json(request) = payload?;

    info!(
        user_id = %caller.user_id,
        solicitation_id = %solicitation_id,
        status = %request.status,
        "Handling change_status request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: MessageResponse = change_solicitation_status(
        &mut persistence,
        &app_state.context,
        &caller,
        &solicitation_id,
        &request,
        now_millis(),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `voltage_control_solicitation`.
async fn handle_list_solicitations(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(caller): SessionUser,
    query: Result<Query<ListSolicitationsQuery>, QueryRejection>,
) -> Result<Json<Vec<SolicitationView>>, HttpError> {
    let Query(query) = query?;

    info!(
        user_id = %caller.user_id,
        company_code = ?query.company_code,
        table_code = ?query.table_code,
        "Handling list_solicitations request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let views: Vec<SolicitationView> =
        list_solicitations(&mut persistence, &app_state.context, &caller, query)?;
    drop(persistence);

    Ok(Json(views))
}

/// Handler for GET `tables`.
async fn handle_list_tables(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(caller): SessionUser,
    query: Result<Query<ListTablesQuery>, QueryRejection>,
) -> Result<Json<Vec<CodeNameView>>, HttpError> {
    let Query(query) = query?;

    info!(
        user_id = %caller.user_id,
        company_code = ?query.company_code,
        "Handling list_tables request"
    );

    Ok(Json(list_tables(&app_state.context, &caller, &query)?))
}

/// Handler for PUT `associate_tables/{user_id}`.
///
/// Replaces the tables a user follows. Administrators only.
async fn handle_associate_tables(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(caller): SessionUser,
    Path(user_id): Path<String>,
    payload: Result<Json<AssociateTablesRequest>, JsonRejection>,
) -> Result<Json<String>, HttpError> {
    let Json(request) = payload?;

    info!(
        user_id = %caller.user_id,
        target_user = %user_id,
        tables = request.tables.len(),
        "Handling associate_tables request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let message: String = associate_tables(
        &mut persistence,
        &app_state.context,
        app_state.identities.as_ref(),
        &caller,
        &user_id,
        &request,
    )?;
    drop(persistence);

    Ok(Json(message))
}

/// Handler for GET `associate_tables/{user_id}`.
async fn handle_get_user_tables(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(caller): SessionUser,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<String>>, HttpError> {
    info!(
        user_id = %caller.user_id,
        target_user = %user_id,
        "Handling get_user_tables request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let tables: Vec<String> = get_user_tables(
        &mut persistence,
        app_state.identities.as_ref(),
        &caller,
        &user_id,
    )?;
    drop(persistence);

    Ok(Json(tables))
}

/// Handler for GET `substations`.
async fn handle_list_substations(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(caller): SessionUser,
) -> Json<Vec<CodeNameView>> {
    info!(user_id = %caller.user_id, "Handling list_substations request");
    Json(list_substations(&app_state.context))
}

/// Handler for GET `current_time`.
async fn handle_current_time(SessionUser(_caller): SessionUser) -> Json<CurrentTimeResponse> {
    Json(current_time(now_millis()))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    let client_api: Router<AppState> = Router::new()
        .route(
            "/voltage_control_solicitation",
            post(handle_create_solicitations).get(handle_list_solicitations),
        )
        .route(
            "/voltage_control_solicitation/{solicitation_id}",
            put(handle_change_status),
        )
        .route("/tables", get(handle_list_tables))
        .route(
            "/associate_tables/{user_id}",
            put(handle_associate_tables).get(handle_get_user_tables),
        )
        .route("/substations", get(handle_list_substations))
        .route("/current_time", get(handle_current_time));

    Router::new()
        .nest(CLIENT_API_PREFIX, client_api)
        .with_state(app_state)
}

/// Loads the reference catalog, falling back to the built-in one.
fn load_catalog(path: Option<&FsPath>) -> Result<ReferenceCatalog, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        info!("Using built-in reference catalog");
        return Ok(ReferenceCatalog::builtin());
    };

    info!("Loading reference catalog from: {}", path.display());
    let json: String = std::fs::read_to_string(path)?;
    let definition: CatalogDefinition = serde_json::from_str(&json)?;
    Ok(ReferenceCatalog::new(definition)?)
}

/// Loads the identity list, falling back to the development users.
fn load_identities(
    path: Option<&FsPath>,
) -> Result<StaticIdentityProvider, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        warn!("Using built-in development identities");
        return Ok(StaticIdentityProvider::builtin());
    };

    info!("Loading identities from: {}", path.display());
    let json: String = std::fs::read_to_string(path)?;
    Ok(StaticIdentityProvider::from_json(&json)?)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Zapcot Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let catalog: ReferenceCatalog = load_catalog(args.catalog.as_deref())?;
    let identities: StaticIdentityProvider = load_identities(args.identities.as_deref())?;
    let rules: RuleConfig = RuleConfig {
        synchronous_amount_cap: args.synchronous_amount_cap,
        ..RuleConfig::default()
    };

    info!(
        protocol = %args.status_protocol,
        users = identities.len(),
        "Service configured"
    );

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        context: Arc::new(ServiceContext::new(
            Arc::new(catalog),
            rules,
            args.status_protocol,
        )),
        identities: Arc::new(identities),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    const ONS_TOKEN: &str = "ons-token";
    const CTEEP_TOKEN: &str = "cteep-token";
    const CHESF_TOKEN: &str = "chesf-token";
    const ADMIN_TOKEN: &str = "admin-token";

    /// Helper to create test app state with in-memory persistence.
    fn create_test_app_state() -> AppState {
        let persistence: Persistence =
            Persistence::new_in_memory().expect("Failed to create in-memory persistence");
        AppState {
            persistence: Arc::new(Mutex::new(persistence)),
            context: Arc::new(ServiceContext::default()),
            identities: Arc::new(StaticIdentityProvider::builtin()),
        }
    }

    /// Sends a request and returns the status and the decoded JSON body.
    async fn send(
        app: &Router,
        method: &str,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (HttpStatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(format!("{CLIENT_API_PREFIX}{path}"));
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let request_body: Body = match body {
            Some(value) => {
                builder = builder.header("content-type", "application/json");
                Body::from(serde_json::to_string(&value).unwrap())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(builder.body(request_body).unwrap())
            .await
            .unwrap();
        let status: HttpStatusCode = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn capacitor_batch(substation: &str) -> Value {
        json!({
            "solicitations": [{
                "action": "TURN_ON",
                "equipment": "CAPACITOR",
                "substation": substation,
                "amount": "5",
                "company_code": "CTEEP"
            }]
        })
    }

    async fn create_and_fetch_id(app: &Router) -> i64 {
        let (status, _) = send(
            app,
            "POST",
            "/voltage_control_solicitation",
            Some(ONS_TOKEN),
            Some(capacitor_batch("MIR")),
        )
        .await;
        assert_eq!(status, HttpStatusCode::CREATED);

        let (status, body) = send(
            app,
            "GET",
            "/voltage_control_solicitation?company_code=CTEEP",
            Some(ONS_TOKEN),
            None,
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        body[0]["id"].as_i64().unwrap()
    }

    #[test]
    fn test_load_catalog_from_file() {
        let path: PathBuf = std::env::temp_dir().join(format!(
            "zapcot_catalog_{}.json",
            std::process::id()
        ));
        let json: Value = json!({
            "companies": [
                {"code": "ONS", "name": "Operador"},
                {"code": "EQTL", "name": "Equatorial"}
            ],
            "substations": [
                {"code": "SLZ", "name": "Sao Luis", "company_code": "EQTL"}
            ],
            "tables": [
                {"code": "E1", "name": "Tabela E1", "company_code": "EQTL", "substations": ["SLZ"]}
            ]
        });
        std::fs::write(&path, json.to_string()).unwrap();

        let catalog: ReferenceCatalog = load_catalog(Some(path.as_path())).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(catalog.has_company("EQTL"));
        assert!(catalog.table(Some("EQTL"), "E1").is_some());
        assert!(load_catalog(None).unwrap().has_company("CTEEP"));
    }

    #[tokio::test]
    async fn test_create_capacitor_batch_returns_created() {
        let app: Router = build_router(create_test_app_state());

        let (status, body) = send(
            &app,
            "POST",
            "/voltage_control_solicitation",
            Some(ONS_TOKEN),
            Some(capacitor_batch("MIR")),
        )
        .await;

        assert_eq!(status, HttpStatusCode::CREATED);
        assert_eq!(
            body["message"],
            "Voltage control solicitations created with success."
        );
    }

    #[tokio::test]
    async fn test_create_legacy_payload_returns_bare_string() {
        let app: Router = build_router(create_test_app_state());

        let (status, body) = send(
            &app,
            "POST",
            "/voltage_control_solicitation",
            Some(ONS_TOKEN),
            Some(json!({
                "action": "LIGAR",
                "equipment": "CAPACITOR",
                "substation": "PIR",
                "amount": 5,
                "bar": "1"
            })),
        )
        .await;

        assert_eq!(status, HttpStatusCode::CREATED);
        assert_eq!(body, "Voltage control solicitation created with success.");

        let (_, listed) = send(
            &app,
            "GET",
            "/voltage_control_solicitation",
            Some(CTEEP_TOKEN),
            None,
        )
        .await;
        assert_eq!(listed[0]["company_code"], "CTEEP");
        assert_eq!(listed[0]["action_code"], "TURN_ON");
        assert_eq!(listed[0]["amount"], "5");
    }

    #[tokio::test]
    async fn test_reactor_without_voltage_is_rejected() {
        let app: Router = build_router(create_test_app_state());

        let (status, body) = send(
            &app,
            "POST",
            "/voltage_control_solicitation",
            Some(ONS_TOKEN),
            Some(json!({
                "solicitations": [{
                    "action": "TURN_ON",
                    "equipment": "REACTOR",
                    "substation": "MIR",
                    "amount": "1",
                    "voltage": "",
                    "company_code": "CTEEP"
                }]
            })),
        )
        .await;

        assert_eq!(status, HttpStatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Voltage value must be informed for 'REATOR'.");
    }

    #[tokio::test]
    async fn test_staggered_transformer_is_rejected() {
        let app: Router = build_router(create_test_app_state());

        let (status, body) = send(
            &app,
            "POST",
            "/voltage_control_solicitation",
            Some(ONS_TOKEN),
            Some(json!({
                "solicitations": [{
                    "action": "RISE",
                    "equipment": "TRANSFORMER",
                    "substation": "MIR",
                    "amount": 1,
                    "voltage": "500kV",
                    "staggered": true,
                    "company_code": "CTEEP"
                }]
            })),
        )
        .await;

        assert_eq!(status, HttpStatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"],
            "Staggered value cannot be saved for 'TRANSFORMADOR'."
        );
    }

    #[tokio::test]
    async fn test_create_by_non_operator_is_soft_logout() {
        let app: Router = build_router(create_test_app_state());

        let (status, body) = send(
            &app,
            "POST",
            "/voltage_control_solicitation",
            Some(CTEEP_TOKEN),
            Some(capacitor_batch("MIR")),
        )
        .await;

        assert_eq!(status, HttpStatusCode::UNAUTHORIZED);
        assert_eq!(body["soft_logout"], "User should to belong ONS.");
    }

    #[tokio::test]
    async fn test_status_change_by_target_then_operator() {
        let app: Router = build_router(create_test_app_state());
        let id: i64 = create_and_fetch_id(&app).await;
        let path: String = format!("/voltage_control_solicitation/{id}");

        let (status, body) = send(
            &app,
            "PUT",
            &path,
            Some(CTEEP_TOKEN),
            Some(json!({"status": "ACCEPTED"})),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["message"], "Solicitation status changed.");

        let (status, body) = send(
            &app,
            "PUT",
            &path,
            Some(ONS_TOKEN),
            Some(json!({"status": "ACCEPTED"})),
        )
        .await;
        assert_eq!(status, HttpStatusCode::UNAUTHORIZED);
        assert_eq!(body["soft_logout"], "Not allowed for users from ONS");

        let (_, listed) = send(
            &app,
            "GET",
            "/voltage_control_solicitation",
            Some(CTEEP_TOKEN),
            None,
        )
        .await;
        assert_eq!(listed[0]["status"], "ACCEPTED");
        assert_eq!(listed[0]["events"].as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn test_illegal_transition_is_bad_request() {
        let app: Router = build_router(create_test_app_state());
        let id: i64 = create_and_fetch_id(&app).await;

        let (status, body) = send(
            &app,
            "PUT",
            &format!("/voltage_control_solicitation/{id}"),
            Some(CTEEP_TOKEN),
            Some(json!({"status": "EXECUTED"})),
        )
        .await;

        assert_eq!(status, HttpStatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Inconsistent change of status.");
    }

    #[tokio::test]
    async fn test_status_change_of_unknown_solicitation_is_not_found() {
        let app: Router = build_router(create_test_app_state());

        let (status, body) = send(
            &app,
            "PUT",
            "/voltage_control_solicitation/999",
            Some(CTEEP_TOKEN),
            Some(json!({"status": "ACCEPTED"})),
        )
        .await;

        assert_eq!(status, HttpStatusCode::NOT_FOUND);
        assert_eq!(body["errcode"], "M_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_listing_foreign_company_is_forbidden() {
        let app: Router = build_router(create_test_app_state());

        let (status, body) = send(
            &app,
            "GET",
            "/voltage_control_solicitation?company_code=CHESF",
            Some(CTEEP_TOKEN),
            None,
        )
        .await;

        assert_eq!(status, HttpStatusCode::FORBIDDEN);
        assert_eq!(
            body["error"],
            "User can only access the solicitations of your company"
        );
    }

    #[tokio::test]
    async fn test_invalid_query_value_is_bad_request() {
        let app: Router = build_router(create_test_app_state());

        let (status, body) = send(
            &app,
            "GET",
            "/voltage_control_solicitation?from_id=abc",
            Some(ONS_TOKEN),
            None,
        )
        .await;

        assert_eq!(status, HttpStatusCode::BAD_REQUEST);
        assert_eq!(body["errcode"], "M_INVALID_PARAM");
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_json() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(format!("{CLIENT_API_PREFIX}/voltage_control_solicitation"))
                    .header("authorization", format!("Bearer {ONS_TOKEN}"))
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.errcode, "M_BAD_JSON");
    }

    #[tokio::test]
    async fn test_missing_token_is_rejected() {
        let app: Router = build_router(create_test_app_state());

        let (status, body) = send(&app, "GET", "/substations", None, None).await;

        assert_eq!(status, HttpStatusCode::UNAUTHORIZED);
        assert_eq!(body["errcode"], "M_MISSING_TOKEN");
    }

    #[tokio::test]
    async fn test_unknown_token_is_rejected() {
        let app: Router = build_router(create_test_app_state());

        let (status, body) = send(&app, "GET", "/substations", Some("nope"), None).await;

        assert_eq!(status, HttpStatusCode::UNAUTHORIZED);
        assert_eq!(body["errcode"], "M_UNKNOWN_TOKEN");
    }

    #[tokio::test]
    async fn test_access_token_query_parameter_is_accepted() {
        let app: Router = build_router(create_test_app_state());

        let (status, body) = send(
            &app,
            "GET",
            &format!("/current_time?access_token={ONS_TOKEN}"),
            None,
            None,
        )
        .await;

        assert_eq!(status, HttpStatusCode::OK);
        assert!(body["timestamp"].as_i64().unwrap() > 0);
    }

    #[tokio::test]
    async fn test_list_substations_in_catalog_order() {
        let app: Router = build_router(create_test_app_state());

        let (status, body) = send(&app, "GET", "/substations", Some(CHESF_TOKEN), None).await;

        assert_eq!(status, HttpStatusCode::OK);
        let substations: Vec<CodeNameView> = serde_json::from_value(body).unwrap();
        assert_eq!(substations.len(), 6);
        assert_eq!(substations[0].code, "PIR");
        assert_eq!(substations[1].code, "MIR");
    }

    #[tokio::test]
    async fn test_list_tables_scoping() {
        let app: Router = build_router(create_test_app_state());

        let (status, body) = send(
            &app,
            "GET",
            "/tables?company_code=CTEEP",
            Some(ONS_TOKEN),
            None,
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        let tables: Vec<CodeNameView> = serde_json::from_value(body).unwrap();
        let codes: Vec<&str> = tables.iter().map(|t| t.code.as_str()).collect();
        assert_eq!(codes, vec!["A1", "A2", "A3"]);

        let (status, _) = send(
            &app,
            "GET",
            "/tables?company_code=CTEEP",
            Some(CHESF_TOKEN),
            None,
        )
        .await;
        assert_eq!(status, HttpStatusCode::FORBIDDEN);

        let (status, body) = send(&app, "GET", "/tables", Some(ONS_TOKEN), None).await;
        assert_eq!(status, HttpStatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "It's necessary the param company code");
    }

    #[tokio::test]
    async fn test_associate_tables_round_trip() {
        let app: Router = build_router(create_test_app_state());
        let path: &str = "/associate_tables/%40testercteep%3Azapcot";

        let (status, body) = send(
            &app,
            "PUT",
            path,
            Some(ADMIN_TOKEN),
            Some(json!({"tables": ["A2", "A1"]})),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body, "The tables were associated with the user!");

        let (status, body) = send(&app, "GET", path, Some(CTEEP_TOKEN), None).await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body, json!(["A1", "A2"]));
    }

    #[tokio::test]
    async fn test_associate_tables_requires_admin() {
        let app: Router = build_router(create_test_app_state());

        let (status, body) = send(
            &app,
            "PUT",
            "/associate_tables/%40testercteep%3Azapcot",
            Some(ONS_TOKEN),
            Some(json!({"tables": ["A1"]})),
        )
        .await;

        assert_eq!(status, HttpStatusCode::FORBIDDEN);
        assert_eq!(body["error"], "You are not a server admin");
    }

    #[tokio::test]
    async fn test_associate_tables_validation_messages() {
        let app: Router = build_router(create_test_app_state());

        let (status, body) = send(
            &app,
            "PUT",
            "/associate_tables/%40testercteep%3Azapcot",
            Some(ADMIN_TOKEN),
            Some(json!({"tables": []})),
        )
        .await;
        assert_eq!(status, HttpStatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Empty tables!");

        let (status, body) = send(
            &app,
            "PUT",
            "/associate_tables/%40nobody%3Azapcot",
            Some(ADMIN_TOKEN),
            Some(json!({"tables": ["A1"]})),
        )
        .await;
        assert_eq!(status, HttpStatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "User not found.");

        let (status, body) = send(
            &app,
            "PUT",
            "/associate_tables/%40testercteep%3Azapcot",
            Some(ADMIN_TOKEN),
            Some(json!({"tables": ["A1", "ZZ"]})),
        )
        .await;
        assert_eq!(status, HttpStatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "One or more invalid table!");
    }
}
