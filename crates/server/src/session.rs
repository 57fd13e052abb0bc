// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Access token extraction for the server.
//!
//! Every route requires a caller. The token is read from the
//! `Authorization: Bearer <token>` header, falling back to the
//! `access_token` query parameter, and resolved through the identity
//! provider held in the application state.

use axum::{
    Json,
    extract::{FromRequestParts, Query},
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::{debug, warn};
use zapcot_api::IdentityError;
use zapcot_domain::Caller;

use crate::{AppState, ErrorResponse};

const MISSING_TOKEN_ERRCODE: &str = "M_MISSING_TOKEN";
const UNKNOWN_TOKEN_ERRCODE: &str = "M_UNKNOWN_TOKEN";

#[derive(Debug, Default, Deserialize)]
struct AccessTokenQuery {
    access_token: Option<String>,
}

/// Extractor for the authenticated caller.
///
/// # Errors
///
/// Rejects with HTTP 401 if:
/// - no token is present in the header or the query string
/// - the `Authorization` header is not a bearer header
/// - the token is unknown to the identity provider
pub struct SessionUser(pub Caller);

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token: String = extract_token(parts)?;

        let caller: Caller = state.identities.authenticate(&token).map_err(|e| {
            warn!(error = %e, "Access token rejected");
            SessionError::from(e)
        })?;

        debug!(user_id = %caller.user_id, company = %caller.company_code, "Caller authenticated");

        Ok(Self(caller))
    }
}

fn extract_token(parts: &Parts) -> Result<String, SessionError> {
    if let Some(header) = parts.headers.get(AUTHORIZATION) {
        let value: &str = header.to_str().map_err(|_| {
            warn!("Invalid Authorization header encoding");
            SessionError::InvalidAuthorizationHeader
        })?;
        let token: &str = value.strip_prefix("Bearer ").ok_or_else(|| {
            warn!("Authorization header does not start with 'Bearer '");
            SessionError::InvalidAuthorizationHeader
        })?;
        return Ok(token.trim().to_string());
    }

    let query: AccessTokenQuery = Query::<AccessTokenQuery>::try_from_uri(&parts.uri)
        .map(|Query(query)| query)
        .unwrap_or_default();

    query
        .access_token
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            debug!("Request carries no access token");
            SessionError::MissingToken
        })
}

/// Token extraction errors.
#[derive(Debug)]
pub enum SessionError {
    /// No access token was supplied.
    MissingToken,
    /// The `Authorization` header is malformed.
    InvalidAuthorizationHeader,
    /// The token does not resolve to a user.
    UnknownToken,
}

impl From<IdentityError> for SessionError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::MissingToken => Self::MissingToken,
            _ => Self::UnknownToken,
        }
    }
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let (errcode, message): (&str, &str) = match self {
            Self::MissingToken => (MISSING_TOKEN_ERRCODE, "Missing access token"),
            Self::InvalidAuthorizationHeader => (
                MISSING_TOKEN_ERRCODE,
                "Invalid Authorization header format. Expected: 'Bearer <token>'",
            ),
            Self::UnknownToken => (UNKNOWN_TOKEN_ERRCODE, "Unrecognised access token"),
        };

        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new(errcode, message)),
        )
            .into_response()
    }
}
