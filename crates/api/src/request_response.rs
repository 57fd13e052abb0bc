// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use serde::{Deserialize, Serialize};
use zapcot_domain::{Solicitation, SolicitationEvent, Substation, Table};

/// A JSON value that may arrive either as a string or as a number.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
}

impl TextOrNumber {
    /// Returns the value as text, numbers in their JSON form.
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
        }
    }
}

/// One solicitation inside a batch creation request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SolicitationItemRequest {
    pub action: String,
    pub equipment: String,
    pub substation: String,
    #[serde(default)]
    pub amount: Option<TextOrNumber>,
    #[serde(default)]
    pub voltage: Option<TextOrNumber>,
    #[serde(default)]
    pub staggered: Option<bool>,
    pub company_code: String,
}

/// Batch creation request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SolicitationBatchRequest {
    pub solicitations: Vec<SolicitationItemRequest>,
}

/// Single flat solicitation, as sent by older clients.
///
/// `value` is the old name of `voltage`. A `bar` field may be present and is
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LegacySolicitationRequest {
    pub action: String,
    pub equipment: String,
    pub substation: String,
    #[serde(default)]
    pub amount: Option<TextOrNumber>,
    #[serde(default)]
    pub voltage: Option<TextOrNumber>,
    #[serde(default)]
    pub value: Option<TextOrNumber>,
    #[serde(default)]
    pub staggered: Option<bool>,
    /// Defaults to the company owning the substation.
    #[serde(default)]
    pub company_code: Option<String>,
}

/// Body of `POST voltage_control_solicitation`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CreateSolicitationsRequest {
    Batch(SolicitationBatchRequest),
    Legacy(LegacySolicitationRequest),
}

/// Generic `{message}` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    /// Creates a message response.
    #[must_use]
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Response to a creation request; its shape follows the request's shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CreateSolicitationsResponse {
    /// Batch requests receive `{message}`.
    Batch(MessageResponse),
    /// Legacy requests receive a bare JSON string.
    Legacy(String),
}

/// Body of `PUT voltage_control_solicitation/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChangeStatusRequest {
    pub status: String,
    /// Accepted for compatibility; not stored.
    #[serde(default)]
    pub justification: Option<String>,
}

/// Query string of `GET voltage_control_solicitation`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ListSolicitationsQuery {
    pub company_code: Option<String>,
    pub table_code: Option<String>,
    pub substations: Option<String>,
    pub sort: Option<String>,
    pub from_id: Option<i64>,
    pub limit: Option<usize>,
}

/// One entry of a solicitation's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolicitationEventView {
    pub status: String,
    pub user_id: String,
    pub time_stamp: i64,
}

impl From<&SolicitationEvent> for SolicitationEventView {
    fn from(event: &SolicitationEvent) -> Self {
        Self {
            status: event.status.as_str().to_string(),
            user_id: event.user_id.clone(),
            time_stamp: event.timestamp,
        }
    }
}

/// A solicitation as returned by list queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolicitationView {
    pub id: i64,
    pub action_code: String,
    pub equipment_code: String,
    pub substation_code: String,
    pub amount: Option<String>,
    pub voltage: Option<String>,
    pub staggered: Option<bool>,
    pub company_code: String,
    pub status: String,
    pub request_user_id: String,
    pub creation_time: i64,
    pub events: Vec<SolicitationEventView>,
}

impl From<&Solicitation> for SolicitationView {
    fn from(solicitation: &Solicitation) -> Self {
        Self {
            id: solicitation.id,
            action_code: solicitation.action.as_str().to_string(),
            equipment_code: solicitation.equipment.as_str().to_string(),
            substation_code: solicitation.substation_code.clone(),
            amount: solicitation.amount.clone(),
            voltage: solicitation.voltage.clone(),
            staggered: solicitation.staggered,
            company_code: solicitation.company_code.clone(),
            status: solicitation.status.as_str().to_string(),
            request_user_id: solicitation.request_user_id.clone(),
            creation_time: solicitation.creation_time,
            events: solicitation
                .events
                .iter()
                .map(SolicitationEventView::from)
                .collect(),
        }
    }
}

/// Query string of `GET tables`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ListTablesQuery {
    pub company_code: Option<String>,
}

/// A code and display name pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeNameView {
    pub code: String,
    pub name: String,
}

impl From<&Table> for CodeNameView {
    fn from(table: &Table) -> Self {
        Self {
            code: table.code.clone(),
            name: table.name.clone(),
        }
    }
}

impl From<&Substation> for CodeNameView {
    fn from(substation: &Substation) -> Self {
        Self {
            code: substation.code.clone(),
            name: substation.name.clone(),
        }
    }
}

/// Body of `PUT associate_tables/{userId}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct AssociateTablesRequest {
    #[serde(default)]
    pub tables: Vec<String>,
}

/// Response of `GET current_time`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentTimeResponse {
    /// Unix time in milliseconds.
    pub timestamp: i64,
}
