// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Timestamps cross the boundary as canonical UTC strings
//! (`2026-10-18T09:30:00Z`).

use gardens_domain::OperationStatus;
use serde::{Deserialize, Serialize};

/// API request to create an account.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    pub first_name: String,
    pub last_name: String,
    /// Station unit number (1-999).
    pub unit_no: i32,
}

/// API response for a successful sign-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpResponse {
    pub user_id: String,
    /// The normalized (lower-cased) email.
    pub email: String,
    pub message: String,
}

/// API request to sign in.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// API response for a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent requests.
    pub session_token: String,
    pub user_id: String,
    pub email: String,
    /// `"{last} {first}"`, when the account has a profile.
    pub display_name: Option<String>,
    pub expires_at: String,
}

/// API response describing the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhoAmIResponse {
    pub user_id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub unit_no: Option<i32>,
    pub last_sign_in_at: Option<String>,
}

/// One candidate operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDetailsInfo {
    pub id: String,
    /// The value stored in an operation's operator list.
    pub auth_id: String,
    pub first_name: String,
    pub last_name: String,
    pub unit_no: i32,
    pub display_name: String,
    /// Label for the operator selection menu.
    pub menu_label: String,
}

/// API response listing candidate operators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListUserDetailsResponse {
    pub users: Vec<UserDetailsInfo>,
}

/// An operator reference resolved for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorInfo {
    pub auth_id: String,
    /// The operator's name, or `"Unknown User"` when no profile matches.
    pub display_name: String,
}

/// Compact view of a pass's saved operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationSummary {
    pub status: OperationStatus,
    pub operators: Vec<OperatorInfo>,
    pub command_count: usize,
}

/// One upcoming pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassInfo {
    pub id: String,
    pub name: Option<String>,
    pub pass_start_time: Option<String>,
    pub pass_end_time: Option<String>,
    pub max_elevation: Option<f64>,
    pub azimuth_start: Option<f64>,
    pub azimuth_end: Option<f64>,
    pub duration_minutes: Option<f64>,
    /// `None` until the first save for this pass.
    pub operation: Option<OperationSummary>,
}

/// API response listing upcoming passes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPassesResponse {
    /// The station timezone used to decide "today".
    pub timezone: String,
    pub passes: Vec<PassInfo>,
}

/// One command as shown to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandEntryInfo {
    pub order: u32,
    pub command: Vec<String>,
    /// The bytes joined by spaces.
    pub command_text: String,
    pub description: String,
}

/// API response carrying the operation for one pass.
///
/// When nothing has been saved yet, `exists` is false and the remaining
/// fields hold the empty default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetOperationResponse {
    pub satellite_schedule_id: String,
    pub exists: bool,
    pub operation_id: Option<i64>,
    pub status: OperationStatus,
    pub operators: Vec<OperatorInfo>,
    pub commands: Vec<CommandEntryInfo>,
    /// The order the next appended command would receive.
    pub next_command_order: u32,
    pub create_user_id: Option<String>,
    pub created_at: Option<String>,
    pub update_at: Option<String>,
}

/// One command in a save request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommandEntryRequest {
    pub order: u32,
    /// Exactly 11 two-digit hex bytes.
    pub command: Vec<String>,
    #[serde(default)]
    pub description: String,
}

/// API request to save the whole draft for a pass.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SaveOperationRequest {
    /// `unset`, `operate` or `doNotOperate`; parsed by the handler.
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub operators: Vec<String>,
    #[serde(default)]
    pub commands: Vec<CommandEntryRequest>,
}

fn default_status() -> String {
    OperationStatus::Unset.to_string()
}

/// Which branch a save took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveKind {
    Inserted,
    Updated,
}

/// API response for a successful save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveOperationResponse {
    pub operation_id: i64,
    pub satellite_schedule_id: String,
    pub result: SaveKind,
    pub message: String,
}

/// API request to import satellite passes from CSV text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImportPassesRequest {
    pub csv_content: String,
}

/// Status of one imported CSV row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PassImportRowStatus {
    Imported,
    Failed,
}

/// Result for one CSV row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassImportRowResult {
    /// 1-based, excluding the header.
    pub row_number: usize,
    pub pass_id: Option<String>,
    pub status: PassImportRowStatus,
    pub errors: Vec<String>,
}

/// API response for a pass import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportPassesResponse {
    pub total_rows: usize,
    pub imported_count: usize,
    pub failed_count: usize,
    pub results: Vec<PassImportRowResult>,
}
