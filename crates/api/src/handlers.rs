// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.

use std::collections::HashMap;

use chrono_tz::Tz;
use gardens::{OperationDraft, SubmittedCommand};
use gardens_domain::{
    CommandEntry, OperationRecord, OperationStatus, SatellitePass, UNKNOWN_USER_LABEL, UserDetails,
    filter_upcoming, format_timestamp, validate_email, validate_person_name, validate_unit_no,
};
use gardens_persistence::{
    NewAccount, OperationWrite, Persistence, PersistenceError, SaveOutcome, UserData,
};
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::auth::{AuthenticatedUser, AuthenticationService, LoginSession};
use crate::csv_import::{ParsedPassRow, parse_passes_csv};
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::password_policy::PasswordPolicy;
use crate::request_response::{
    CommandEntryInfo, GetOperationResponse, ImportPassesRequest, ImportPassesResponse,
    ListPassesResponse, ListUserDetailsResponse, LoginRequest, LoginResponse, OperationSummary,
    OperatorInfo, PassImportRowResult, PassImportRowStatus, PassInfo, SaveKind,
    SaveOperationRequest, SaveOperationResponse, SignUpRequest, SignUpResponse, UserDetailsInfo,
    WhoAmIResponse,
};

/// Creates an account with its operator profile.
///
/// # Errors
///
/// Returns an error if:
/// - Any profile field is invalid
/// - The password violates the password policy
/// - The email is already registered
pub fn sign_up(
    persistence: &mut Persistence,
    request: &SignUpRequest,
) -> Result<SignUpResponse, ApiError> {
    validate_email(&request.email).map_err(translate_domain_error)?;
    validate_person_name("First name", &request.first_name).map_err(translate_domain_error)?;
    validate_person_name("Last name", &request.last_name).map_err(translate_domain_error)?;
    validate_unit_no(request.unit_no).map_err(translate_domain_error)?;

    PasswordPolicy::default().validate(
        &request.password,
        &request.password_confirmation,
        &request.email,
    )?;

    let account: NewAccount = NewAccount {
        email: request.email.trim().to_string(),
        password: request.password.clone(),
        first_name: request.first_name.clone(),
        last_name: request.last_name.clone(),
        unit_no: request.unit_no,
    };

    let user_id: String = persistence
        .create_account(&account)
        .map_err(|e| translate_persistence_error("Failed to create account", e))?;

    Ok(SignUpResponse {
        user_id,
        email: account.email.to_lowercase(),
        message: String::from("Account created"),
    })
}

/// Signs in and creates a session.
///
/// # Errors
///
/// Returns an error if the credentials are wrong or a database operation fails.
pub fn login(
    persistence: &mut Persistence,
    request: &LoginRequest,
) -> Result<LoginResponse, ApiError> {
    let session: LoginSession =
        AuthenticationService::login(persistence, &request.email, &request.password)?;

    let details: Option<UserDetails> = persistence
        .get_user_details_by_auth_id(&session.user.user_id)
        .map_err(|e| translate_persistence_error("Failed to load user details", e))?;

    Ok(LoginResponse {
        session_token: session.session_token,
        user_id: session.user.user_id,
        email: session.user.email,
        display_name: details.as_ref().map(UserDetails::display_name),
        expires_at: session.expires_at,
    })
}

/// Logs out by deleting the session.
///
/// # Errors
///
/// Returns an error if the logout fails.
pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), ApiError> {
    AuthenticationService::logout(persistence, session_token)?;
    Ok(())
}

/// Returns the signed-in user's account and profile.
///
/// # Errors
///
/// Returns an error if the profile lookup fails.
pub fn whoami(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    user_data: &UserData,
) -> Result<WhoAmIResponse, ApiError> {
    let details: Option<UserDetails> = persistence
        .get_user_details_by_auth_id(&user.user_id)
        .map_err(|e| translate_persistence_error("Failed to load user details", e))?;

    Ok(WhoAmIResponse {
        user_id: user.user_id.clone(),
        email: user.email.clone(),
        display_name: details.as_ref().map(UserDetails::display_name),
        unit_no: details.as_ref().map(|d| d.unit_no),
        last_sign_in_at: user_data.last_sign_in_at.clone(),
    })
}

/// Lists every user profile, for the operator selection menu.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_user_details(
    persistence: &mut Persistence,
) -> Result<ListUserDetailsResponse, ApiError> {
    let users: Vec<UserDetailsInfo> = persistence
        .list_user_details()
        .map_err(|e| translate_persistence_error("Failed to list user details", e))?
        .into_iter()
        .map(|details| UserDetailsInfo {
            display_name: details.display_name(),
            menu_label: details.menu_label(),
            id: details.id,
            auth_id: details.auth_id,
            first_name: details.first_name,
            last_name: details.last_name,
            unit_no: details.unit_no,
        })
        .collect();

    Ok(ListUserDetailsResponse { users })
}

/// Lists passes starting today or later in the station timezone.
///
/// Each pass carries a summary of its saved operation, if any.
///
/// # Errors
///
/// Returns an error if a database query fails or a timestamp cannot be
/// rendered.
pub fn list_upcoming_passes(
    persistence: &mut Persistence,
    now: OffsetDateTime,
    tz: Tz,
) -> Result<ListPassesResponse, ApiError> {
    let passes: Vec<SatellitePass> = persistence
        .list_satellite_passes()
        .map_err(|e| translate_persistence_error("Failed to list satellite passes", e))?;
    let upcoming: Vec<SatellitePass> = filter_upcoming(passes, now, tz);

    let mut operations: HashMap<String, OperationRecord> = persistence
        .list_operations()
        .map_err(|e| translate_persistence_error("Failed to list operations", e))?
        .into_iter()
        .map(|record| (record.satellite_schedule_id.clone(), record))
        .collect();
    let directory: HashMap<String, UserDetails> = load_user_directory(persistence)?;

    let mut infos: Vec<PassInfo> = Vec::with_capacity(upcoming.len());
    for pass in upcoming {
        let operation: Option<OperationSummary> =
            operations.remove(&pass.id).map(|record| OperationSummary {
                status: record.status,
                operators: resolve_operators(&record.operators, &directory),
                command_count: record.commands.len(),
            });

        infos.push(PassInfo {
            duration_minutes: pass.duration_minutes(),
            pass_start_time: format_optional(pass.pass_start_time)?,
            pass_end_time: format_optional(pass.pass_end_time)?,
            id: pass.id,
            name: pass.name,
            max_elevation: pass.max_elevation,
            azimuth_start: pass.azimuth_start,
            azimuth_end: pass.azimuth_end,
            operation,
        });
    }

    Ok(ListPassesResponse {
        timezone: tz.name().to_string(),
        passes: infos,
    })
}

/// Loads the operation for a pass, or the empty default if none is saved.
///
/// # Errors
///
/// Returns an error if the pass does not exist or a database query fails.
pub fn get_operation(
    persistence: &mut Persistence,
    satellite_schedule_id: &str,
) -> Result<GetOperationResponse, ApiError> {
    require_pass(persistence, satellite_schedule_id)?;

    let record: Option<OperationRecord> = persistence
        .get_operation_by_schedule_id(satellite_schedule_id)
        .map_err(|e| translate_persistence_error("Failed to load operation", e))?;
    let directory: HashMap<String, UserDetails> = load_user_directory(persistence)?;

    let Some(record) = record else {
        let draft: OperationDraft = OperationDraft::new(satellite_schedule_id);
        return Ok(GetOperationResponse {
            satellite_schedule_id: draft.satellite_schedule_id.clone(),
            exists: false,
            operation_id: None,
            status: draft.status,
            operators: Vec::new(),
            commands: Vec::new(),
            next_command_order: draft.next_command_order(),
            create_user_id: None,
            created_at: None,
            update_at: None,
        });
    };

    let draft: OperationDraft = OperationDraft::from_record(&record);

    Ok(GetOperationResponse {
        satellite_schedule_id: record.satellite_schedule_id,
        exists: true,
        operation_id: Some(record.id),
        status: record.status,
        operators: resolve_operators(&record.operators, &directory),
        commands: record.commands.iter().map(command_info).collect(),
        next_command_order: draft.next_command_order(),
        create_user_id: record.create_user_id,
        created_at: Some(format_timestamp(record.created_at).map_err(translate_domain_error)?),
        update_at: format_optional(record.update_at)?,
    })
}

/// Saves the whole draft for a pass, creating or overwriting its record.
///
/// Operators are deduplicated in submission order and every command is
/// validated before anything is written. The record is stamped with the
/// saving user and `now`.
///
/// # Errors
///
/// Returns an error if:
/// - The pass does not exist
/// - The status is not one of the three known values
/// - Any operator identifier or command is invalid
/// - The database write fails
pub fn save_operation(
    persistence: &mut Persistence,
    satellite_schedule_id: &str,
    request: SaveOperationRequest,
    user: &AuthenticatedUser,
    now: OffsetDateTime,
) -> Result<SaveOperationResponse, ApiError> {
    require_pass(persistence, satellite_schedule_id)?;

    let status: OperationStatus = request.status.parse().map_err(translate_domain_error)?;
    let commands: Vec<SubmittedCommand> = request
        .commands
        .into_iter()
        .map(|entry| SubmittedCommand {
            order: entry.order,
            command: entry.command,
            description: entry.description,
        })
        .collect();

    let draft: OperationDraft = OperationDraft::rebuild(
        satellite_schedule_id,
        status,
        request.operators,
        commands,
    )
    .map_err(translate_core_error)?;

    let write: OperationWrite = OperationWrite {
        satellite_schedule_id: draft.satellite_schedule_id,
        status: draft.status,
        operators: draft.operators,
        commands: draft.commands,
        create_user_id: user.user_id.clone(),
        update_at: now,
    };

    let outcome: SaveOutcome = persistence
        .save_operation(&write)
        .map_err(|e| translate_persistence_error("Failed to save operation", e))?;

    let (result, message): (SaveKind, &str) = match outcome {
        SaveOutcome::Inserted { .. } => (SaveKind::Inserted, "Operation created"),
        SaveOutcome::Updated { .. } => (SaveKind::Updated, "Operation updated"),
    };

    Ok(SaveOperationResponse {
        operation_id: outcome.operation_id(),
        satellite_schedule_id: write.satellite_schedule_id,
        result,
        message: message.to_string(),
    })
}

/// Imports satellite passes from CSV text.
///
/// Valid rows are inserted; invalid or duplicate rows are reported and
/// skipped. Individual row failures are captured in the response, not as errors.
///
/// # Errors
///
/// Returns an error if the CSV headers are missing or the text is not CSV.
pub fn import_passes_csv(
    persistence: &mut Persistence,
    request: &ImportPassesRequest,
) -> Result<ImportPassesResponse, ApiError> {
    let rows: Vec<ParsedPassRow> = parse_passes_csv(&request.csv_content)?;
    let total_rows: usize = rows.len();
    let mut results: Vec<PassImportRowResult> = Vec::with_capacity(total_rows);

    for row in rows {
        let outcome: Result<(), Vec<String>> = match row.result {
            Ok(pass) => persistence
                .insert_satellite_pass(&pass)
                .map_err(|e| match e {
                    PersistenceError::DuplicatePass(id) => {
                        vec![format!("id: pass '{id}' already exists")]
                    }
                    other => vec![format!("database: {other}")],
                }),
            Err(errors) => Err(errors),
        };

        let (status, errors): (PassImportRowStatus, Vec<String>) = match outcome {
            Ok(()) => (PassImportRowStatus::Imported, Vec::new()),
            Err(errors) => {
                warn!(row = row.row_number, ?errors, "Skipping pass import row");
                (PassImportRowStatus::Failed, errors)
            }
        };

        results.push(PassImportRowResult {
            row_number: row.row_number,
            pass_id: row.pass_id,
            status,
            errors,
        });
    }

    let imported_count: usize = results
        .iter()
        .filter(|r| r.status == PassImportRowStatus::Imported)
        .count();

    info!(total_rows, imported_count, "Satellite pass import complete");

    Ok(ImportPassesResponse {
        total_rows,
        imported_count,
        failed_count: total_rows - imported_count,
        results,
    })
}

fn require_pass(
    persistence: &mut Persistence,
    satellite_schedule_id: &str,
) -> Result<(), ApiError> {
    let pass: Option<SatellitePass> = persistence
        .get_satellite_pass(satellite_schedule_id)
        .map_err(|e| translate_persistence_error("Failed to load satellite pass", e))?;

    if pass.is_none() {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Satellite pass"),
            message: format!("Satellite pass '{satellite_schedule_id}' does not exist"),
        });
    }
    Ok(())
}

fn load_user_directory(
    persistence: &mut Persistence,
) -> Result<HashMap<String, UserDetails>, ApiError> {
    Ok(persistence
        .list_user_details()
        .map_err(|e| translate_persistence_error("Failed to list user details", e))?
        .into_iter()
        .map(|details| (details.auth_id.clone(), details))
        .collect())
}

fn resolve_operators(
    operator_ids: &[String],
    directory: &HashMap<String, UserDetails>,
) -> Vec<OperatorInfo> {
    operator_ids
        .iter()
        .map(|auth_id| OperatorInfo {
            auth_id: auth_id.clone(),
            display_name: directory
                .get(auth_id)
                .map_or_else(|| UNKNOWN_USER_LABEL.to_string(), UserDetails::display_name),
        })
        .collect()
}

fn command_info(entry: &CommandEntry) -> CommandEntryInfo {
    CommandEntryInfo {
        order: entry.order,
        command: entry
            .command
            .iter()
            .map(|token| token.value().to_string())
            .collect(),
        command_text: entry.command_text(),
        description: entry.description.clone(),
    }
}

fn format_optional(value: Option<OffsetDateTime>) -> Result<Option<String>, ApiError> {
    value
        .map(format_timestamp)
        .transpose()
        .map_err(translate_domain_error)
}
