// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the Gardens ground station.
//!
//! Handlers are plain functions over a [`Persistence`] handle. They accept
//! request DTOs, apply domain and recorder rules, and return response DTOs
//! or an [`ApiError`]; transport concerns live in the server crate.
//!
//! [`Persistence`]: gardens_persistence::Persistence

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod auth;
mod csv_import;
mod error;
mod handlers;
mod password_policy;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedUser, AuthenticationService, LoginSession};
pub use csv_import::{ParsedPassRow, parse_passes_csv};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::{
    get_operation, import_passes_csv, list_upcoming_passes, list_user_details, login, logout,
    save_operation, sign_up, whoami,
};
pub use password_policy::{PasswordPolicy, PasswordPolicyError};
pub use request_response::{
    CommandEntryInfo, CommandEntryRequest, GetOperationResponse, ImportPassesRequest,
    ImportPassesResponse, ListPassesResponse, ListUserDetailsResponse, LoginRequest,
    LoginResponse, OperationSummary, OperatorInfo, PassImportRowResult, PassImportRowStatus,
    PassInfo, SaveKind, SaveOperationRequest, SaveOperationResponse, SignUpRequest,
    SignUpResponse, UserDetailsInfo, WhoAmIResponse,
};
