// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use gardens::CoreError;
use gardens_domain::DomainError;
use gardens_persistence::PersistenceError;

use crate::password_policy::PasswordPolicyError;

/// Why a login or session check was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    AuthenticationFailed { reason: String },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// Failures a Gardens client can see.
///
/// Domain, recorder and storage errors are translated into one of these
/// before they leave the crate; the server maps each variant to a status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Bad credentials or an unusable session.
    AuthenticationFailed { reason: String },
    /// The request conflicts with stored data, e.g. a taken email.
    DomainRuleViolation {
        /// Short rule identifier such as `unique_email`.
        rule: String,
        message: String,
    },
    /// A request field failed validation; nothing was written.
    InvalidInput {
        /// Request field name, e.g. `command` or `status`.
        field: String,
        message: String,
    },
    /// The pass (or other resource) named in the path does not exist.
    ResourceNotFound {
        resource_type: String,
        message: String,
    },
    /// Storage failed. The message is logged, not shown to clients.
    Internal { message: String },
    PasswordPolicyViolation { message: String },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
            Self::PasswordPolicyViolation { message } => {
                write!(f, "Password policy violation: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
        }
    }
}

impl From<PasswordPolicyError> for ApiError {
    fn from(err: PasswordPolicyError) -> Self {
        Self::PasswordPolicyViolation {
            message: err.to_string(),
        }
    }
}

/// Maps a domain validation failure onto the request field it came from.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::InvalidCommandToken { .. } | DomainError::InvalidCommandLength { .. } => {
            ApiError::InvalidInput {
                field: String::from("command"),
                message,
            }
        }
        DomainError::InvalidOperationStatus(_) => ApiError::InvalidInput {
            field: String::from("status"),
            message,
        },
        DomainError::EmptyOperatorId => ApiError::InvalidInput {
            field: String::from("operators"),
            message,
        },
        DomainError::InvalidEmail(msg) => ApiError::InvalidInput {
            field: String::from("email"),
            message: msg,
        },
        DomainError::InvalidName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::InvalidUnitNumber(_) => ApiError::InvalidInput {
            field: String::from("unit_no"),
            message,
        },
        DomainError::InvalidTimezone(_) => ApiError::InvalidInput {
            field: String::from("timezone"),
            message,
        },
        DomainError::DateParseError { date_string, error } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Failed to parse date '{date_string}': {error}"),
        },
        DomainError::DateFormatError(_) => ApiError::Internal { message },
    }
}

/// Maps a recorder failure. Out-of-range removals name the list involved.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    let message: String = err.to_string();
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::IndexOutOfRange { kind, .. } => ApiError::InvalidInput {
            field: kind.to_string(),
            message,
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Uniqueness violations surface as rule violations; everything else is
/// internal and carries `context` for the log.
#[must_use]
pub fn translate_persistence_error(context: &str, err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::DuplicateEmail(email) => ApiError::DomainRuleViolation {
            rule: String::from("unique_email"),
            message: format!("An account for '{email}' already exists"),
        },
        PersistenceError::DuplicatePass(id) => ApiError::DomainRuleViolation {
            rule: String::from("unique_pass"),
            message: format!("Satellite pass '{id}' already exists"),
        },
        other => ApiError::Internal {
            message: format!("{context}: {other}"),
        },
    }
}
