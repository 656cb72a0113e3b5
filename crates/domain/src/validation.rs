// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{COMMAND_LENGTH, CommandToken};

/// Validates the byte fields of a command as a whole.
///
/// Either every field parses and the full command is returned, or the
/// first offending field is reported and nothing is returned.
///
/// # Arguments
///
/// * `inputs` - The raw text of each byte field, in order
///
/// # Errors
///
/// Returns an error if:
/// - The number of fields is not [`COMMAND_LENGTH`]
/// - Any field is not a two-character hex pair
pub fn validate_command_tokens<S: AsRef<str>>(
    inputs: &[S],
) -> Result<Vec<CommandToken>, DomainError> {
    if inputs.len() != COMMAND_LENGTH {
        return Err(DomainError::InvalidCommandLength {
            expected: COMMAND_LENGTH,
            actual: inputs.len(),
        });
    }

    inputs
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            CommandToken::parse(raw.as_ref()).ok_or_else(|| DomainError::InvalidCommandToken {
                position: index + 1,
                value: raw.as_ref().to_string(),
            })
        })
        .collect()
}

/// Validates that an operator identifier is usable.
///
/// # Errors
///
/// Returns `DomainError::EmptyOperatorId` if the identifier is blank.
pub fn validate_operator_id(operator_id: &str) -> Result<(), DomainError> {
    if operator_id.trim().is_empty() {
        return Err(DomainError::EmptyOperatorId);
    }
    Ok(())
}

/// Validates the shape of an email address.
///
/// Only the structure is checked: one `@` with text on both sides and a
/// dot in the domain part.
///
/// # Errors
///
/// Returns `DomainError::InvalidEmail` if the address is malformed.
pub fn validate_email(email: &str) -> Result<(), DomainError> {
    let trimmed: &str = email.trim();

    let Some((local, domain)) = trimmed.split_once('@') else {
        return Err(DomainError::InvalidEmail(String::from(
            "Email must contain '@'",
        )));
    };

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(DomainError::InvalidEmail(String::from(
            "Email must have exactly one '@' with text on both sides",
        )));
    }

    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(DomainError::InvalidEmail(String::from(
            "Email domain must contain a dot",
        )));
    }

    if trimmed.chars().any(char::is_whitespace) {
        return Err(DomainError::InvalidEmail(String::from(
            "Email cannot contain whitespace",
        )));
    }

    Ok(())
}

/// Validates a first or last name.
///
/// # Errors
///
/// Returns `DomainError::InvalidName` if the name is blank.
pub fn validate_person_name(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::InvalidName(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Validates a station unit number.
///
/// # Errors
///
/// Returns `DomainError::InvalidUnitNumber` unless `1 <= unit_no <= 999`.
pub fn validate_unit_no(unit_no: i32) -> Result<(), DomainError> {
    if !(1..=999).contains(&unit_no) {
        return Err(DomainError::InvalidUnitNumber(unit_no));
    }
    Ok(())
}
