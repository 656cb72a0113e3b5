// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A command byte is not a two-character uppercase hex pair.
    InvalidCommandToken {
        /// 1-based position of the offending field.
        position: usize,
        /// The rejected input, as typed.
        value: String,
    },
    /// A command does not have exactly the required number of bytes.
    InvalidCommandLength {
        /// The required number of bytes.
        expected: usize,
        /// The number supplied.
        actual: usize,
    },
    /// Operation status string is not one of the known values.
    InvalidOperationStatus(String),
    /// Operator identifier is empty.
    EmptyOperatorId,
    /// Email address is malformed.
    InvalidEmail(String),
    /// First or last name is empty or invalid.
    InvalidName(String),
    /// Unit number is outside the accepted range.
    InvalidUnitNumber(i32),
    /// Timezone name is not a known IANA zone.
    InvalidTimezone(String),
    /// Failed to parse a timestamp from a string.
    DateParseError {
        /// The invalid timestamp string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Failed to format a timestamp.
    DateFormatError(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCommandToken { position, value } => {
                write!(
                    f,
                    "Command byte {position} must be two hex digits (0-9, A-F), got '{value}'"
                )
            }
            Self::InvalidCommandLength { expected, actual } => {
                write!(f, "Command must have exactly {expected} bytes, got {actual}")
            }
            Self::InvalidOperationStatus(value) => {
                write!(f, "Invalid operation status: '{value}'")
            }
            Self::EmptyOperatorId => write!(f, "Operator identifier cannot be empty"),
            Self::InvalidEmail(msg) => write!(f, "Invalid email: {msg}"),
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidUnitNumber(unit_no) => {
                write!(f, "Unit number must be between 1 and 999, got {unit_no}")
            }
            Self::InvalidTimezone(name) => write!(f, "Unknown timezone: '{name}'"),
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse timestamp '{date_string}': {error}")
            }
            Self::DateFormatError(msg) => write!(f, "Failed to format timestamp: {msg}"),
        }
    }
}

impl std::error::Error for DomainError {}
