// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use gardens_domain::DomainError;

/// Errors raised by the persistence adapter.
///
/// Absence of a row is not an error: lookups return `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// Opening the database failed.
    Connection(String),
    /// The database path is not valid UTF-8.
    InvalidDatabasePath,
    /// Applying the embedded migrations failed.
    Migration(String),
    /// The backend does not enforce foreign keys.
    ForeignKeysDisabled,
    /// A statement failed.
    Query(String),
    /// A JSON column could not be encoded or decoded.
    Serialization(String),
    /// A stored row holds a value the domain rejects.
    CorruptRecord(String),
    /// An account with this email already exists.
    DuplicateEmail(String),
    /// A pass with this identifier already exists.
    DuplicatePass(String),
    /// Hashing or verifying a password failed.
    PasswordHash(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connection(msg) => write!(f, "Could not open database: {msg}"),
            Self::InvalidDatabasePath => write!(f, "Database path is not valid UTF-8"),
            Self::Migration(msg) => write!(f, "Migration failed: {msg}"),
            Self::ForeignKeysDisabled => write!(f, "Foreign key enforcement is disabled"),
            Self::Query(msg) => write!(f, "Query failed: {msg}"),
            Self::Serialization(msg) => write!(f, "JSON column error: {msg}"),
            Self::CorruptRecord(msg) => write!(f, "Corrupt record: {msg}"),
            Self::DuplicateEmail(email) => {
                write!(f, "An account already exists for {email}")
            }
            Self::DuplicatePass(id) => write!(f, "Pass {id} already exists"),
            Self::PasswordHash(msg) => write!(f, "Password hashing failed: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        Self::Query(err.to_string())
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::Connection(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<DomainError> for PersistenceError {
    fn from(err: DomainError) -> Self {
        Self::CorruptRecord(err.to_string())
    }
}
