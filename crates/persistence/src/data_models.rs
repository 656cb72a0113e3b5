// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Plain data types crossing the persistence boundary.

use gardens_domain::{CommandEntry, OperationStatus};
use time::OffsetDateTime;

/// A login account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserData {
    pub user_id: String,
    /// Always stored lower-cased.
    pub email: String,
    pub password_hash: String,
    pub created_at: String,
    pub last_sign_in_at: Option<String>,
}

/// A bearer-token session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionData {
    pub session_id: i64,
    pub session_token: String,
    pub user_id: String,
    pub created_at: String,
    pub last_activity_at: String,
    pub expires_at: String,
}

/// Profile fields collected at sign-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub unit_no: i32,
}

/// The full set of values written by a save.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationWrite {
    pub satellite_schedule_id: String,
    pub status: OperationStatus,
    pub operators: Vec<String>,
    pub commands: Vec<CommandEntry>,
    /// The user performing the save.
    pub create_user_id: String,
    pub update_at: OffsetDateTime,
}

/// Which branch of the save was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// No record existed for the pass; one was created.
    Inserted { operation_id: i64 },
    /// The existing record was overwritten in place.
    Updated { operation_id: i64 },
}

impl SaveOutcome {
    /// Returns the row identifier of the saved record.
    #[must_use]
    pub const fn operation_id(self) -> i64 {
        match self {
            Self::Inserted { operation_id } | Self::Updated { operation_id } => operation_id,
        }
    }
}
