// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Gardens ground station.
//!
//! Stores login accounts, sessions, user details, satellite passes and
//! per-pass operation records. Built on Diesel.
//!
//! ## Database Backend Support
//!
//! - **`SQLite`** (default) for development, the server's default mode and
//!   every standard test
//! - **`MariaDB`/`MySQL`** selected with a `mysql://` URL and validated by
//!   opt-in tests:
//!
//! ```bash
//! cargo xtask test-mariadb
//! ```
//!
//! The two backends use separate migration directories (`migrations/` and
//! `migrations_mysql/`) describing the same schema.
//!
//! ## Timestamps
//!
//! All timestamps are written by this crate or its callers in the
//! canonical UTC text form from `gardens_domain::format_timestamp`; the
//! database never fills them in.

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
#![allow(clippy::multiple_crate_versions)]

use diesel::{MysqlConnection, SqliteConnection};
use gardens_domain::{OperationRecord, SatellitePass, UserDetails, format_timestamp};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;

/// Counter for unique in-memory database names, one per `new_in_memory()` call.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generates `_sqlite` and `_mysql` copies of a query or mutation.
///
/// Diesel needs a concrete connection type at compile time, so one body is
/// stamped out twice with the connection type substituted. The macro does
/// nothing else; choosing between the two happens in [`Persistence`].
///
/// ```ignore
/// backend_fn! {
///     pub fn count_passes(conn: &mut _) -> Result<i64, PersistenceError> {
///         Ok(satellite_schedule::table.count().get_result(conn)?)
///     }
/// }
/// // => count_passes_sqlite(&mut SqliteConnection), count_passes_mysql(&mut MysqlConnection)
/// ```
macro_rules! backend_fn {
    (
        $(#[$meta:meta])*
        $vis:vis fn $name:ident (
            $conn:ident : &mut _
            $(, $param:ident : $param_ty:ty)* $(,)?
        ) -> $ret:ty
        $body:block
    ) => {
        pastey::paste! {
            $(#[$meta])*
            $vis fn [<$name _sqlite>] (
                $conn: &mut SqliteConnection
                $(, $param : $param_ty)*
            ) -> $ret
            $body

            $(#[$meta])*
            $vis fn [<$name _mysql>] (
                $conn: &mut MysqlConnection
                $(, $param : $param_ty)*
            ) -> $ret
            $body
        }
    };
}

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{NewAccount, OperationWrite, SaveOutcome, SessionData, UserData};
pub use error::PersistenceError;

use backend::PersistenceBackend;
use backend::sqlite::Journal;

/// Returns the current time in storage form.
pub(crate) fn current_timestamp() -> Result<String, PersistenceError> {
    format_timestamp(OffsetDateTime::now_utc()).map_err(PersistenceError::from)
}

/// The active database connection.
pub enum BackendConnection {
    Sqlite(SqliteConnection),
    Mysql(MysqlConnection),
}

/// Persistence adapter.
///
/// The backend is chosen once at construction; every method dispatches to
/// the matching monomorphic query or mutation.
pub struct Persistence {
    pub(crate) conn: BackendConnection,
}

impl Persistence {
    /// Creates an adapter over a fresh in-memory `SQLite` database.
    ///
    /// Each call gets its own shared-cache database, so tests never see
    /// each other's rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_gardens_{db_id}?mode=memory&cache=shared");

        let conn: SqliteConnection =
            backend::sqlite::connect(&shared_memory_url, Journal::Rollback)?;

        Ok(Self {
            conn: BackendConnection::Sqlite(conn),
        })
    }

    /// Creates an adapter over a `SQLite` database file, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path
            .as_ref()
            .to_str()
            .ok_or(PersistenceError::InvalidDatabasePath)?;

        let conn: SqliteConnection = backend::sqlite::connect(path_str, Journal::WriteAhead)?;

        Ok(Self {
            conn: BackendConnection::Sqlite(conn),
        })
    }

    /// Creates an adapter over a `MySQL`/`MariaDB` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be reached or migrated.
    pub fn new_with_mysql(database_url: &str) -> Result<Self, PersistenceError> {
        let conn: MysqlConnection = backend::mysql::connect(database_url)?;

        Ok(Self {
            conn: BackendConnection::Mysql(conn),
        })
    }

    /// Checks that the backend enforces foreign keys.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => conn.verify_foreign_key_enforcement(),
            BackendConnection::Mysql(conn) => conn.verify_foreign_key_enforcement(),
        }
    }

    // ========================================================================
    // Accounts & Sessions
    // ========================================================================

    /// Creates a login account with its user details.
    ///
    /// # Returns
    ///
    /// The new account's identifier.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::DuplicateEmail` if the email is taken, or
    /// a database error.
    pub fn create_account(&mut self, account: &NewAccount) -> Result<String, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::accounts::create_account_sqlite(conn, account)
            }
            BackendConnection::Mysql(conn) => mutations::accounts::create_account_mysql(conn, account),
        }
    }

    /// Retrieves an account by email (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_user_by_email(&mut self, email: &str) -> Result<Option<UserData>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::accounts::get_user_by_email_sqlite(conn, email),
            BackendConnection::Mysql(conn) => queries::accounts::get_user_by_email_mysql(conn, email),
        }
    }

    /// Retrieves an account by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_user_by_id(&mut self, user_id: &str) -> Result<Option<UserData>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::accounts::get_user_by_id_sqlite(conn, user_id),
            BackendConnection::Mysql(conn) => queries::accounts::get_user_by_id_mysql(conn, user_id),
        }
    }

    /// Records a successful sign-in at `signed_in_at`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub fn update_last_sign_in(
        &mut self,
        user_id: &str,
        signed_in_at: &str,
    ) -> Result<(), PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::accounts::update_last_sign_in_sqlite(conn, user_id, signed_in_at)
            }
            BackendConnection::Mysql(conn) => {
                mutations::accounts::update_last_sign_in_mysql(conn, user_id, signed_in_at)
            }
        }
    }

    /// Verifies a password against a stored bcrypt hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the hash cannot be parsed.
    pub fn verify_password(
        password: &str,
        password_hash: &str,
    ) -> Result<bool, PersistenceError> {
        queries::accounts::verify_password(password, password_hash)
    }

    /// Creates a session.
    ///
    /// # Returns
    ///
    /// The session's row identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_session(
        &mut self,
        session_token: &str,
        user_id: &str,
        expires_at: &str,
    ) -> Result<i64, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::accounts::create_session_sqlite(conn, session_token, user_id, expires_at)
            }
            BackendConnection::Mysql(conn) => {
                mutations::accounts::create_session_mysql(conn, session_token, user_id, expires_at)
            }
        }
    }

    /// Retrieves a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_session_by_token(
        &mut self,
        session_token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                queries::accounts::get_session_by_token_sqlite(conn, session_token)
            }
            BackendConnection::Mysql(conn) => {
                queries::accounts::get_session_by_token_mysql(conn, session_token)
            }
        }
    }

    /// Marks a session as active now.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub fn update_session_activity(&mut self, session_id: i64) -> Result<(), PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::accounts::update_session_activity_sqlite(conn, session_id)
            }
            BackendConnection::Mysql(conn) => {
                mutations::accounts::update_session_activity_mysql(conn, session_id)
            }
        }
    }

    /// Deletes a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_session(&mut self, session_token: &str) -> Result<(), PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::accounts::delete_session_sqlite(conn, session_token)
            }
            BackendConnection::Mysql(conn) => {
                mutations::accounts::delete_session_mysql(conn, session_token)
            }
        }
    }

    /// Deletes sessions whose expiry is before `now`.
    ///
    /// # Returns
    ///
    /// The number of sessions removed.
    ///
    /// # Errors
    ///
    /// Returns an error if `now` cannot be formatted or the delete fails.
    pub fn delete_expired_sessions(&mut self, now: OffsetDateTime) -> Result<usize, PersistenceError> {
        let now: String = format_timestamp(now)?;
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::accounts::delete_expired_sessions_sqlite(conn, &now)
            }
            BackendConnection::Mysql(conn) => {
                mutations::accounts::delete_expired_sessions_mysql(conn, &now)
            }
        }
    }

    // ========================================================================
    // User Details
    // ========================================================================

    /// Lists every user's details for the operator selection menu.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_user_details(&mut self) -> Result<Vec<UserDetails>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::accounts::list_user_details_sqlite(conn),
            BackendConnection::Mysql(conn) => queries::accounts::list_user_details_mysql(conn),
        }
    }

    /// Retrieves the details attached to an account.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_user_details_by_auth_id(
        &mut self,
        auth_id: &str,
    ) -> Result<Option<UserDetails>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                queries::accounts::get_user_details_by_auth_id_sqlite(conn, auth_id)
            }
            BackendConnection::Mysql(conn) => {
                queries::accounts::get_user_details_by_auth_id_mysql(conn, auth_id)
            }
        }
    }

    // ========================================================================
    // Satellite Schedule
    // ========================================================================

    /// Inserts a pass.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::DuplicatePass` if the identifier is taken,
    /// or a database error.
    pub fn insert_satellite_pass(&mut self, pass: &SatellitePass) -> Result<(), PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::schedule::insert_satellite_pass_sqlite(conn, pass)
            }
            BackendConnection::Mysql(conn) => mutations::schedule::insert_satellite_pass_mysql(conn, pass),
        }
    }

    /// Retrieves one pass.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_satellite_pass(
        &mut self,
        pass_id: &str,
    ) -> Result<Option<SatellitePass>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::schedule::get_satellite_pass_sqlite(conn, pass_id),
            BackendConnection::Mysql(conn) => queries::schedule::get_satellite_pass_mysql(conn, pass_id),
        }
    }

    /// Lists every pass ordered by start time.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_satellite_passes(&mut self) -> Result<Vec<SatellitePass>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::schedule::list_satellite_passes_sqlite(conn),
            BackendConnection::Mysql(conn) => queries::schedule::list_satellite_passes_mysql(conn),
        }
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Retrieves the operation record for a pass, if one was ever saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored record is corrupt.
    pub fn get_operation_by_schedule_id(
        &mut self,
        satellite_schedule_id: &str,
    ) -> Result<Option<OperationRecord>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                queries::operations::get_operation_by_schedule_id_sqlite(conn, satellite_schedule_id)
            }
            BackendConnection::Mysql(conn) => {
                queries::operations::get_operation_by_schedule_id_mysql(conn, satellite_schedule_id)
            }
        }
    }

    /// Lists every operation record.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored record is corrupt.
    pub fn list_operations(&mut self) -> Result<Vec<OperationRecord>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::operations::list_operations_sqlite(conn),
            BackendConnection::Mysql(conn) => queries::operations::list_operations_mysql(conn),
        }
    }

    /// Inserts or updates the operation record for a pass.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails; nothing is written in that case.
    pub fn save_operation(&mut self, write: &OperationWrite) -> Result<SaveOutcome, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => mutations::operations::save_operation_sqlite(conn, write),
            BackendConnection::Mysql(conn) => mutations::operations::save_operation_mysql(conn, write),
        }
    }
}
