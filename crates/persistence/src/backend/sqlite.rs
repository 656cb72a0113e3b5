// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite` connection setup. The default backend for the server and for
//! every standard test.

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer};
use diesel::{Connection, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

use crate::error::PersistenceError;

/// Schema migrations in `SQLite` syntax.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// How the journal of a `SQLite` database is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Journal {
    /// Rollback journal. In-memory databases only support this.
    Rollback,
    /// Write-ahead log, for file databases the server keeps open.
    WriteAhead,
}

#[derive(QueryableByName)]
struct ForeignKeysPragma {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

/// Opens `database_url`, applies connection PRAGMAs, migrates the schema
/// and checks that foreign keys are enforced.
///
/// # Errors
///
/// Returns an error if any of those steps fails.
pub fn connect(database_url: &str, journal: Journal) -> Result<SqliteConnection, PersistenceError> {
    info!("Opening SQLite database at {}", database_url);

    let mut conn: SqliteConnection = SqliteConnection::establish(database_url)?;

    // Connection-scoped, so it is re-applied on every open.
    diesel::sql_query("PRAGMA foreign_keys = ON").execute(&mut conn)?;
    diesel::sql_query("PRAGMA busy_timeout = 5000").execute(&mut conn)?;
    if journal == Journal::WriteAhead {
        diesel::sql_query("PRAGMA journal_mode = WAL").execute(&mut conn)?;
    }

    let applied: usize = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::Migration(e.to_string()))?
        .len();
    debug!("Applied {} SQLite migrations", applied);

    verify_foreign_key_enforcement(&mut conn)?;
    Ok(conn)
}

/// Returns `last_insert_rowid()` for this connection.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_last_insert_rowid(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(diesel::select(sql::<BigInt>("last_insert_rowid()")).get_result(conn)?)
}

/// Fails unless `PRAGMA foreign_keys` is on.
///
/// Sessions, user details and operations rely on `ON DELETE CASCADE`.
///
/// # Errors
///
/// Returns `PersistenceError::ForeignKeysDisabled` when it is off.
pub fn verify_foreign_key_enforcement(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    let pragma: ForeignKeysPragma =
        diesel::sql_query("PRAGMA foreign_keys").get_result::<ForeignKeysPragma>(conn)?;

    if pragma.foreign_keys == 0 {
        return Err(PersistenceError::ForeignKeysDisabled);
    }

    Ok(())
}
