// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Account and session mutations.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::{debug, info};
use uuid::Uuid;

use crate::backend::PersistenceBackend;
use crate::current_timestamp;
use crate::data_models::NewAccount;
use crate::diesel_schema::{sessions, user_details, users};
use crate::error::PersistenceError;

backend_fn! {
/// Creates a login account and its user details in one transaction.
///
/// The email is lower-cased. The password is hashed with bcrypt before it
/// reaches the database.
///
/// # Returns
///
/// The new account's identifier.
///
/// # Errors
///
/// Returns `PersistenceError::DuplicateEmail` if the email is taken, or a
/// database error if either insert fails. Nothing is written on error.
pub fn create_account(conn: &mut _, account: &NewAccount) -> Result<String, PersistenceError> {
    let normalized_email: String = account.email.trim().to_lowercase();

    info!(
        "Creating account for {} ({} {}, unit {})",
        normalized_email, account.last_name, account.first_name, account.unit_no
    );

    let password_hash: String = bcrypt::hash(&account.password, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::PasswordHash(e.to_string()))?;
    let user_id: String = Uuid::new_v4().to_string();
    let details_id: String = Uuid::new_v4().to_string();
    let created_at: String = current_timestamp()?;

    conn.transaction::<(), PersistenceError, _>(|conn| {
        let existing: Option<String> = users::table
            .filter(users::email.eq(&normalized_email))
            .select(users::user_id)
            .first::<String>(conn)
            .optional()?;

        if existing.is_some() {
            return Err(PersistenceError::DuplicateEmail(normalized_email.clone()));
        }

        diesel::insert_into(users::table)
            .values((
                users::user_id.eq(&user_id),
                users::email.eq(&normalized_email),
                users::password_hash.eq(&password_hash),
                users::created_at.eq(&created_at),
            ))
            .execute(conn)?;

        diesel::insert_into(user_details::table)
            .values((
                user_details::id.eq(&details_id),
                user_details::auth_id.eq(&user_id),
                user_details::first_name.eq(account.first_name.trim()),
                user_details::last_name.eq(account.last_name.trim()),
                user_details::unit_no.eq(account.unit_no),
                user_details::created_at.eq(&created_at),
            ))
            .execute(conn)?;

        Ok(())
    })?;

    info!(user_id = %user_id, "Account created");
    Ok(user_id)
}
}

backend_fn! {
/// Records a successful sign-in.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn update_last_sign_in(
    conn: &mut _,
    user_id: &str,
    signed_in_at: &str,
) -> Result<(), PersistenceError> {
    debug!("Updating last_sign_in_at for user: {}", user_id);

    diesel::update(users::table)
        .filter(users::user_id.eq(user_id))
        .set(users::last_sign_in_at.eq(signed_in_at))
        .execute(conn)?;

    Ok(())
}
}

backend_fn! {
/// Creates a session.
///
/// # Returns
///
/// The new session's row identifier.
///
/// # Errors
///
/// Returns an error if the insert fails, e.g. the user does not exist.
pub fn create_session(
    conn: &mut _,
    session_token: &str,
    user_id: &str,
    expires_at: &str,
) -> Result<i64, PersistenceError> {
    debug!(
        "Creating session for user: {} with expiration: {}",
        user_id, expires_at
    );

    let created_at: String = current_timestamp()?;

    diesel::insert_into(sessions::table)
        .values((
            sessions::session_token.eq(session_token),
            sessions::user_id.eq(user_id),
            sessions::created_at.eq(&created_at),
            sessions::last_activity_at.eq(&created_at),
            sessions::expires_at.eq(expires_at),
        ))
        .execute(conn)?;

    let session_id: i64 = conn.get_last_insert_rowid()?;

    debug!(session_id, "Session created");
    Ok(session_id)
}
}

backend_fn! {
/// Updates the last activity timestamp for a session.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn update_session_activity(conn: &mut _, session_id: i64) -> Result<(), PersistenceError> {
    debug!("Updating activity for session ID: {}", session_id);

    let now: String = current_timestamp()?;

    diesel::update(sessions::table)
        .filter(sessions::session_id.eq(session_id))
        .set(sessions::last_activity_at.eq(&now))
        .execute(conn)?;

    Ok(())
}
}

backend_fn! {
/// Deletes a session by token. Deleting an unknown token is not an error.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_session(conn: &mut _, session_token: &str) -> Result<(), PersistenceError> {
    debug!("Deleting session");

    diesel::delete(sessions::table)
        .filter(sessions::session_token.eq(session_token))
        .execute(conn)?;

    Ok(())
}
}

backend_fn! {
/// Deletes every session that expired before `now`.
///
/// `now` must be in the canonical timestamp form so the string comparison
/// matches time order.
///
/// # Returns
///
/// The number of sessions removed.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_expired_sessions(conn: &mut _, now: &str) -> Result<usize, PersistenceError> {
    debug!("Deleting sessions expired before {}", now);

    let rows_affected: usize = diesel::delete(sessions::table)
        .filter(sessions::expires_at.lt(now))
        .execute(conn)?;

    info!("Deleted {} expired sessions", rows_affected);
    Ok(rows_affected)
}
}
