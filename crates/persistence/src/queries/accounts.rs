// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Account, session and user detail queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use gardens_domain::UserDetails;
use tracing::debug;

use crate::data_models::{SessionData, UserData};
use crate::diesel_schema::{sessions, user_details, users};
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = users)]
struct UserRow {
    user_id: String,
    email: String,
    password_hash: String,
    created_at: String,
    last_sign_in_at: Option<String>,
}

impl From<UserRow> for UserData {
    fn from(row: UserRow) -> Self {
        Self {
            user_id: row.user_id,
            email: row.email,
            password_hash: row.password_hash,
            created_at: row.created_at,
            last_sign_in_at: row.last_sign_in_at,
        }
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = sessions)]
struct SessionRow {
    session_id: i64,
    session_token: String,
    user_id: String,
    created_at: String,
    last_activity_at: String,
    expires_at: String,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = user_details)]
struct UserDetailsRow {
    id: String,
    auth_id: String,
    first_name: String,
    last_name: String,
    unit_no: i32,
}

impl From<UserDetailsRow> for UserDetails {
    fn from(row: UserDetailsRow) -> Self {
        Self {
            id: row.id,
            auth_id: row.auth_id,
            first_name: row.first_name,
            last_name: row.last_name,
            unit_no: row.unit_no,
        }
    }
}

backend_fn! {
/// Retrieves an account by email.
///
/// The email is lower-cased before lookup.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no account uses the email.
pub fn get_user_by_email(conn: &mut _, email: &str) -> Result<Option<UserData>, PersistenceError> {
    let normalized_email: String = email.trim().to_lowercase();

    debug!("Looking up user by email: {}", normalized_email);

    let result: Result<UserRow, diesel::result::Error> = users::table
        .filter(users::email.eq(&normalized_email))
        .select(UserRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(UserData::from(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

backend_fn! {
/// Retrieves an account by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the account is not found.
pub fn get_user_by_id(conn: &mut _, user_id: &str) -> Result<Option<UserData>, PersistenceError> {
    debug!("Looking up user by ID: {}", user_id);

    let result: Result<UserRow, diesel::result::Error> = users::table
        .filter(users::user_id.eq(user_id))
        .select(UserRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(UserData::from(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

backend_fn! {
/// Retrieves a session by token.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the session is not found.
pub fn get_session_by_token(
    conn: &mut _,
    session_token: &str,
) -> Result<Option<SessionData>, PersistenceError> {
    debug!("Looking up session by token");

    let result: Result<SessionRow, diesel::result::Error> = sessions::table
        .filter(sessions::session_token.eq(session_token))
        .select(SessionRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(SessionData {
            session_id: row.session_id,
            session_token: row.session_token,
            user_id: row.user_id,
            created_at: row.created_at,
            last_activity_at: row.last_activity_at,
            expires_at: row.expires_at,
        })),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

backend_fn! {
/// Lists every user's details, ordered by unit number then last name.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_user_details(conn: &mut _) -> Result<Vec<UserDetails>, PersistenceError> {
    debug!("Listing user details");

    let rows: Vec<UserDetailsRow> = user_details::table
        .select(UserDetailsRow::as_select())
        .order((
            user_details::unit_no.asc(),
            user_details::last_name.asc(),
            user_details::first_name.asc(),
        ))
        .load(conn)?;

    Ok(rows.into_iter().map(UserDetails::from).collect())
}
}

backend_fn! {
/// Retrieves the details attached to an account.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the account has no details row.
pub fn get_user_details_by_auth_id(
    conn: &mut _,
    auth_id: &str,
) -> Result<Option<UserDetails>, PersistenceError> {
    debug!("Looking up user details for account: {}", auth_id);

    let result: Result<UserDetailsRow, diesel::result::Error> = user_details::table
        .filter(user_details::auth_id.eq(auth_id))
        .select(UserDetailsRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(UserDetails::from(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

/// Verifies a password against a bcrypt hash.
///
/// # Errors
///
/// Returns an error if the hash cannot be parsed.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PersistenceError> {
    bcrypt::verify(password, password_hash)
        .map_err(|e| PersistenceError::PasswordHash(e.to_string()))
}
