// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session-based authentication.

use gardens_domain::{format_timestamp, parse_timestamp};
use gardens_persistence::{Persistence, PersistenceError, SessionData, UserData};
use time::{Duration, OffsetDateTime};
use tracing::{debug, info, warn};

use crate::error::AuthError;

/// A signed-in user, resolved from a session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The account identifier; operator lists and `create_user_id` hold this value.
    pub user_id: String,
    /// The account email.
    pub email: String,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    #[must_use]
    pub const fn new(user_id: String, email: String) -> Self {
        Self { user_id, email }
    }
}

/// A freshly created session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSession {
    pub session_token: String,
    pub user: AuthenticatedUser,
    pub user_data: UserData,
    /// Expiry in canonical storage form.
    pub expires_at: String,
}

/// Authentication service for session-based authentication.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Default session expiration duration (30 days).
    const DEFAULT_SESSION_EXPIRATION: Duration = Duration::days(30);

    /// Verifies an email and password and creates a session.
    ///
    /// Unknown emails and wrong passwords fail with the same reason so the
    /// response does not reveal which accounts exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are wrong or the session cannot
    /// be stored.
    pub fn login(
        persistence: &mut Persistence,
        email: &str,
        password: &str,
    ) -> Result<LoginSession, AuthError> {
        let user: UserData = persistence
            .get_user_by_email(email)
            .map_err(|e| Self::map_persistence_error(&e))?
            .ok_or_else(|| {
                debug!("Login attempt for unknown email");
                Self::invalid_credentials()
            })?;

        let password_valid: bool = Persistence::verify_password(password, &user.password_hash)
            .map_err(|e| Self::map_persistence_error(&e))?;
        if !password_valid {
            warn!(user_id = %user.user_id, "Login rejected: wrong password");
            return Err(Self::invalid_credentials());
        }

        let now: OffsetDateTime = OffsetDateTime::now_utc();
        let session_token: String = Self::generate_session_token(now);
        let expires_at: String = format_timestamp(now + Self::DEFAULT_SESSION_EXPIRATION)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to format expiration time: {e}"),
            })?;
        let signed_in_at: String =
            format_timestamp(now).map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to format sign-in time: {e}"),
            })?;

        persistence
            .create_session(&session_token, &user.user_id, &expires_at)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to create session: {e}"),
            })?;

        persistence
            .update_last_sign_in(&user.user_id, &signed_in_at)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to update last sign-in: {e}"),
            })?;

        info!(user_id = %user.user_id, "User signed in");

        Ok(LoginSession {
            session_token,
            user: AuthenticatedUser::new(user.user_id.clone(), user.email.clone()),
            user_data: UserData {
                last_sign_in_at: Some(signed_in_at),
                ..user
            },
            expires_at,
        })
    }

    /// Validates a session token and returns the signed-in user.
    ///
    /// A valid session has its last-activity time refreshed.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is unknown or expired, or its user
    /// no longer exists.
    pub fn validate_session(
        persistence: &mut Persistence,
        session_token: &str,
    ) -> Result<(AuthenticatedUser, UserData), AuthError> {
        let session: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(|e| Self::map_persistence_error(&e))?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })?;

        let expires_at: OffsetDateTime =
            parse_timestamp(&session.expires_at).map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to parse session expiration: {e}"),
            })?;

        if OffsetDateTime::now_utc() > expires_at {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        let user: UserData = persistence
            .get_user_by_id(&session.user_id)
            .map_err(|e| Self::map_persistence_error(&e))?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("User not found"),
            })?;

        persistence
            .update_session_activity(session.session_id)
            .map_err(|e| Self::map_persistence_error(&e))?;

        Ok((
            AuthenticatedUser::new(user.user_id.clone(), user.email.clone()),
            user,
        ))
    }

    /// Logs out by deleting the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the logout fails.
    pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), AuthError> {
        persistence
            .delete_session(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to delete session: {e}"),
            })?;

        Ok(())
    }

    /// Generates an opaque session token.
    fn generate_session_token(now: OffsetDateTime) -> String {
        format!(
            "session_{}_{:016x}{:016x}",
            now.unix_timestamp_nanos(),
            rand::random::<u64>(),
            rand::random::<u64>()
        )
    }

    fn invalid_credentials() -> AuthError {
        AuthError::AuthenticationFailed {
            reason: String::from("Invalid email or password"),
        }
    }

    fn map_persistence_error(err: &PersistenceError) -> AuthError {
        AuthError::AuthenticationFailed {
            reason: format!("Database error: {err}"),
        }
    }
}
