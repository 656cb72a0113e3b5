// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session extraction for the server.
//!
//! Every route except sign-up and login requires a bearer token issued by
//! `POST /auth/login`.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use gardens_api::{AuthenticatedUser, AuthenticationService};
use gardens_persistence::UserData;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{AppState, ErrorResponse};

/// Extractor for signed-in users.
///
/// Reads `Authorization: Bearer <token>`, validates the session and
/// refreshes its activity time.
///
/// # Errors
///
/// Rejects with HTTP 401 if the header is missing or malformed, or the
/// session is unknown or expired.
pub struct SessionUser {
    pub user: AuthenticatedUser,
    pub user_data: UserData,
    pub session_token: String,
}

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header: &str = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| {
                debug!("Missing Authorization header");
                SessionError::MissingAuthorizationHeader
            })?
            .to_str()
            .map_err(|_| {
                warn!("Invalid Authorization header encoding");
                SessionError::InvalidAuthorizationHeader
            })?;

        let token: &str = auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                warn!("Authorization header does not carry a bearer token");
                SessionError::InvalidAuthorizationHeader
            })?;

        let mut persistence = state.persistence.lock().await;
        let (user, user_data): (AuthenticatedUser, UserData) =
            AuthenticationService::validate_session(&mut persistence, token).map_err(|e| {
                warn!(error = %e, "Session validation failed");
                SessionError::InvalidSession(e.to_string())
            })?;
        drop(persistence);

        debug!(user_id = %user.user_id, "Session validated");

        Ok(Self {
            user,
            user_data,
            session_token: token.to_string(),
        })
    }
}

/// Reasons a request is rejected before reaching a signed-in handler.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Missing Authorization header")]
    MissingAuthorizationHeader,
    #[error("Invalid Authorization header format. Expected: 'Bearer <token>'")]
    InvalidAuthorizationHeader,
    #[error("Session validation failed: {0}")]
    InvalidSession(String),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            axum::Json(ErrorResponse {
                error: true,
                message: self.to_string(),
            }),
        )
            .into_response()
    }
}
