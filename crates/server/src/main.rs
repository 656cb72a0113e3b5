// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod session;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, State as AxumState, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono_tz::Tz;
use clap::Parser;
use gardens_api::{
    ApiError, GetOperationResponse, ImportPassesRequest, ImportPassesResponse, ListPassesResponse,
    ListUserDetailsResponse, LoginRequest, LoginResponse, SaveOperationRequest,
    SaveOperationResponse, SignUpRequest, SignUpResponse, WhoAmIResponse, get_operation,
    import_passes_csv, list_upcoming_passes, list_user_details, login, logout, save_operation,
    sign_up, whoami,
};
use gardens_domain::{DomainError, parse_timezone};
use gardens_persistence::{Persistence, PersistenceError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::session::SessionUser;

/// How often expired sessions are purged.
const SESSION_CLEANUP_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Gardens Server - HTTP server for the Gardens ground station operation recorder
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "GARDENS_DATABASE")]
    database: Option<PathBuf>,

    /// `MySQL`/`MariaDB` connection URL. Takes precedence over `--database`.
    #[arg(long, env = "GARDENS_DATABASE_URL")]
    database_url: Option<String>,

    /// Address to bind the server to
    #[arg(short, long, env = "GARDENS_BIND", default_value = "127.0.0.1")]
    bind: String,

    /// Port to bind the server to
    #[arg(short, long, env = "GARDENS_PORT", default_value_t = 3000)]
    port: u16,

    /// IANA timezone whose calendar day decides which passes are upcoming
    #[arg(long, env = "GARDENS_STATION_TIMEZONE", default_value = "UTC")]
    station_timezone: String,

    /// CSV file of satellite passes to import at startup
    #[arg(long, env = "GARDENS_IMPORT_PASSES")]
    import_passes: Option<PathBuf>,
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The persistence layer, serialized behind one lock.
    pub persistence: Arc<Mutex<Persistence>>,
    /// Timezone used to decide which calendar day is "today".
    pub station_timezone: Tz,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error indicator.
    pub error: bool,
    /// Error message.
    pub message: String,
}

/// Body sent for every 500.
const INTERNAL_ERROR_MESSAGE: &str = "Internal error";

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::InvalidInput { .. } | ApiError::PasswordPolicyViolation { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                // Storage detail stays in the log.
                return Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: String::from(INTERNAL_ERROR_MESSAGE),
                };
            }
        };

        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(error = %rejection.body_text(), "Rejected request body");
        let status: StatusCode = if rejection.status() == StatusCode::UNSUPPORTED_MEDIA_TYPE {
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        } else {
            StatusCode::BAD_REQUEST
        };

        Self {
            status,
            message: rejection.body_text(),
        }
    }
}

/// Response for a successful logout.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LogoutResponse {
    message: String,
}

/// Errors that stop the server from starting.
#[derive(Debug, Error)]
enum StartupError {
    #[error("Invalid station timezone: {0}")]
    Timezone(#[from] DomainError),
    #[error("Failed to open database: {0}")]
    Persistence(#[from] PersistenceError),
    #[error("Failed to read pass import file {path}: {source}")]
    ImportFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Pass import failed: {0}")]
    Import(#[from] ApiError),
    #[error("Invalid bind address: {0}")]
    Address(#[from] std::net::AddrParseError),
    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Handler for POST `/auth/signup` endpoint.
async fn handle_sign_up(
    AxumState(app_state): AxumState<AppState>,
    payload: Result<Json<SignUpRequest>, JsonRejection>,
) -> Result<Json<SignUpResponse>, HttpError> {
    let Json(req): Json<SignUpRequest> = payload?;
    info!(unit_no = req.unit_no, "Handling sign_up request");

    let mut persistence = app_state.persistence.lock().await;
    let response: SignUpResponse = sign_up(&mut persistence, &req)?;
    drop(persistence);

    info!(user_id = %response.user_id, "Account created");
    Ok(Json(response))
}

/// Handler for POST `/auth/login` endpoint.
async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, HttpError> {
    let Json(req): Json<LoginRequest> = payload?;
    let mut persistence = app_state.persistence.lock().await;
    let response: LoginResponse = login(&mut persistence, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/auth/logout` endpoint.
async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
) -> Result<Json<LogoutResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    logout(&mut persistence, &session.session_token)?;
    drop(persistence);

    info!(user_id = %session.user.user_id, "User signed out");
    Ok(Json(LogoutResponse {
        message: String::from("Signed out"),
    }))
}

/// Handler for GET `/auth/session` endpoint.
async fn handle_session(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
) -> Result<Json<WhoAmIResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: WhoAmIResponse = whoami(&mut persistence, &session.user, &session.user_data)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/passes` endpoint.
///
/// Lists passes starting today or later in the station timezone.
async fn handle_list_passes(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionUser,
) -> Result<Json<ListPassesResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListPassesResponse = list_upcoming_passes(
        &mut persistence,
        OffsetDateTime::now_utc(),
        app_state.station_timezone,
    )?;
    drop(persistence);

    debug!(count = response.passes.len(), "Listed upcoming passes");
    Ok(Json(response))
}

/// Handler for POST `/passes/import` endpoint.
async fn handle_import_passes(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    payload: Result<Json<ImportPassesRequest>, JsonRejection>,
) -> Result<Json<ImportPassesResponse>, HttpError> {
    let Json(req): Json<ImportPassesRequest> = payload?;
    info!(user_id = %session.user.user_id, "Handling import_passes request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ImportPassesResponse = import_passes_csv(&mut persistence, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/user_details` endpoint.
async fn handle_list_user_details(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionUser,
) -> Result<Json<ListUserDetailsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListUserDetailsResponse = list_user_details(&mut persistence)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/operations/{schedule_id}` endpoint.
async fn handle_get_operation(
    AxumState(app_state): AxumState<AppState>,
    Path(schedule_id): Path<String>,
    _session: SessionUser,
) -> Result<Json<GetOperationResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: GetOperationResponse = get_operation(&mut persistence, &schedule_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for PUT `/operations/{schedule_id}` endpoint.
///
/// Saves the whole draft for a pass.
async fn handle_save_operation(
    AxumState(app_state): AxumState<AppState>,
    Path(schedule_id): Path<String>,
    session: SessionUser,
    payload: Result<Json<SaveOperationRequest>, JsonRejection>,
) -> Result<Json<SaveOperationResponse>, HttpError> {
    let Json(req): Json<SaveOperationRequest> = payload?;
    info!(
        user_id = %session.user.user_id,
        schedule_id = %schedule_id,
        status = %req.status,
        operators = req.operators.len(),
        commands = req.commands.len(),
        "Handling save_operation request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: SaveOperationResponse = save_operation(
        &mut persistence,
        &schedule_id,
        req,
        &session.user,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/auth/signup", post(handle_sign_up))
        .route("/auth/login", post(handle_login))
        .route("/auth/logout", post(handle_logout))
        .route("/auth/session", get(handle_session))
        .route("/passes", get(handle_list_passes))
        .route("/passes/import", post(handle_import_passes))
        .route("/user_details", get(handle_list_user_details))
        .route(
            "/operations/{schedule_id}",
            get(handle_get_operation).put(handle_save_operation),
        )
        .with_state(app_state)
}

/// Deletes sessions whose expiry has passed.
///
/// Returns the number of sessions removed.
async fn purge_expired_sessions(app_state: &AppState) -> Result<usize, PersistenceError> {
    let mut persistence = app_state.persistence.lock().await;
    persistence.delete_expired_sessions(OffsetDateTime::now_utc())
}

/// Starts the background task that purges expired sessions.
fn spawn_session_cleanup(app_state: AppState) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval: tokio::time::Interval =
            tokio::time::interval(SESSION_CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            match purge_expired_sessions(&app_state).await {
                Ok(0) => debug!("No expired sessions to purge"),
                Ok(removed) => info!(removed, "Purged expired sessions"),
                Err(e) => warn!(error = %e, "Failed to purge expired sessions"),
            }
        }
    })
}

fn open_persistence(args: &Args) -> Result<Persistence, PersistenceError> {
    if let Some(url) = &args.database_url {
        info!("Using MySQL/MariaDB database");
        Persistence::new_with_mysql(url)
    } else if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path.display());
        Persistence::new_with_file(db_path)
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()
    }
}

fn import_passes_file(persistence: &mut Persistence, path: PathBuf) -> Result<(), StartupError> {
    let csv_content: String = std::fs::read_to_string(&path)
        .map_err(|source| StartupError::ImportFile { path, source })?;

    let response: ImportPassesResponse =
        import_passes_csv(persistence, &ImportPassesRequest { csv_content })?;

    info!(
        imported = response.imported_count,
        failed = response.failed_count,
        "Imported satellite passes at startup"
    );
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Gardens Server");

    let station_timezone: Tz = parse_timezone(&args.station_timezone)?;
    info!(timezone = %station_timezone, "Station timezone configured");

    let mut persistence: Persistence = open_persistence(&args)?;

    if let Some(path) = args.import_passes.clone() {
        import_passes_file(&mut persistence, path)?;
    }

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        station_timezone,
    };

    let cleanup: tokio::task::JoinHandle<()> = spawn_session_cleanup(app_state.clone());
    let app: Router = build_router(app_state);

    let addr: SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener: tokio::net::TcpListener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    cleanup.abort();
    info!("Server stopped");
    Ok(())
}
