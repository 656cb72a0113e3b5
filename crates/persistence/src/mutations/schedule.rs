// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Satellite pass mutations.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use gardens_domain::{SatellitePass, format_timestamp};
use tracing::info;

use crate::current_timestamp;
use crate::diesel_schema::satellite_schedule;
use crate::error::PersistenceError;

backend_fn! {
/// Inserts a pass.
///
/// # Errors
///
/// Returns `PersistenceError::DuplicatePass` if a pass with the same
/// identifier exists, or a database error if the insert fails.
pub fn insert_satellite_pass(conn: &mut _, pass: &SatellitePass) -> Result<(), PersistenceError> {
    info!("Inserting satellite pass: {}", pass.id);

    let pass_start_time: Option<String> = pass.pass_start_time.map(format_timestamp).transpose()?;
    let pass_end_time: Option<String> = pass.pass_end_time.map(format_timestamp).transpose()?;
    let created_at: String = current_timestamp()?;

    let result: Result<usize, diesel::result::Error> = diesel::insert_into(satellite_schedule::table)
        .values((
            satellite_schedule::id.eq(&pass.id),
            satellite_schedule::name.eq(pass.name.as_deref()),
            satellite_schedule::pass_start_time.eq(pass_start_time.as_deref()),
            satellite_schedule::pass_end_time.eq(pass_end_time.as_deref()),
            satellite_schedule::max_elevation.eq(pass.max_elevation),
            satellite_schedule::azimuth_start.eq(pass.azimuth_start),
            satellite_schedule::azimuth_end.eq(pass.azimuth_end),
            satellite_schedule::created_at.eq(&created_at),
        ))
        .execute(conn);

    match result {
        Ok(_) => Ok(()),
        Err(diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            _,
        )) => Err(PersistenceError::DuplicatePass(pass.id.clone())),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}
