// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Satellite pass queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use gardens_domain::{SatellitePass, parse_timestamp};
use time::OffsetDateTime;
use tracing::debug;

use crate::diesel_schema::satellite_schedule;
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = satellite_schedule)]
struct SatellitePassRow {
    id: String,
    name: Option<String>,
    pass_start_time: Option<String>,
    pass_end_time: Option<String>,
    max_elevation: Option<f64>,
    azimuth_start: Option<f64>,
    azimuth_end: Option<f64>,
}

fn parse_optional(value: Option<&str>) -> Result<Option<OffsetDateTime>, PersistenceError> {
    value.map(parse_timestamp).transpose().map_err(Into::into)
}

impl TryFrom<SatellitePassRow> for SatellitePass {
    type Error = PersistenceError;

    fn try_from(row: SatellitePassRow) -> Result<Self, Self::Error> {
        Ok(Self {
            pass_start_time: parse_optional(row.pass_start_time.as_deref())?,
            pass_end_time: parse_optional(row.pass_end_time.as_deref())?,
            id: row.id,
            name: row.name,
            max_elevation: row.max_elevation,
            azimuth_start: row.azimuth_start,
            azimuth_end: row.azimuth_end,
        })
    }
}

backend_fn! {
/// Retrieves one pass by identifier.
///
/// # Errors
///
/// Returns an error if the query fails or a stored timestamp is malformed.
/// Returns `Ok(None)` if the pass is not found.
pub fn get_satellite_pass(
    conn: &mut _,
    pass_id: &str,
) -> Result<Option<SatellitePass>, PersistenceError> {
    debug!("Looking up satellite pass: {}", pass_id);

    let result: Result<SatellitePassRow, diesel::result::Error> = satellite_schedule::table
        .filter(satellite_schedule::id.eq(pass_id))
        .select(SatellitePassRow::as_select())
        .first(conn);

    match result {
        Ok(row) => SatellitePass::try_from(row).map(Some),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

backend_fn! {
/// Lists every pass ordered by start time.
///
/// No date filtering happens here; choosing upcoming passes needs the
/// station timezone and belongs to the caller.
///
/// # Errors
///
/// Returns an error if the query fails or a stored timestamp is malformed.
pub fn list_satellite_passes(conn: &mut _) -> Result<Vec<SatellitePass>, PersistenceError> {
    debug!("Listing satellite passes");

    let rows: Vec<SatellitePassRow> = satellite_schedule::table
        .select(SatellitePassRow::as_select())
        .order((
            satellite_schedule::pass_start_time.asc(),
            satellite_schedule::id.asc(),
        ))
        .load(conn)?;

    rows.into_iter().map(SatellitePass::try_from).collect()
}
}
