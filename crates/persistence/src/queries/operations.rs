// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operation record queries.

use std::str::FromStr;

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use gardens_domain::{CommandEntry, OperationRecord, OperationStatus, parse_timestamp};
use tracing::debug;

use crate::diesel_schema::operation;
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = operation)]
struct OperationRow {
    id: i64,
    satellite_schedule_id: String,
    status: String,
    operators: String,
    commands: String,
    create_user_id: Option<String>,
    created_at: String,
    update_at: Option<String>,
}

impl TryFrom<OperationRow> for OperationRecord {
    type Error = PersistenceError;

    fn try_from(row: OperationRow) -> Result<Self, Self::Error> {
        let status: OperationStatus = OperationStatus::from_str(&row.status)?;
        let operators: Vec<String> = serde_json::from_str(&row.operators)?;
        let commands: Vec<CommandEntry> = serde_json::from_str(&row.commands)?;

        Ok(Self {
            id: row.id,
            satellite_schedule_id: row.satellite_schedule_id,
            status,
            operators,
            commands,
            create_user_id: row.create_user_id,
            created_at: parse_timestamp(&row.created_at)?,
            update_at: row.update_at.as_deref().map(parse_timestamp).transpose()?,
        })
    }
}

backend_fn! {
/// Retrieves the operation record for a pass.
///
/// # Errors
///
/// Returns an error if the query fails or the stored JSON is malformed.
/// Returns `Ok(None)` if the pass has no record yet; that is the normal
/// state for a pass nobody has touched.
pub fn get_operation_by_schedule_id(
    conn: &mut _,
    satellite_schedule_id: &str,
) -> Result<Option<OperationRecord>, PersistenceError> {
    debug!("Looking up operation for pass: {}", satellite_schedule_id);

    let result: Result<OperationRow, diesel::result::Error> = operation::table
        .filter(operation::satellite_schedule_id.eq(satellite_schedule_id))
        .select(OperationRow::as_select())
        .first(conn);

    match result {
        Ok(row) => OperationRecord::try_from(row).map(Some),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

backend_fn! {
/// Lists every operation record in insertion order.
///
/// # Errors
///
/// Returns an error if the query fails or any stored JSON is malformed.
pub fn list_operations(conn: &mut _) -> Result<Vec<OperationRecord>, PersistenceError> {
    debug!("Listing operations");

    let rows: Vec<OperationRow> = operation::table
        .select(OperationRow::as_select())
        .order(operation::id.asc())
        .load(conn)?;

    rows.into_iter().map(OperationRecord::try_from).collect()
}
}
