// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operation record mutations.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use gardens_domain::format_timestamp;
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::current_timestamp;
use crate::data_models::{OperationWrite, SaveOutcome};
use crate::diesel_schema::operation;
use crate::error::PersistenceError;

backend_fn! {
/// Saves the operation record for a pass.
///
/// Looks up the record by `satellite_schedule_id`. If one exists, its
/// status, operators, commands, `update_at` and `create_user_id` are
/// overwritten and its `id` and `created_at` are kept. Otherwise a new
/// record is inserted for the pass.
///
/// The lookup and the write share one transaction, and the unique index on
/// `satellite_schedule_id` stops two concurrent first saves from both
/// inserting.
///
/// # Errors
///
/// Returns an error if the pass does not exist, serialization fails, or
/// either statement fails. Nothing is written on error.
pub fn save_operation(conn: &mut _, write: &OperationWrite) -> Result<SaveOutcome, PersistenceError> {
    let operators_json: String = serde_json::to_string(&write.operators)?;
    let commands_json: String = serde_json::to_string(&write.commands)?;
    let update_at: String = format_timestamp(write.update_at)?;

    debug!(
        "Saving operation for pass {} (status {}, {} operators, {} commands)",
        write.satellite_schedule_id,
        write.status,
        write.operators.len(),
        write.commands.len()
    );

    let outcome: SaveOutcome = conn.transaction::<SaveOutcome, PersistenceError, _>(|conn| {
        let existing: Option<i64> = operation::table
            .filter(operation::satellite_schedule_id.eq(&write.satellite_schedule_id))
            .select(operation::id)
            .first::<i64>(conn)
            .optional()?;

        if let Some(operation_id) = existing {
            diesel::update(operation::table)
                .filter(operation::id.eq(operation_id))
                .set((
                    operation::status.eq(write.status.as_str()),
                    operation::operators.eq(&operators_json),
                    operation::commands.eq(&commands_json),
                    operation::update_at.eq(&update_at),
                    operation::create_user_id.eq(&write.create_user_id),
                ))
                .execute(conn)?;

            return Ok(SaveOutcome::Updated { operation_id });
        }

        let created_at: String = current_timestamp()?;

        diesel::insert_into(operation::table)
            .values((
                operation::satellite_schedule_id.eq(&write.satellite_schedule_id),
                operation::status.eq(write.status.as_str()),
                operation::operators.eq(&operators_json),
                operation::commands.eq(&commands_json),
                operation::create_user_id.eq(&write.create_user_id),
                operation::created_at.eq(&created_at),
                operation::update_at.eq(&update_at),
            ))
            .execute(conn)?;

        let operation_id: i64 = conn.get_last_insert_rowid()?;
        Ok(SaveOutcome::Inserted { operation_id })
    })?;

    info!(
        operation_id = outcome.operation_id(),
        "Saved operation for pass {}: {:?}", write.satellite_schedule_id, outcome
    );
    Ok(outcome)
}
}
