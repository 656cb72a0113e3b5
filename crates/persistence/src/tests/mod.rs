// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod initialization_tests;
mod schedule_tests;

use gardens_domain::{CommandEntry, CommandToken, OperationStatus, SatellitePass};
use time::OffsetDateTime;
use time::macros::datetime;

use crate::{NewAccount, OperationWrite, Persistence};

pub fn create_test_account(email: &str) -> NewAccount {
    NewAccount {
        email: email.to_string(),
        password: String::from("correct horse"),
        first_name: String::from("Hanako"),
        last_name: String::from("Yamada"),
        unit_no: 1,
    }
}

pub fn create_test_pass(id: &str, start: OffsetDateTime) -> SatellitePass {
    SatellitePass {
        id: id.to_string(),
        name: Some(String::from("GARDENS-1")),
        pass_start_time: Some(start),
        pass_end_time: Some(start + time::Duration::minutes(10)),
        max_elevation: Some(45.5),
        azimuth_start: Some(120.0),
        azimuth_end: Some(300.25),
    }
}

pub fn create_test_command(order: u32, description: &str) -> CommandEntry {
    let tokens: Vec<CommandToken> = [
        "01", "02", "03", "04", "05", "06", "07", "08", "09", "0A", "0B",
    ]
    .iter()
    .map(|value| CommandToken::parse(value).unwrap())
    .collect();
    CommandEntry::new(order, tokens, description)
}

/// Creates a database holding one account and pass `P1`; returns the account id.
pub fn seed(persistence: &mut Persistence) -> String {
    let user_id: String = persistence
        .create_account(&create_test_account("u1@gardens.example"))
        .unwrap();
    persistence
        .insert_satellite_pass(&create_test_pass("P1", datetime!(2026-10-18 09:00:00 UTC)))
        .unwrap();
    user_id
}

pub fn create_test_write(user_id: &str, status: OperationStatus) -> OperationWrite {
    OperationWrite {
        satellite_schedule_id: String::from("P1"),
        status,
        operators: vec![user_id.to_string()],
        commands: vec![create_test_command(1, "boot sequence")],
        create_user_id: user_id.to_string(),
        update_at: datetime!(2026-10-18 08:00:00 UTC),
    }
}
