// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use gardens_domain::SatellitePass;
use gardens_persistence::Persistence;
use time::{Duration, OffsetDateTime};

use crate::auth::AuthenticatedUser;
use crate::handlers::sign_up;
use crate::request_response::{CommandEntryRequest, SignUpRequest};

pub const TEST_PASSWORD: &str = "uplink-window";

pub fn create_sign_up_request(email: &str, last_name: &str, unit_no: i32) -> SignUpRequest {
    SignUpRequest {
        email: email.to_string(),
        password: String::from(TEST_PASSWORD),
        password_confirmation: String::from(TEST_PASSWORD),
        first_name: String::from("Hanako"),
        last_name: last_name.to_string(),
        unit_no,
    }
}

/// Signs up a user and returns them as an authenticated caller.
pub fn create_test_user(persistence: &mut Persistence, email: &str) -> AuthenticatedUser {
    let response = sign_up(
        persistence,
        &create_sign_up_request(email, "Yamada", 1),
    )
    .unwrap();
    AuthenticatedUser::new(response.user_id, response.email)
}

pub fn create_test_pass(id: &str, start: OffsetDateTime) -> SatellitePass {
    SatellitePass {
        id: id.to_string(),
        name: Some(String::from("GARDENS-1")),
        pass_start_time: Some(start),
        pass_end_time: Some(start + Duration::minutes(12)),
        max_elevation: Some(62.0),
        azimuth_start: Some(15.0),
        azimuth_end: Some(190.0),
    }
}

pub fn create_command_request(order: u32, first: &str, description: &str) -> CommandEntryRequest {
    let mut command: Vec<String> = vec![String::from(first)];
    command.extend(
        ["02", "03", "04", "05", "06", "07", "08", "09", "0A", "0B"]
            .iter()
            .map(ToString::to_string),
    );
    CommandEntryRequest {
        order,
        command,
        description: description.to_string(),
    }
}
