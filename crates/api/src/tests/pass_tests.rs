// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the upcoming pass listing.

use chrono_tz::Tz;
use gardens_domain::OperationStatus;
use gardens_persistence::Persistence;
use time::OffsetDateTime;
use time::macros::datetime;

use crate::auth::AuthenticatedUser;
use crate::handlers::{list_upcoming_passes, save_operation};
use crate::request_response::{ListPassesResponse, SaveOperationRequest};
use crate::tests::helpers::{create_test_pass, create_test_user};

const NOW: OffsetDateTime = datetime!(2026-10-18 12:00:00 UTC);

fn ids(response: &ListPassesResponse) -> Vec<&str> {
    response.passes.iter().map(|p| p.id.as_str()).collect()
}

#[test]
fn test_lists_passes_from_start_of_today() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    for (id, start) in [
        ("yesterday", datetime!(2026-10-17 23:59:59 UTC)),
        ("this-morning", datetime!(2026-10-18 00:00:00 UTC)),
        ("tonight", datetime!(2026-10-18 23:00:00 UTC)),
        ("next-week", datetime!(2026-10-25 06:00:00 UTC)),
    ] {
        persistence
            .insert_satellite_pass(&create_test_pass(id, start))
            .unwrap();
    }

    let response: ListPassesResponse =
        list_upcoming_passes(&mut persistence, NOW, Tz::UTC).unwrap();

    assert_eq!(response.timezone, "UTC");
    assert_eq!(ids(&response), vec!["this-morning", "tonight", "next-week"]);
    assert_eq!(
        response.passes[0].pass_start_time.as_deref(),
        Some("2026-10-18T00:00:00Z")
    );
    assert_eq!(response.passes[0].duration_minutes, Some(12.0));
}

#[test]
fn test_station_timezone_decides_today() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    // 2026-10-17 23:30 in Tokyo; "now" is already 2026-10-18 01:00 there.
    persistence
        .insert_satellite_pass(&create_test_pass("late-tokyo", datetime!(2026-10-17 14:30:00 UTC)))
        .unwrap();
    let now: OffsetDateTime = datetime!(2026-10-17 16:00:00 UTC);

    let utc: ListPassesResponse = list_upcoming_passes(&mut persistence, now, Tz::UTC).unwrap();
    let tokyo: ListPassesResponse =
        list_upcoming_passes(&mut persistence, now, chrono_tz::Asia::Tokyo).unwrap();

    assert_eq!(ids(&utc), vec!["late-tokyo"]);
    assert!(tokyo.passes.is_empty());
}

#[test]
fn test_pass_carries_operation_summary() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let user: AuthenticatedUser = create_test_user(&mut persistence, "u1@gardens.example");
    persistence
        .insert_satellite_pass(&create_test_pass("P1", datetime!(2026-10-18 15:00:00 UTC)))
        .unwrap();
    persistence
        .insert_satellite_pass(&create_test_pass("P2", datetime!(2026-10-18 17:00:00 UTC)))
        .unwrap();
    save_operation(
        &mut persistence,
        "P1",
        SaveOperationRequest {
            status: OperationStatus::Operate.to_string(),
            operators: vec![user.user_id.clone(), String::from("ghost")],
            commands: Vec::new(),
        },
        &user,
        NOW,
    )
    .unwrap();

    let response: ListPassesResponse =
        list_upcoming_passes(&mut persistence, NOW, Tz::UTC).unwrap();

    let summary = response.passes[0].operation.as_ref().unwrap();
    assert_eq!(summary.status, OperationStatus::Operate);
    let names: Vec<&str> = summary
        .operators
        .iter()
        .map(|o| o.display_name.as_str())
        .collect();
    assert_eq!(names, vec!["Yamada Hanako", "Unknown User"]);
    assert_eq!(summary.command_count, 0);
    assert!(response.passes[1].operation.is_none());
}
