// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Satellite pass persistence tests.

use gardens_domain::SatellitePass;
use time::macros::datetime;

use crate::tests::create_test_pass;
use crate::{Persistence, PersistenceError};

#[test]
fn test_insert_and_get_pass() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let pass: SatellitePass = create_test_pass("P1", datetime!(2026-10-18 09:00:00 UTC));

    persistence.insert_satellite_pass(&pass).unwrap();

    let stored: SatellitePass = persistence.get_satellite_pass("P1").unwrap().unwrap();
    assert_eq!(stored, pass);
}

#[test]
fn test_get_unknown_pass_returns_none() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    assert!(persistence.get_satellite_pass("nope").unwrap().is_none());
}

#[test]
fn test_insert_duplicate_pass_is_rejected() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let pass: SatellitePass = create_test_pass("P1", datetime!(2026-10-18 09:00:00 UTC));
    persistence.insert_satellite_pass(&pass).unwrap();

    let result: Result<(), PersistenceError> = persistence.insert_satellite_pass(&pass);

    assert_eq!(
        result,
        Err(PersistenceError::DuplicatePass(String::from("P1")))
    );
}

#[test]
fn test_pass_with_missing_fields_round_trips() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let pass: SatellitePass = SatellitePass {
        id: String::from("bare"),
        name: None,
        pass_start_time: None,
        pass_end_time: None,
        max_elevation: None,
        azimuth_start: None,
        azimuth_end: None,
    };

    persistence.insert_satellite_pass(&pass).unwrap();

    assert_eq!(persistence.get_satellite_pass("bare").unwrap(), Some(pass));
}

#[test]
fn test_list_passes_orders_by_start_time() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    persistence
        .insert_satellite_pass(&create_test_pass("late", datetime!(2026-10-19 09:00:00 UTC)))
        .unwrap();
    persistence
        .insert_satellite_pass(&create_test_pass("early", datetime!(2026-10-18 09:00:00 UTC)))
        .unwrap();

    let ids: Vec<String> = persistence
        .list_satellite_passes()
        .unwrap()
        .into_iter()
        .map(|pass| pass.id)
        .collect();

    assert_eq!(ids, vec!["early", "late"]);
}
