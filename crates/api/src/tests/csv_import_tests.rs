// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for CSV pass import.

use gardens_domain::SatellitePass;
use gardens_persistence::Persistence;
use time::macros::datetime;

use crate::ApiError;
use crate::csv_import::parse_passes_csv;
use crate::handlers::import_passes_csv;
use crate::request_response::{ImportPassesRequest, ImportPassesResponse, PassImportRowStatus};

const HEADER: &str =
    "id,name,pass_start_time,pass_end_time,max_elevation,azimuth_start,azimuth_end\n";

fn request(rows: &str) -> ImportPassesRequest {
    ImportPassesRequest {
        csv_content: format!("{HEADER}{rows}"),
    }
}

#[test]
fn test_import_valid_rows() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let response: ImportPassesResponse = import_passes_csv(
        &mut persistence,
        &request(
            "P1,GARDENS-1,2026-10-18T18:30:00+09:00,2026-10-18T18:42:00+09:00,62.5,15,190\n\
             P2,,,,,,\n",
        ),
    )
    .unwrap();

    assert_eq!(response.total_rows, 2);
    assert_eq!(response.imported_count, 2);
    assert_eq!(response.failed_count, 0);

    let pass: SatellitePass = persistence.get_satellite_pass("P1").unwrap().unwrap();
    assert_eq!(pass.pass_start_time, Some(datetime!(2026-10-18 09:30:00 UTC)));
    assert_eq!(pass.max_elevation, Some(62.5));

    let bare: SatellitePass = persistence.get_satellite_pass("P2").unwrap().unwrap();
    assert_eq!(bare.name, None);
    assert_eq!(bare.pass_start_time, None);
}

#[test]
fn test_import_reports_bad_rows_and_continues() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let response: ImportPassesResponse = import_passes_csv(
        &mut persistence,
        &request(
            "P1,A,yesterday,,,,\n\
             ,B,,,,,\n\
             P3,C,2026-10-18T09:00:00Z,2026-10-18T08:00:00Z,high,,\n\
             P4,D,2026-10-18T09:00:00Z,,,,\n",
        ),
    )
    .unwrap();

    assert_eq!(response.imported_count, 1);
    assert_eq!(response.failed_count, 3);

    let statuses: Vec<PassImportRowStatus> = response.results.iter().map(|r| r.status).collect();
    assert_eq!(
        statuses,
        vec![
            PassImportRowStatus::Failed,
            PassImportRowStatus::Failed,
            PassImportRowStatus::Failed,
            PassImportRowStatus::Imported,
        ]
    );
    assert!(response.results[0].errors[0].starts_with("pass_start_time"));
    assert_eq!(response.results[1].pass_id, None);
    assert_eq!(response.results[2].errors.len(), 2);
    assert!(persistence.get_satellite_pass("P1").unwrap().is_none());
}

#[test]
fn test_import_duplicate_pass_fails_row() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    import_passes_csv(&mut persistence, &request("P1,A,,,,,\n")).unwrap();

    let response: ImportPassesResponse =
        import_passes_csv(&mut persistence, &request("P1,A,,,,,\n")).unwrap();

    assert_eq!(response.failed_count, 1);
    assert_eq!(
        response.results[0].errors,
        vec![String::from("id: pass 'P1' already exists")]
    );
}

#[test]
fn test_missing_headers_rejected() {
    let result = parse_passes_csv("id,name\nP1,A\n");

    match result.unwrap_err() {
        ApiError::InvalidInput { field, message } => {
            assert_eq!(field, "csv_content");
            assert!(message.contains("pass_start_time"));
        }
        other => panic!("Expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_headers_match_case_and_spaces() {
    let rows = parse_passes_csv(
        "ID,Name,Pass Start Time,Pass End Time,Max Elevation,Azimuth Start,Azimuth End\n\
         P1,A,,,,,\n",
    )
    .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].pass_id.as_deref(), Some("P1"));
    assert!(rows[0].result.is_ok());
}
