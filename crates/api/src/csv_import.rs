// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV parsing for bulk satellite pass import.
//!
//! Headers are matched case-insensitively with spaces treated as
//! underscores. Empty cells become missing values; only `id` is required.

use std::collections::HashMap;

use csv::StringRecord;
use gardens_domain::{SatellitePass, parse_rfc3339};
use time::OffsetDateTime;

use crate::error::ApiError;

/// Required CSV column headers (normalized).
const REQUIRED_HEADERS: &[&str] = &[
    "id",
    "name",
    "pass_start_time",
    "pass_end_time",
    "max_elevation",
    "azimuth_start",
    "azimuth_end",
];

/// A parsed row, or the reasons it could not be parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPassRow {
    /// 1-based, excluding the header.
    pub row_number: usize,
    /// The raw `id` cell, when present.
    pub pass_id: Option<String>,
    pub result: Result<SatellitePass, Vec<String>>,
}

fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase().replace(' ', "_")
}

fn validate_headers(headers: &StringRecord) -> Result<HashMap<String, usize>, ApiError> {
    let header_map: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(idx, header)| (normalize_header(header), idx))
        .collect();

    let missing: Vec<&str> = REQUIRED_HEADERS
        .iter()
        .copied()
        .filter(|required| !header_map.contains_key(*required))
        .collect();

    if !missing.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("csv_content"),
            message: format!("Missing required headers: {}", missing.join(", ")),
        });
    }

    Ok(header_map)
}

fn parse_row(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
) -> Result<SatellitePass, Vec<String>> {
    let mut errors: Vec<String> = Vec::new();

    let get_field = |name: &str| -> Option<String> {
        header_map
            .get(name)
            .and_then(|&idx| record.get(idx))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    };

    let id: Option<String> = get_field("id");
    if id.is_none() {
        errors.push(String::from("id: required field is missing or empty"));
    }

    let mut parse_time = |name: &str| {
        get_field(name).and_then(|value| {
            parse_rfc3339(&value).map_or_else(
                |e| {
                    errors.push(format!("{name}: {e}"));
                    None
                },
                Some,
            )
        })
    };
    let pass_start_time: Option<OffsetDateTime> = parse_time("pass_start_time");
    let pass_end_time: Option<OffsetDateTime> = parse_time("pass_end_time");

    let mut parse_number = |name: &str| {
        get_field(name).and_then(|value| match value.parse::<f64>() {
            Ok(number) if number.is_finite() => Some(number),
            _ => {
                errors.push(format!("{name}: invalid number '{value}'"));
                None
            }
        })
    };
    let max_elevation: Option<f64> = parse_number("max_elevation");
    let azimuth_start: Option<f64> = parse_number("azimuth_start");
    let azimuth_end: Option<f64> = parse_number("azimuth_end");

    if let (Some(start), Some(end)) = (pass_start_time, pass_end_time)
        && end < start
    {
        errors.push(String::from(
            "pass_end_time: must not be earlier than pass_start_time",
        ));
    }

    match id {
        Some(id) if errors.is_empty() => Ok(SatellitePass {
            id,
            name: get_field("name"),
            pass_start_time,
            pass_end_time,
            max_elevation,
            azimuth_start,
            azimuth_end,
        }),
        _ => Err(errors),
    }
}

/// Parses CSV text into pass rows without touching the database.
///
/// # Errors
///
/// Returns an error if the headers are missing or the CSV is malformed.
/// Problems within a single row are reported in that row's result instead.
pub fn parse_passes_csv(csv_content: &str) -> Result<Vec<ParsedPassRow>, ApiError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(csv_content.as_bytes());

    let headers: StringRecord = reader
        .headers()
        .map_err(|e| ApiError::InvalidInput {
            field: String::from("csv_content"),
            message: format!("Failed to read CSV headers: {e}"),
        })?
        .clone();
    let header_map: HashMap<String, usize> = validate_headers(&headers)?;
    let id_index: Option<usize> = header_map.get("id").copied();

    let mut rows: Vec<ParsedPassRow> = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record: StringRecord = record.map_err(|e| ApiError::InvalidInput {
            field: String::from("csv_content"),
            message: format!("Failed to read CSV row {}: {e}", index + 1),
        })?;

        rows.push(ParsedPassRow {
            row_number: index + 1,
            pass_id: id_index
                .and_then(|idx| record.get(idx))
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from),
            result: parse_row(&record, &header_map),
        });
    }

    Ok(rows)
}
