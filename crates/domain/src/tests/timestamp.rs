// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::OffsetDateTime;
use time::macros::datetime;

use crate::{DomainError, format_timestamp, parse_rfc3339, parse_timestamp};

#[test]
fn test_format_timestamp_converts_to_utc() {
    let local: OffsetDateTime = datetime!(2026-10-18 18:30:00 +09:00);
    assert_eq!(format_timestamp(local).unwrap(), "2026-10-18T09:30:00Z");
}

#[test]
fn test_parse_timestamp_reads_storage_form() {
    let parsed: OffsetDateTime = parse_timestamp("2026-10-18T09:30:00Z").unwrap();
    assert_eq!(parsed, datetime!(2026-10-18 09:30:00 UTC));
}

#[test]
fn test_parse_timestamp_rejects_other_forms() {
    let result: Result<OffsetDateTime, DomainError> = parse_timestamp("2026-10-18 09:30");
    assert!(matches!(result, Err(DomainError::DateParseError { .. })));
}

#[test]
fn test_parse_rfc3339_normalizes_offset_and_fraction() {
    let parsed: OffsetDateTime = parse_rfc3339("2026-10-18T18:30:00.250+09:00").unwrap();
    assert_eq!(parsed, datetime!(2026-10-18 09:30:00 UTC));
    assert_eq!(format_timestamp(parsed).unwrap(), "2026-10-18T09:30:00Z");
}

#[test]
fn test_parse_rfc3339_rejects_garbage() {
    assert!(parse_rfc3339("tomorrow").is_err());
}
