// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Canonical timestamp text form.
//!
//! Every timestamp the system writes is UTC with second precision, e.g.
//! `2026-10-18T09:30:00Z`. Fixed-width UTC text sorts lexically in time
//! order, so stored values can be compared as strings.

use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::error::DomainError;

const STORAGE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]Z");

/// Formats a timestamp in the canonical storage form, converting to UTC.
///
/// # Errors
///
/// Returns `DomainError::DateFormatError` if the year cannot be rendered.
pub fn format_timestamp(value: OffsetDateTime) -> Result<String, DomainError> {
    value
        .to_offset(UtcOffset::UTC)
        .format(STORAGE_FORMAT)
        .map_err(|e| DomainError::DateFormatError(e.to_string()))
}

/// Parses a timestamp written by [`format_timestamp`].
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the text is not in storage form.
pub fn parse_timestamp(value: &str) -> Result<OffsetDateTime, DomainError> {
    PrimitiveDateTime::parse(value, STORAGE_FORMAT)
        .map(PrimitiveDateTime::assume_utc)
        .map_err(|e| DomainError::DateParseError {
            date_string: value.to_string(),
            error: e.to_string(),
        })
}

/// Parses any RFC 3339 timestamp and normalizes it to UTC.
///
/// Sub-second precision is dropped so the result round-trips through
/// the storage form unchanged.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the text is not valid RFC 3339.
pub fn parse_rfc3339(value: &str) -> Result<OffsetDateTime, DomainError> {
    let parsed: OffsetDateTime =
        OffsetDateTime::parse(value.trim(), &Rfc3339).map_err(|e| DomainError::DateParseError {
            date_string: value.to_string(),
            error: e.to_string(),
        })?;

    let utc: OffsetDateTime = parsed.to_offset(UtcOffset::UTC);
    Ok(utc.replace_nanosecond(0).unwrap_or(utc))
}
