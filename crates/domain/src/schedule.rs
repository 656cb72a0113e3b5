// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Upcoming pass selection.
//!
//! A pass is upcoming when it starts on the current calendar day or later,
//! where "day" is the station's local day. Both instants are truncated to
//! local midnight before comparison, so a pass that started earlier today
//! is still listed.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use time::OffsetDateTime;

use crate::error::DomainError;
use crate::types::SatellitePass;

/// Parses an IANA timezone name such as `Asia/Tokyo`.
///
/// # Errors
///
/// Returns `DomainError::InvalidTimezone` for unknown names.
pub fn parse_timezone(name: &str) -> Result<Tz, DomainError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| DomainError::InvalidTimezone(name.to_string()))
}

fn local_date(instant: OffsetDateTime, tz: Tz) -> Option<NaiveDate> {
    let utc: DateTime<Utc> = DateTime::from_timestamp(instant.unix_timestamp(), 0)?;
    Some(utc.with_timezone(&tz).date_naive())
}

/// Returns whether `pass` starts today or later in the station timezone.
///
/// Passes without a start time are never upcoming.
#[must_use]
pub fn is_upcoming(pass: &SatellitePass, now: OffsetDateTime, tz: Tz) -> bool {
    let Some(start) = pass.pass_start_time else {
        return false;
    };

    match (local_date(start, tz), local_date(now, tz)) {
        (Some(pass_day), Some(today)) => pass_day >= today,
        _ => false,
    }
}

/// Keeps the upcoming passes, preserving input order.
#[must_use]
pub fn filter_upcoming(passes: Vec<SatellitePass>, now: OffsetDateTime, tz: Tz) -> Vec<SatellitePass> {
    passes
        .into_iter()
        .filter(|pass| is_upcoming(pass, now, tz))
        .collect()
}
