// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain types and rules for the Gardens ground station.
//!
//! Everything in this crate is pure: no I/O, no clocks. Callers supply the
//! current time and the station timezone where a rule depends on them.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod schedule;
mod timestamp;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use schedule::{filter_upcoming, is_upcoming, parse_timezone};
pub use timestamp::{format_timestamp, parse_rfc3339, parse_timestamp};
pub use types::{
    COMMAND_LENGTH, CommandEntry, CommandToken, DEFAULT_COMMAND_DESCRIPTION, OperationRecord,
    OperationStatus, SatellitePass, UNKNOWN_USER_LABEL, UserDetails,
};
pub use validation::{
    validate_command_tokens, validate_email, validate_operator_id, validate_person_name,
    validate_unit_no,
};
