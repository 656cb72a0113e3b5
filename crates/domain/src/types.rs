// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Number of bytes in every recorded command.
pub const COMMAND_LENGTH: usize = 11;

/// Description stored when the operator leaves the description blank.
pub const DEFAULT_COMMAND_DESCRIPTION: &str = "No description";

/// Label shown for an operator identifier with no matching user details.
pub const UNKNOWN_USER_LABEL: &str = "Unknown User";

/// Whether a pass will be operated.
///
/// `Operate` and `DoNotOperate` are mutually exclusive; selecting the
/// current value a second time returns the pass to `Unset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum OperationStatus {
    /// No decision recorded.
    #[default]
    Unset,
    /// The pass will be operated.
    Operate,
    /// The pass will be skipped.
    DoNotOperate,
}

impl OperationStatus {
    /// Returns the stored string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unset => "unset",
            Self::Operate => "operate",
            Self::DoNotOperate => "doNotOperate",
        }
    }

    /// Returns the status after the operator selects `target`.
    ///
    /// Selecting the current status clears it; anything else overwrites.
    #[must_use]
    pub fn toggled(self, target: Self) -> Self {
        if self == target { Self::Unset } else { target }
    }
}

impl FromStr for OperationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unset" => Ok(Self::Unset),
            "operate" => Ok(Self::Operate),
            "doNotOperate" => Ok(Self::DoNotOperate),
            _ => Err(DomainError::InvalidOperationStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One byte of a command, as a two-character uppercase hex string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommandToken(String);

impl CommandToken {
    /// Parses a token, upper-casing it first.
    ///
    /// Returns `None` unless the result is exactly two characters from `0-9A-F`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let upper: String = raw.to_uppercase();
        let is_hex_pair: bool =
            upper.len() == 2 && upper.chars().all(|c| matches!(c, '0'..='9' | 'A'..='F'));
        is_hex_pair.then_some(Self(upper))
    }

    /// Returns the token text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CommandToken {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("invalid command byte '{value}'"))
    }
}

impl From<CommandToken> for String {
    fn from(token: CommandToken) -> Self {
        token.0
    }
}

/// One recorded command for a pass.
///
/// `order` is assigned when the entry is appended and is never renumbered,
/// so gaps appear after removals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandEntry {
    /// 1-based position assigned at append time.
    pub order: u32,
    /// The command bytes.
    pub command: Vec<CommandToken>,
    /// Free-text description.
    pub description: String,
}

impl CommandEntry {
    /// Creates a command entry.
    ///
    /// The description is trimmed; a blank description becomes
    /// [`DEFAULT_COMMAND_DESCRIPTION`].
    #[must_use]
    pub fn new(order: u32, command: Vec<CommandToken>, description: &str) -> Self {
        let trimmed: &str = description.trim();
        let description: String = if trimmed.is_empty() {
            DEFAULT_COMMAND_DESCRIPTION.to_string()
        } else {
            trimmed.to_string()
        };

        Self {
            order,
            command,
            description,
        }
    }

    /// Returns the command bytes joined by single spaces.
    #[must_use]
    pub fn command_text(&self) -> String {
        self.command
            .iter()
            .map(CommandToken::value)
            .collect::<Vec<&str>>()
            .join(" ")
    }
}

/// A scheduled contact window with a satellite.
///
/// Rows are produced by an external ingestion process; every field but
/// the identifier may be missing.
#[derive(Debug, Clone, PartialEq)]
pub struct SatellitePass {
    pub id: String,
    pub name: Option<String>,
    pub pass_start_time: Option<OffsetDateTime>,
    pub pass_end_time: Option<OffsetDateTime>,
    pub max_elevation: Option<f64>,
    pub azimuth_start: Option<f64>,
    pub azimuth_end: Option<f64>,
}

impl SatellitePass {
    /// Returns the pass length in minutes, if both ends are known.
    #[must_use]
    pub fn duration_minutes(&self) -> Option<f64> {
        match (self.pass_start_time, self.pass_end_time) {
            (Some(start), Some(end)) => Some((end - start).as_seconds_f64() / 60.0),
            _ => None,
        }
    }
}

/// Profile of a user who can be assigned to operate a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDetails {
    pub id: String,
    /// The account identifier stored in operation operator lists.
    pub auth_id: String,
    pub first_name: String,
    pub last_name: String,
    pub unit_no: i32,
}

impl UserDetails {
    /// Returns the operator's name as `"{last} {first}"`.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.last_name, self.first_name)
    }

    /// Returns the label used in the operator selection menu.
    #[must_use]
    pub fn menu_label(&self) -> String {
        format!("{} (Unit {})", self.display_name(), self.unit_no)
    }
}

/// The persisted decision and command plan for one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationRecord {
    pub id: i64,
    pub satellite_schedule_id: String,
    pub status: OperationStatus,
    pub operators: Vec<String>,
    pub commands: Vec<CommandEntry>,
    pub create_user_id: Option<String>,
    pub created_at: OffsetDateTime,
    pub update_at: Option<OffsetDateTime>,
}
