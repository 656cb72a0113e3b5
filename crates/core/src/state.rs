// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use gardens_domain::{
    CommandEntry, CommandToken, OperationRecord, OperationStatus, validate_command_tokens,
};

use crate::apply::apply;
use crate::command::{RecorderCommand, SubmittedCommand};
use crate::error::CoreError;

/// The in-progress operation for one pass.
///
/// A draft for a pass with no stored record starts as `unset` with no
/// operators and no commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDraft {
    pub satellite_schedule_id: String,
    pub status: OperationStatus,
    pub operators: Vec<String>,
    pub commands: Vec<CommandEntry>,
}

impl OperationDraft {
    /// Creates the default draft for a pass.
    #[must_use]
    pub fn new(satellite_schedule_id: impl Into<String>) -> Self {
        Self {
            satellite_schedule_id: satellite_schedule_id.into(),
            status: OperationStatus::Unset,
            operators: Vec::new(),
            commands: Vec::new(),
        }
    }

    /// Loads a draft from a stored record.
    #[must_use]
    pub fn from_record(record: &OperationRecord) -> Self {
        Self {
            satellite_schedule_id: record.satellite_schedule_id.clone(),
            status: record.status,
            operators: record.operators.clone(),
            commands: record.commands.clone(),
        }
    }

    /// Builds a draft from a whole client submission.
    ///
    /// Operators are assigned in order, so duplicates collapse to their
    /// first occurrence. Each command must have the full set of valid
    /// bytes. Submitted `order` values are kept as given.
    ///
    /// # Errors
    ///
    /// Returns an error if any operator identifier is empty or any command
    /// fails validation. No partial draft is returned.
    pub fn rebuild(
        satellite_schedule_id: impl Into<String>,
        status: OperationStatus,
        operators: Vec<String>,
        commands: Vec<SubmittedCommand>,
    ) -> Result<Self, CoreError> {
        let mut draft: Self = Self::new(satellite_schedule_id);
        draft.status = status;

        for operator_id in operators {
            draft = apply(&draft, RecorderCommand::AssignOperator { operator_id })?.new_draft;
        }

        for submitted in commands {
            let tokens: Vec<CommandToken> = validate_command_tokens(&submitted.command)?;
            draft.commands.push(CommandEntry::new(
                submitted.order,
                tokens,
                &submitted.description,
            ));
        }

        Ok(draft)
    }

    /// Returns the `order` the next appended command receives.
    #[must_use]
    pub fn next_command_order(&self) -> u32 {
        u32::try_from(self.commands.len())
            .unwrap_or(u32::MAX)
            .saturating_add(1)
    }
}

/// Whether applying a command changed the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    Changed,
    /// The command was accepted but had no effect, e.g. assigning an
    /// operator who is already assigned.
    Unchanged,
}

/// The result of applying a command to a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The draft after the command.
    pub new_draft: OperationDraft,
    pub outcome: TransitionOutcome,
}
