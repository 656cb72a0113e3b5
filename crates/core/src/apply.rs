// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use gardens_domain::{CommandEntry, CommandToken, validate_command_tokens, validate_operator_id};

use crate::command::RecorderCommand;
use crate::error::{CoreError, ListKind};
use crate::state::{OperationDraft, TransitionOutcome, TransitionResult};

/// Applies a command to a draft, producing a new draft.
///
/// The input draft is never modified. On error the caller keeps its
/// existing draft.
///
/// # Arguments
///
/// * `draft` - The current draft (immutable)
/// * `command` - The edit to apply
///
/// # Errors
///
/// Returns an error if:
/// - An operator identifier is empty
/// - A removal index is past the end of its list
/// - An appended command does not have exactly the required number of
///   valid hex bytes
pub fn apply(
    draft: &OperationDraft,
    command: RecorderCommand,
) -> Result<TransitionResult, CoreError> {
    match command {
        RecorderCommand::ToggleStatus(target) => {
            let mut new_draft: OperationDraft = draft.clone();
            new_draft.status = draft.status.toggled(target);

            Ok(TransitionResult {
                new_draft,
                outcome: TransitionOutcome::Changed,
            })
        }
        RecorderCommand::AssignOperator { operator_id } => {
            validate_operator_id(&operator_id)?;

            if draft.operators.contains(&operator_id) {
                return Ok(TransitionResult {
                    new_draft: draft.clone(),
                    outcome: TransitionOutcome::Unchanged,
                });
            }

            let mut new_draft: OperationDraft = draft.clone();
            new_draft.operators.push(operator_id);

            Ok(TransitionResult {
                new_draft,
                outcome: TransitionOutcome::Changed,
            })
        }
        RecorderCommand::RemoveOperator { index } => {
            if index >= draft.operators.len() {
                return Err(CoreError::IndexOutOfRange {
                    kind: ListKind::Operators,
                    index,
                    len: draft.operators.len(),
                });
            }

            let mut new_draft: OperationDraft = draft.clone();
            new_draft.operators.remove(index);

            Ok(TransitionResult {
                new_draft,
                outcome: TransitionOutcome::Changed,
            })
        }
        RecorderCommand::AppendCommand {
            tokens,
            description,
        } => {
            // All-or-nothing: one bad field rejects the whole command.
            let command: Vec<CommandToken> = validate_command_tokens(&tokens)?;

            let mut new_draft: OperationDraft = draft.clone();
            let order: u32 = draft.next_command_order();
            new_draft
                .commands
                .push(CommandEntry::new(order, command, &description));

            Ok(TransitionResult {
                new_draft,
                outcome: TransitionOutcome::Changed,
            })
        }
        RecorderCommand::RemoveCommand { index } => {
            if index >= draft.commands.len() {
                return Err(CoreError::IndexOutOfRange {
                    kind: ListKind::Commands,
                    index,
                    len: draft.commands.len(),
                });
            }

            let mut new_draft: OperationDraft = draft.clone();
            new_draft.commands.remove(index);

            Ok(TransitionResult {
                new_draft,
                outcome: TransitionOutcome::Changed,
            })
        }
    }
}
