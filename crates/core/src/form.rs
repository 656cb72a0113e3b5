// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use gardens_domain::COMMAND_LENGTH;

use crate::apply::apply;
use crate::command::RecorderCommand;
use crate::error::CoreError;
use crate::state::{OperationDraft, TransitionResult};

/// The command entry fields: one input per byte plus a description.
///
/// Inputs are upper-cased as they are set. After a successful submit the
/// fields are cleared; after a rejected submit they keep their values so
/// the operator can correct the offending byte.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandForm {
    tokens: [String; COMMAND_LENGTH],
    description: String,
}

impl CommandForm {
    /// Creates an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets one byte field. Positions past the last field are ignored.
    pub fn set_token(&mut self, position: usize, value: &str) {
        if let Some(slot) = self.tokens.get_mut(position) {
            *slot = value.to_uppercase();
        }
    }

    /// Sets the description field.
    pub fn set_description(&mut self, value: &str) {
        self.description = value.to_string();
    }

    /// Returns the byte fields.
    #[must_use]
    pub const fn tokens(&self) -> &[String; COMMAND_LENGTH] {
        &self.tokens
    }

    /// Returns the description field.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Appends the form's command to `draft`.
    ///
    /// # Errors
    ///
    /// Returns the validation error if any field is invalid; the form is
    /// left untouched in that case.
    pub fn submit(&mut self, draft: &OperationDraft) -> Result<TransitionResult, CoreError> {
        let result: TransitionResult = apply(
            draft,
            RecorderCommand::AppendCommand {
                tokens: self.tokens.to_vec(),
                description: self.description.clone(),
            },
        )?;

        *self = Self::new();
        Ok(result)
    }
}
