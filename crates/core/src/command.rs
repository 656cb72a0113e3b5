// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use gardens_domain::OperationStatus;

/// A single edit an operator makes to a pass's operation draft.
///
/// Commands carry raw input; validation happens when they are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecorderCommand {
    /// Select a status. Selecting the current status clears it.
    ToggleStatus(OperationStatus),
    /// Add an operator unless already assigned.
    AssignOperator {
        /// The operator's account identifier.
        operator_id: String,
    },
    /// Remove the operator at a position.
    RemoveOperator {
        /// 0-based position in the operator list.
        index: usize,
    },
    /// Append a command built from the byte fields.
    AppendCommand {
        /// Raw text of each byte field, in order.
        tokens: Vec<String>,
        /// Free-text description; blank gets a placeholder.
        description: String,
    },
    /// Remove the command at a position. Other entries keep their order.
    RemoveCommand {
        /// 0-based position in the command list.
        index: usize,
    },
}

/// A command entry as submitted by a client saving a whole draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedCommand {
    pub order: u32,
    pub command: Vec<String>,
    pub description: String,
}
