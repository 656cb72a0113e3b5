// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use gardens_domain::COMMAND_LENGTH;

use crate::{OperationDraft, RecorderCommand, apply};

pub const TEST_PASS_ID: &str = "P1";

pub fn create_test_draft() -> OperationDraft {
    OperationDraft::new(TEST_PASS_ID)
}

/// Returns eleven valid byte fields, the first one set to `first`.
pub fn create_test_tokens(first: &str) -> Vec<String> {
    let mut tokens: Vec<String> = vec![String::from("00"); COMMAND_LENGTH];
    tokens[0] = first.to_string();
    tokens
}

pub fn append(draft: &OperationDraft, first: &str, description: &str) -> OperationDraft {
    apply(
        draft,
        RecorderCommand::AppendCommand {
            tokens: create_test_tokens(first),
            description: description.to_string(),
        },
    )
    .unwrap()
    .new_draft
}
