// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use gardens_domain::DomainError;

/// The draft list an index refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Operators,
    Commands,
}

impl std::fmt::Display for ListKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Operators => write!(f, "operator"),
            Self::Commands => write!(f, "command"),
        }
    }
}

/// Errors that can occur during draft transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// A removal named a position past the end of the list.
    IndexOutOfRange {
        /// Which list was addressed.
        kind: ListKind,
        /// The requested position.
        index: usize,
        /// The list length at the time of the request.
        len: usize,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::IndexOutOfRange { kind, index, len } => {
                write!(f, "No {kind} at index {index} (list has {len} entries)")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
