// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pass operation recorder.
//!
//! An operator edits one pass at a time: toggles whether it will be
//! operated, assigns operators, and builds an ordered list of fixed-width
//! hex commands. Edits are expressed as [`RecorderCommand`] values and
//! applied to an immutable [`OperationDraft`] by [`apply`]. Persisting the
//! draft is left to the caller.
//!
//! ## Two entry points
//!
//! - **Editing clients** drive [`apply`] with every [`RecorderCommand`]
//!   variant, and use [`CommandForm`] for the eleven byte fields. This is
//!   the interactive editing API. The server never edits a draft step by
//!   step.
//! - **The server** receives a whole draft in one request and calls
//!   [`OperationDraft::rebuild`]. That replays operator assignment through
//!   [`apply`] and validates each command with the same rules
//!   `AppendCommand` uses.

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

mod apply;
mod command;
mod error;
mod form;
mod state;

#[cfg(test)]
mod tests;

pub use apply::apply;
pub use command::{RecorderCommand, SubmittedCommand};
pub use error::{CoreError, ListKind};
pub use form::CommandForm;
pub use state::{OperationDraft, TransitionOutcome, TransitionResult};
