// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! Every query is generated in `_sqlite` and `_mysql` variants by
//! `backend_fn!`; the `Persistence` adapter in `lib.rs` picks one based on
//! the active connection.

pub mod accounts;
pub mod operations;
pub mod schedule;
