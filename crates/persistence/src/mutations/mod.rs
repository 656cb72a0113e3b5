// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write operations.
//!
//! Like the queries, every mutation exists as an `_sqlite` and a `_mysql`
//! function generated from one body. Multi-statement writes run inside a
//! single database transaction.

pub mod accounts;
pub mod operations;
pub mod schedule;
