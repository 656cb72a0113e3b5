// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend initialization tests.
//!
//! Every other test module opens an in-memory database, so connection
//! setup, migrations and foreign keys are exercised throughout; these
//! cover the initialization paths directly.

use crate::tests::create_test_account;
use crate::{Persistence, PersistenceError};

#[test]
fn test_persistence_initialization() {
    let result: Result<Persistence, PersistenceError> = Persistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_foreign_keys_are_enforced() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1: Persistence = Persistence::new_in_memory().unwrap();
    let mut db2: Persistence = Persistence::new_in_memory().unwrap();

    db1.create_account(&create_test_account("iso@gardens.example"))
        .unwrap();

    assert_eq!(db1.list_user_details().unwrap().len(), 1);
    assert!(db2.list_user_details().unwrap().is_empty());
}

#[test]
fn test_migrations_applied_on_initialization() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    assert!(persistence.list_satellite_passes().unwrap().is_empty());
    assert!(persistence.list_operations().unwrap().is_empty());
}

#[test]
fn test_file_database_persists_across_reopen() {
    let path: std::path::PathBuf = std::env::temp_dir().join(format!(
        "gardens_persistence_test_{}.db",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    {
        let mut persistence: Persistence = Persistence::new_with_file(&path).unwrap();
        persistence
            .create_account(&create_test_account("file@gardens.example"))
            .unwrap();
    }

    let mut reopened: Persistence = Persistence::new_with_file(&path).unwrap();
    assert!(
        reopened
            .get_user_by_email("file@gardens.example")
            .unwrap()
            .is_some()
    );

    drop(reopened);
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
    }
}
