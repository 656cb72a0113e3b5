// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for error translation.

use gardens::{CoreError, ListKind};
use gardens_domain::DomainError;
use gardens_persistence::PersistenceError;

use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::password_policy::PasswordPolicyError;

#[test]
fn test_command_errors_map_to_command_field() {
    let err: ApiError = translate_domain_error(DomainError::InvalidCommandToken {
        position: 3,
        value: String::from("ZZ"),
    });

    assert_eq!(
        err,
        ApiError::InvalidInput {
            field: String::from("command"),
            message: String::from("Command byte 3 must be two hex digits (0-9, A-F), got 'ZZ'"),
        }
    );
}

#[test]
fn test_index_out_of_range_maps_to_list_field() {
    let err: ApiError = translate_core_error(CoreError::IndexOutOfRange {
        kind: ListKind::Operators,
        index: 4,
        len: 1,
    });

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "operator"));
}

#[test]
fn test_persistence_errors_keep_context() {
    let err: ApiError = translate_persistence_error(
        "Failed to save operation",
        PersistenceError::Query(String::from("disk full")),
    );

    match err {
        ApiError::Internal { message } => assert!(message.starts_with("Failed to save operation")),
        other => panic!("Expected Internal, got {other:?}"),
    }
}

#[test]
fn test_password_policy_error_conversion() {
    let err: ApiError = PasswordPolicyError::ConfirmationMismatch.into();

    assert_eq!(
        err.to_string(),
        "Password policy violation: Password and confirmation do not match"
    );
}
