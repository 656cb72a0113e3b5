// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    COMMAND_LENGTH, CommandToken, DomainError, validate_command_tokens, validate_email,
    validate_operator_id, validate_person_name, validate_unit_no,
};

#[test]
fn test_validate_command_tokens_accepts_full_command() {
    let inputs: [&str; COMMAND_LENGTH] = [
        "01", "02", "03", "04", "05", "06", "07", "08", "09", "0A", "0B",
    ];

    let tokens: Vec<CommandToken> = validate_command_tokens(&inputs).unwrap();
    assert_eq!(tokens.len(), COMMAND_LENGTH);
    assert_eq!(tokens[9].value(), "0A");
}

#[test]
fn test_validate_command_tokens_accepts_lowercase() {
    let inputs: Vec<String> = vec![String::from("ff"); COMMAND_LENGTH];

    let tokens: Vec<CommandToken> = validate_command_tokens(&inputs).unwrap();
    assert!(tokens.iter().all(|token| token.value() == "FF"));
}

#[test]
fn test_validate_command_tokens_reports_first_bad_position() {
    let inputs: [&str; COMMAND_LENGTH] = [
        "01", "02", "ZZ", "04", "X", "06", "07", "08", "09", "0A", "0B",
    ];

    let result: Result<Vec<CommandToken>, DomainError> = validate_command_tokens(&inputs);
    assert_eq!(
        result,
        Err(DomainError::InvalidCommandToken {
            position: 3,
            value: String::from("ZZ"),
        })
    );
}

#[test]
fn test_validate_command_tokens_rejects_empty_field() {
    let mut inputs: Vec<&str> = vec!["00"; COMMAND_LENGTH];
    inputs[10] = "";

    let result: Result<Vec<CommandToken>, DomainError> = validate_command_tokens(&inputs);
    assert!(matches!(
        result,
        Err(DomainError::InvalidCommandToken { position: 11, .. })
    ));
}

#[test]
fn test_validate_command_tokens_rejects_wrong_length() {
    let inputs: Vec<&str> = vec!["00"; COMMAND_LENGTH - 1];

    let result: Result<Vec<CommandToken>, DomainError> = validate_command_tokens(&inputs);
    assert_eq!(
        result,
        Err(DomainError::InvalidCommandLength {
            expected: COMMAND_LENGTH,
            actual: COMMAND_LENGTH - 1,
        })
    );
}

#[test]
fn test_validate_operator_id() {
    assert!(validate_operator_id("u1").is_ok());
    assert_eq!(validate_operator_id("  "), Err(DomainError::EmptyOperatorId));
}

#[test]
fn test_validate_email_accepts_plain_address() {
    assert!(validate_email("operator@gardens.example").is_ok());
}

#[test]
fn test_validate_email_rejects_malformed_addresses() {
    for email in [
        "",
        "operator",
        "@gardens.example",
        "operator@",
        "operator@gardens",
        "a@b@gardens.example",
        "oper ator@gardens.example",
    ] {
        assert!(
            matches!(validate_email(email), Err(DomainError::InvalidEmail(_))),
            "expected {email:?} to be rejected"
        );
    }
}

#[test]
fn test_validate_person_name() {
    assert!(validate_person_name("first_name", "Hanako").is_ok());
    assert!(matches!(
        validate_person_name("first_name", "   "),
        Err(DomainError::InvalidName(_))
    ));
}

#[test]
fn test_validate_unit_no_bounds() {
    assert!(validate_unit_no(1).is_ok());
    assert!(validate_unit_no(999).is_ok());
    assert_eq!(validate_unit_no(0), Err(DomainError::InvalidUnitNumber(0)));
    assert_eq!(
        validate_unit_no(1000),
        Err(DomainError::InvalidUnitNumber(1000))
    );
}
