// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for sign-up, sign-in and sessions.

use gardens_persistence::{Persistence, UserData};

use crate::ApiError;
use crate::auth::{AuthenticatedUser, AuthenticationService};
use crate::handlers::{list_user_details, login, logout, sign_up, whoami};
use crate::request_response::{LoginRequest, LoginResponse, SignUpRequest, WhoAmIResponse};
use crate::tests::helpers::{TEST_PASSWORD, create_sign_up_request, create_test_user};

fn login_request(email: &str, password: &str) -> LoginRequest {
    LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[test]
fn test_sign_up_creates_account_and_profile() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let response = sign_up(
        &mut persistence,
        &create_sign_up_request("Yamada@Gardens.Example", "Yamada", 7),
    )
    .unwrap();

    assert_eq!(response.email, "yamada@gardens.example");

    let users = list_user_details(&mut persistence).unwrap().users;
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].auth_id, response.user_id);
    assert_eq!(users[0].display_name, "Yamada Hanako");
    assert_eq!(users[0].menu_label, "Yamada Hanako (Unit 7)");
}

#[test]
fn test_sign_up_duplicate_email_is_rule_violation() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    create_test_user(&mut persistence, "dup@gardens.example");

    let result = sign_up(
        &mut persistence,
        &create_sign_up_request("DUP@gardens.example", "Sato", 2),
    );

    match result.unwrap_err() {
        ApiError::DomainRuleViolation { rule, .. } => assert_eq!(rule, "unique_email"),
        other => panic!("Expected DomainRuleViolation, got {other:?}"),
    }
}

#[test]
fn test_sign_up_enforces_password_policy() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let mut request: SignUpRequest = create_sign_up_request("pw@gardens.example", "Yamada", 1);
    request.password = String::from("short");
    request.password_confirmation = String::from("short");

    let result = sign_up(&mut persistence, &request);

    assert!(matches!(
        result,
        Err(ApiError::PasswordPolicyViolation { .. })
    ));
    assert!(list_user_details(&mut persistence).unwrap().users.is_empty());
}

#[test]
fn test_sign_up_rejects_invalid_profile_fields() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let bad_email: SignUpRequest = create_sign_up_request("not-an-email", "Yamada", 1);
    let bad_unit: SignUpRequest = create_sign_up_request("unit@gardens.example", "Yamada", 1000);
    let blank_name: SignUpRequest = create_sign_up_request("name@gardens.example", "  ", 1);

    for (request, expected_field) in [
        (bad_email, "email"),
        (bad_unit, "unit_no"),
        (blank_name, "name"),
    ] {
        match sign_up(&mut persistence, &request).unwrap_err() {
            ApiError::InvalidInput { field, .. } => assert_eq!(field, expected_field),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }
}

#[test]
fn test_login_and_validate_session() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let user: AuthenticatedUser = create_test_user(&mut persistence, "ops@gardens.example");

    let response: LoginResponse = login(
        &mut persistence,
        &login_request("OPS@gardens.example", TEST_PASSWORD),
    )
    .unwrap();

    assert_eq!(response.user_id, user.user_id);
    assert_eq!(response.display_name.as_deref(), Some("Yamada Hanako"));

    let (validated, user_data): (AuthenticatedUser, UserData) =
        AuthenticationService::validate_session(&mut persistence, &response.session_token)
            .unwrap();
    assert_eq!(validated, user);
    assert!(user_data.last_sign_in_at.is_some());
}

#[test]
fn test_login_wrong_password_and_unknown_email_fail_alike() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    create_test_user(&mut persistence, "ops@gardens.example");

    let wrong_password = login(
        &mut persistence,
        &login_request("ops@gardens.example", "not-the-password"),
    )
    .unwrap_err();
    let unknown_email = login(
        &mut persistence,
        &login_request("nobody@gardens.example", TEST_PASSWORD),
    )
    .unwrap_err();

    assert_eq!(wrong_password, unknown_email);
    assert!(matches!(
        wrong_password,
        ApiError::AuthenticationFailed { .. }
    ));
}

#[test]
fn test_logout_invalidates_session() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    create_test_user(&mut persistence, "ops@gardens.example");
    let response: LoginResponse = login(
        &mut persistence,
        &login_request("ops@gardens.example", TEST_PASSWORD),
    )
    .unwrap();

    logout(&mut persistence, &response.session_token).unwrap();

    assert!(
        AuthenticationService::validate_session(&mut persistence, &response.session_token)
            .is_err()
    );
}

#[test]
fn test_expired_session_is_rejected() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let user: AuthenticatedUser = create_test_user(&mut persistence, "ops@gardens.example");
    persistence
        .create_session("stale-token", &user.user_id, "2020-01-01T00:00:00Z")
        .unwrap();

    let result = AuthenticationService::validate_session(&mut persistence, "stale-token");

    assert_eq!(
        result.unwrap_err().to_string(),
        "Authentication failed: Session expired"
    );
}

#[test]
fn test_whoami_reports_profile() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    create_test_user(&mut persistence, "ops@gardens.example");
    let response: LoginResponse = login(
        &mut persistence,
        &login_request("ops@gardens.example", TEST_PASSWORD),
    )
    .unwrap();
    let (user, user_data) =
        AuthenticationService::validate_session(&mut persistence, &response.session_token)
            .unwrap();

    let me: WhoAmIResponse = whoami(&mut persistence, &user, &user_data).unwrap();

    assert_eq!(me.email, "ops@gardens.example");
    assert_eq!(me.display_name.as_deref(), Some("Yamada Hanako"));
    assert_eq!(me.unit_no, Some(1));
    assert!(me.last_sign_in_at.is_some());
}
