// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Password policy validation for account sign-up.

use thiserror::Error;

/// Password policy errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    /// Password is too short.
    #[error("Password must be at least {min_length} characters long")]
    TooShort { min_length: usize },

    /// Password matches a forbidden value.
    #[error("Password must not match {field}")]
    MatchesForbiddenField { field: String },

    /// Password and confirmation do not match.
    #[error("Password and confirmation do not match")]
    ConfirmationMismatch,
}

/// Password policy configuration.
pub struct PasswordPolicy {
    /// Minimum password length, in characters.
    pub min_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self { min_length: 8 }
    }
}

impl PasswordPolicy {
    /// Validates a password against the policy.
    ///
    /// # Arguments
    ///
    /// * `password` - The password to validate
    /// * `confirmation` - The password confirmation
    /// * `email` - The account email (password must not match it or its local part)
    ///
    /// # Errors
    ///
    /// Returns a `PasswordPolicyError` if the password does not meet policy requirements.
    pub fn validate(
        &self,
        password: &str,
        confirmation: &str,
        email: &str,
    ) -> Result<(), PasswordPolicyError> {
        if password != confirmation {
            return Err(PasswordPolicyError::ConfirmationMismatch);
        }

        if password.chars().count() < self.min_length {
            return Err(PasswordPolicyError::TooShort {
                min_length: self.min_length,
            });
        }

        // Case-insensitive
        let password_lower: String = password.to_lowercase();
        let email_lower: String = email.trim().to_lowercase();

        if password_lower == email_lower {
            return Err(PasswordPolicyError::MatchesForbiddenField {
                field: String::from("email"),
            });
        }

        if let Some((local_part, _)) = email_lower.split_once('@')
            && password_lower == local_part
        {
            return Err(PasswordPolicyError::MatchesForbiddenField {
                field: String::from("email name"),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_password() {
        let policy: PasswordPolicy = PasswordPolicy::default();

        assert!(
            policy
                .validate("uplink-window", "uplink-window", "tanaka@gardens.example")
                .is_ok()
        );

        // Exactly 8 characters
        assert!(
            policy
                .validate("abcdefgh", "abcdefgh", "tanaka@gardens.example")
                .is_ok()
        );
    }

    #[test]
    fn test_password_too_short() {
        let policy: PasswordPolicy = PasswordPolicy::default();

        let result: Result<(), PasswordPolicyError> =
            policy.validate("short1!", "short1!", "tanaka@gardens.example");

        assert_eq!(result, Err(PasswordPolicyError::TooShort { min_length: 8 }));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let policy: PasswordPolicy = PasswordPolicy::default();

        // Seven characters, 21 bytes
        let result: Result<(), PasswordPolicyError> =
            policy.validate("衛星地上局の鍵", "衛星地上局の鍵", "tanaka@gardens.example");

        assert_eq!(result, Err(PasswordPolicyError::TooShort { min_length: 8 }));
    }

    #[test]
    fn test_matches_email() {
        let policy: PasswordPolicy = PasswordPolicy::default();

        let result: Result<(), PasswordPolicyError> = policy.validate(
            "Tanaka@Gardens.example",
            "Tanaka@Gardens.example",
            "tanaka@gardens.example",
        );

        assert_eq!(
            result,
            Err(PasswordPolicyError::MatchesForbiddenField {
                field: String::from("email")
            })
        );
    }

    #[test]
    fn test_matches_email_local_part() {
        let policy: PasswordPolicy = PasswordPolicy::default();

        let result: Result<(), PasswordPolicyError> = policy.validate(
            "Hanako.Yamada",
            "Hanako.Yamada",
            "hanako.yamada@gardens.example",
        );

        assert_eq!(
            result,
            Err(PasswordPolicyError::MatchesForbiddenField {
                field: String::from("email name")
            })
        );
    }

    #[test]
    fn test_confirmation_mismatch() {
        let policy: PasswordPolicy = PasswordPolicy::default();

        let result: Result<(), PasswordPolicyError> =
            policy.validate("uplink-window", "uplink-windows", "tanaka@gardens.example");

        assert_eq!(result, Err(PasswordPolicyError::ConfirmationMismatch));
    }

    #[test]
    fn test_custom_minimum_length() {
        let policy: PasswordPolicy = PasswordPolicy { min_length: 12 };

        let result: Result<(), PasswordPolicyError> =
            policy.validate("uplink-win", "uplink-win", "tanaka@gardens.example");

        assert_eq!(
            result,
            Err(PasswordPolicyError::TooShort { min_length: 12 })
        );
    }
}
