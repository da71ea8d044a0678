//! Password validation functions

use crate::result::{ErrorKind, PasswordRequirements, ValidationResult, Violations};
use crate::string::char_len;

/// Characters that satisfy the special-character requirement.
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*(),.?\":{}|<>";

pub const PASSWORD_MIN_LENGTH: usize = 8;
pub const PASSWORD_MAX_LENGTH: usize = 128;

/// Evaluates the five strength checks on their own.
pub fn password_requirements(password: &str) -> PasswordRequirements {
    PasswordRequirements {
        has_length: char_len(password) >= PASSWORD_MIN_LENGTH,
        has_uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
        has_lowercase: password.chars().any(|c| c.is_ascii_lowercase()),
        has_number: password.chars().any(|c| c.is_ascii_digit()),
        has_special: password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)),
    }
}

/// Validates password strength.
///
/// The requirement map is attached to every result, including the empty
/// case, so the register form can render its checklist from it directly.
pub fn validate_password(password: &str) -> ValidationResult {
    let mut errors = Violations::new();

    if password.is_empty() {
        errors.push(ErrorKind::EmptyField, "Password is required");
        return errors.finish().with_requirements(PasswordRequirements::default());
    }

    let requirements = password_requirements(password);

    if !requirements.has_length {
        errors.push(ErrorKind::TooShort, "Password must be at least 8 characters long");
    }
    if char_len(password) > PASSWORD_MAX_LENGTH {
        errors.push(ErrorKind::LengthExceeded, "Password must be less than 128 characters");
    }
    if !requirements.has_uppercase {
        errors.push(ErrorKind::FormatError, "Password must contain at least one uppercase letter");
    }
    if !requirements.has_lowercase {
        errors.push(ErrorKind::FormatError, "Password must contain at least one lowercase letter");
    }
    if !requirements.has_number {
        errors.push(ErrorKind::FormatError, "Password must contain at least one number");
    }
    if !requirements.has_special {
        errors.push(ErrorKind::FormatError, "Password must contain at least one special character");
    }

    errors.finish().with_requirements(requirements)
}

pub fn is_valid_password(password: &str) -> bool {
    validate_password(password).is_valid()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Password123!")]
    #[case("Secure@Pass1")]
    #[case("Abcdef1\"")]
    #[case("x{Y}9zzzz")]
    fn test_strong_passwords(#[case] password: &str) {
        let result = validate_password(password);
        assert!(result.is_valid(), "{password} should pass: {:?}", result.messages());
        assert!(result.requirements().unwrap().all_met());
    }

    #[rstest]
    #[case("NoSpecial123", "Password must contain at least one special character")]
    #[case("nouppercas!1", "Password must contain at least one uppercase letter")]
    #[case("NOLOWERCASE!1", "Password must contain at least one lowercase letter")]
    #[case("NoDigits!Aa", "Password must contain at least one number")]
    #[case("Ab1!", "Password must be at least 8 characters long")]
    #[case("Password123_", "Password must contain at least one special character")]
    fn test_weak_passwords(#[case] password: &str, #[case] message: &str) {
        let result = validate_password(password);
        assert!(!result.is_valid());
        assert_eq!(result.messages(), vec![message]);
    }

    #[test]
    fn test_empty_password_has_requirements() {
        let result = validate_password("");
        assert_eq!(result.messages(), vec!["Password is required"]);
        assert_eq!(result.requirements(), Some(&PasswordRequirements::default()));
    }

    #[test]
    fn test_requirements_reported_when_invalid() {
        let result = validate_password("abc");
        let req = result.requirements().unwrap();
        assert!(req.has_lowercase);
        assert!(!req.has_uppercase);
        assert!(!req.has_length);
        assert_eq!(result.errors().len(), 4);
    }

    #[test]
    fn test_too_long_password() {
        let password = format!("Aa1!{}", "x".repeat(125));
        let result = validate_password(&password);
        assert!(!result.is_valid());
        assert!(result.requirements().unwrap().all_met());
        assert_eq!(result.messages(), vec!["Password must be less than 128 characters"]);

        let at_limit = format!("Aa1!{}", "x".repeat(124));
        assert!(is_valid_password(&at_limit));
    }
}
