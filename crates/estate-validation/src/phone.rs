//! Phone validation functions

use crate::result::{ErrorKind, ValidationResult};

/// Validates an optional phone number by its digit count; formatting
/// characters are ignored.
pub fn validate_phone(phone: &str) -> ValidationResult {
    if phone.is_empty() {
        return ValidationResult::valid();
    }

    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    if !(10..=15).contains(&digits) {
        return ValidationResult::invalid(
            ErrorKind::InvalidLength,
            "Phone number must be between 10 and 15 digits",
        );
    }

    ValidationResult::valid()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", true)]
    #[case("(555) 123-4567", true)]
    #[case("+44 20 7946 0958", true)]
    #[case("123456789012345", true)]
    #[case("12345", false)]
    #[case("1234567890123456", false)]
    #[case("phone", false)]
    fn test_phone(#[case] phone: &str, #[case] valid: bool) {
        assert_eq!(validate_phone(phone).is_valid(), valid);
    }

    #[test]
    fn test_phone_error_kind() {
        assert!(validate_phone("12345").has_kind(ErrorKind::InvalidLength));
    }
}
