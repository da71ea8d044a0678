//! Email validation functions

use once_cell::sync::Lazy;
use regex::Regex;

use crate::result::{ErrorKind, ValidationResult, Violations};
use crate::string::char_len;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
});

pub const EMAIL_MAX_LENGTH: usize = 120;

/// Validates an email address.
///
/// An empty value only reports that the email is required. Otherwise the
/// format and length rules both run and both report.
pub fn validate_email(email: &str) -> ValidationResult {
    let mut errors = Violations::new();

    if email.is_empty() {
        errors.push(ErrorKind::EmptyField, "Email is required");
        return errors.finish();
    }

    if !EMAIL_REGEX.is_match(email) {
        errors.push(ErrorKind::FormatError, "Please enter a valid email address");
    }

    if char_len(email) > EMAIL_MAX_LENGTH {
        errors.push(ErrorKind::LengthExceeded, "Email must be less than 120 characters");
    }

    errors.finish()
}

pub fn is_valid_email(email: &str) -> bool {
    validate_email(email).is_valid()
}
