//! Name validation functions

use crate::result::{ErrorKind, ValidationResult, Violations};
use crate::string::{char_len, NAME_CHARS};

/// Validates a person name. `label` only changes the wording of messages.
pub fn validate_name(name: &str, label: &str) -> ValidationResult {
    let mut errors = Violations::new();
    let trimmed = name.trim();

    if trimmed.is_empty() {
        errors.push(ErrorKind::EmptyField, format!("{} is required", label));
        return errors.finish();
    }

    if char_len(trimmed) < 2 {
        errors.push(ErrorKind::TooShort, format!("{} must be at least 2 characters long", label));
    }

    if char_len(trimmed) > 100 {
        errors.push(ErrorKind::LengthExceeded, format!("{} must be less than 100 characters", label));
    }

    if !NAME_CHARS.is_match(trimmed) {
        errors.push(
            ErrorKind::InvalidCharacters,
            format!("{} can only contain letters, spaces, hyphens, and apostrophes", label),
        );
    }

    errors.finish()
}

pub fn is_valid_name(name: &str) -> bool {
    validate_name(name, "Name").is_valid()
}
