//! Validation results

use serde::{Deserialize, Serialize};

/// Kinds of validation failure. All of them are recoverable and reported
/// back to the form, never raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    EmptyField,
    FormatError,
    LengthExceeded,
    TooShort,
    InvalidCharacters,
    InvalidLength,
    RequiredFieldMissing,
    OutOfRange,
    InvalidEnumValue,
    RangeInverted,
}

/// One failed rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub kind: ErrorKind,
    pub message: String,
    /// Field the message belongs to, set by record-level validators.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Password strength checks, reported whether or not the password is valid
/// so the form can tick them off as the user types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordRequirements {
    pub has_length: bool,
    pub has_uppercase: bool,
    pub has_lowercase: bool,
    pub has_number: bool,
    pub has_special: bool,
}

impl PasswordRequirements {
    pub fn all_met(&self) -> bool {
        self.has_length && self.has_uppercase && self.has_lowercase && self.has_number && self.has_special
    }

    /// Named checks in display order.
    pub fn entries(&self) -> [(&'static str, bool); 5] {
        [
            ("hasLength", self.has_length),
            ("hasUppercase", self.has_uppercase),
            ("hasLowercase", self.has_lowercase),
            ("hasNumber", self.has_number),
            ("hasSpecial", self.has_special),
        ]
    }
}

/// Outcome of validating a field or a record.
///
/// Built once by a validator and read-only afterwards; `is_valid` always
/// agrees with `errors` being empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    is_valid: bool,
    errors: Vec<Violation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    requirements: Option<PasswordRequirements>,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            requirements: None,
        }
    }

    pub fn from_violations(errors: Vec<Violation>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            requirements: None,
        }
    }

    /// Single-message failure.
    pub fn invalid(kind: ErrorKind, message: impl Into<String>) -> Self {
        let mut violations = Violations::new();
        violations.push(kind, message);
        violations.finish()
    }

    pub fn with_requirements(mut self, requirements: PasswordRequirements) -> Self {
        self.requirements = Some(requirements);
        self
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn errors(&self) -> &[Violation] {
        &self.errors
    }

    /// Error messages in the order the rules ran.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|v| v.message.clone()).collect()
    }

    pub fn first_message(&self) -> Option<&str> {
        self.errors.first().map(|v| v.message.as_str())
    }

    pub fn requirements(&self) -> Option<&PasswordRequirements> {
        self.requirements.as_ref()
    }

    pub fn has_kind(&self, kind: ErrorKind) -> bool {
        self.errors.iter().any(|v| v.kind == kind)
    }

    /// The part of a record-level result that concerns `field`.
    pub fn for_field(&self, field: &str) -> ValidationResult {
        ValidationResult::from_violations(
            self.errors
                .iter()
                .filter(|v| v.field.as_deref() == Some(field))
                .cloned()
                .collect(),
        )
    }
}

/// Accumulator used by validators; every failed rule is kept, none short-circuits.
#[derive(Debug, Default)]
pub struct Violations {
    errors: Vec<Violation>,
}

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: ErrorKind, message: impl Into<String>) {
        self.errors.push(Violation {
            kind,
            message: message.into(),
            field: None,
        });
    }

    pub fn push_field(&mut self, field: &str, kind: ErrorKind, message: impl Into<String>) {
        self.errors.push(Violation {
            kind,
            message: message.into(),
            field: Some(field.to_string()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn finish(self) -> ValidationResult {
        ValidationResult::from_violations(self.errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validity_follows_errors() {
        assert!(ValidationResult::valid().is_valid());
        assert!(ValidationResult::from_violations(Vec::new()).is_valid());

        let failed = ValidationResult::invalid(ErrorKind::EmptyField, "Email is required");
        assert!(!failed.is_valid());
        assert_eq!(failed.messages(), vec!["Email is required"]);
        assert!(failed.has_kind(ErrorKind::EmptyField));
    }

    #[test]
    fn test_for_field_keeps_only_tagged_violations() {
        let mut v = Violations::new();
        v.push_field("title", ErrorKind::RequiredFieldMissing, "Title is required");
        v.push_field("price", ErrorKind::RequiredFieldMissing, "Price is required");
        let result = v.finish();

        let title = result.for_field("title");
        assert_eq!(title.messages(), vec!["Title is required"]);
        assert!(result.for_field("city").is_valid());
    }

    #[test]
    fn test_serializes_camel_case() {
        let result = ValidationResult::invalid(ErrorKind::TooShort, "too short")
            .with_requirements(PasswordRequirements::default());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["isValid"], false);
        assert_eq!(json["errors"][0]["kind"], "too_short");
        assert_eq!(json["requirements"]["hasLength"], false);
    }
}
