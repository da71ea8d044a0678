// File: src/errors.rs
// Purpose: Per-field error map and the validate/clear operations forms call

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use estate_validation::{join_messages, FieldValue, FormData, ValidationResult};
use serde::Serialize;
use tracing::debug;

/// Key used for record-level messages that are not tied to a field.
pub const FORM_KEY: &str = "form";

/// A validator bound to one field.
pub type FieldValidator = Arc<dyn Fn(&FieldValue) -> ValidationResult + Send + Sync>;

/// Validators keyed by field name, run in registration order.
#[derive(Clone, Default)]
pub struct ValidatorSet {
    validators: Vec<(String, FieldValidator)>,
}

impl ValidatorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a validator over the raw field value.
    pub fn field<F>(mut self, name: impl Into<String>, validator: F) -> Self
    where
        F: Fn(&FieldValue) -> ValidationResult + Send + Sync + 'static,
    {
        self.validators.push((name.into(), Arc::new(validator)));
        self
    }

    /// Register a text validator; the field value is rendered as text first.
    pub fn text(self, name: impl Into<String>, validator: fn(&str) -> ValidationResult) -> Self {
        self.field(name, move |value| validator(&value.to_string()))
    }

    pub fn get(&self, name: &str) -> Option<&FieldValidator> {
        self.validators.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValidator)> {
        self.validators.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl fmt::Debug for ValidatorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.validators.iter().map(|(n, _)| n)).finish()
    }
}

/// Field names to their current error messages.
///
/// An entry exists only while the latest validation of that field failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrorMap {
    errors: BTreeMap<String, Vec<String>>,
}

/// Outcome of a whole-form validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormCheck {
    pub is_valid: bool,
    pub errors: FieldErrorMap,
}

impl FieldErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs one validator and stores or clears the field's entry.
    pub fn validate_field<F>(&mut self, name: &str, value: &FieldValue, validator: F) -> ValidationResult
    where
        F: Fn(&FieldValue) -> ValidationResult,
    {
        let result = validator(value);
        self.record(name, &result);
        result
    }

    /// Runs every validator against its field and replaces the whole map.
    pub fn validate_form(&mut self, data: &FormData, validators: &ValidatorSet) -> FormCheck {
        let mut fresh = FieldErrorMap::new();
        let mut is_valid = true;

        for (name, validator) in validators.iter() {
            let result = validator(data.get(name));
            if !result.is_valid() {
                is_valid = false;
                fresh.errors.insert(name.to_string(), result.messages());
            }
        }

        debug!(fields = validators.len(), failed = fresh.errors.len(), "validated form");
        *self = fresh;

        FormCheck {
            is_valid,
            errors: self.clone(),
        }
    }

    /// Store a result under `name`: failures replace the entry, success clears it.
    pub fn record(&mut self, name: &str, result: &ValidationResult) {
        if result.is_valid() {
            self.errors.remove(name);
        } else {
            self.errors.insert(name.to_string(), result.messages());
        }
    }

    /// Merge a record-level result, filing each message under its field.
    pub fn absorb(&mut self, result: &ValidationResult) {
        for violation in result.errors() {
            let key = violation.field.as_deref().unwrap_or(FORM_KEY);
            let messages = self.errors.entry(key.to_string()).or_default();
            if !messages.contains(&violation.message) {
                messages.push(violation.message.clone());
            }
        }
    }

    /// Replace a field's entry with a single message.
    pub fn set_error(&mut self, name: &str, message: impl Into<String>) {
        self.errors.insert(name.to_string(), vec![message.into()]);
    }

    pub fn clear_field_error(&mut self, name: &str) {
        self.errors.remove(name);
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    /// True when any field has at least one message.
    pub fn has_errors(&self) -> bool {
        self.errors.values().any(|messages| !messages.is_empty())
    }

    pub fn has_error(&self, name: &str) -> bool {
        self.errors.get(name).map_or(false, |m| !m.is_empty())
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.errors.get(name).map(|m| m.as_slice())
    }

    pub fn first_error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).and_then(|m| m.first()).map(|s| s.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Every message joined into one banner line.
    pub fn summary(&self) -> String {
        join_messages(self.errors.values().flatten())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use estate_validation::{validate_email, validate_phone, ErrorKind, Violations};

    fn login_validators() -> ValidatorSet {
        ValidatorSet::new()
            .text("email", validate_email)
            .text("phone", validate_phone)
    }

    #[test]
    fn test_validate_field_stores_and_clears() {
        let mut errors = FieldErrorMap::new();

        let result = errors.validate_field("email", &"nope".into(), |v| validate_email(&v.to_string()));
        assert!(!result.is_valid());
        assert_eq!(errors.first_error("email"), Some("Please enter a valid email address"));
        assert!(errors.has_errors());

        errors.validate_field("email", &"a@b.io".into(), |v| validate_email(&v.to_string()));
        assert!(!errors.has_error("email"));
        assert!(!errors.has_errors());
    }

    #[test]
    fn test_validate_form_replaces_previous_map() {
        let mut errors = FieldErrorMap::new();
        errors.set_error("stale", "old message");

        let data = FormData::new().with("email", "").with("phone", "123");
        let check = errors.validate_form(&data, &login_validators());

        assert!(!check.is_valid);
        assert!(!errors.has_error("stale"));
        assert_eq!(errors.get("email"), Some(&["Email is required".to_string()][..]));
        assert_eq!(errors.first_error("phone"), Some("Phone number must be between 10 and 15 digits"));
        assert_eq!(check.errors, errors);
    }

    #[test]
    fn test_validate_form_all_valid() {
        let mut errors = FieldErrorMap::new();
        let data = FormData::new().with("email", "agent@estate.com");
        let check = errors.validate_form(&data, &login_validators());
        assert!(check.is_valid);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_absorb_groups_by_field() {
        let mut v = Violations::new();
        v.push_field("title", ErrorKind::RequiredFieldMissing, "Title is required");
        v.push_field("title", ErrorKind::TooShort, "Title must be at least 5 characters long");
        v.push(ErrorKind::FormatError, "Something about the whole record");

        let mut errors = FieldErrorMap::new();
        errors.absorb(&v.finish());

        assert_eq!(errors.get("title").map(|m| m.len()), Some(2));
        assert!(errors.has_error(FORM_KEY));
    }

    #[test]
    fn test_clear_operations() {
        let mut errors = FieldErrorMap::new();
        errors.set_error("email", "bad");
        errors.set_error("password", "bad");

        errors.clear_field_error("email");
        assert!(!errors.has_error("email"));
        assert!(errors.has_errors());

        errors.clear_errors();
        assert!(!errors.has_errors());
    }

    #[test]
    fn test_summary_joins_messages() {
        let mut errors = FieldErrorMap::new();
        errors.set_error("a", "First");
        errors.set_error("b", "Second");
        assert_eq!(errors.summary(), "First. Second");
    }
}
