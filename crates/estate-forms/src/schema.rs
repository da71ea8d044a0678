// File: src/schema.rs
// Purpose: Per-form rules plugged into the shared reducer

use estate_validation::{FieldValue, FormData, ValidationResult};

use crate::errors::{FieldErrorMap, FormCheck, ValidatorSet};
use crate::images::ImageSet;
use crate::payload::{Endpoint, PayloadBody};

/// What makes one form different from another.
///
/// The reducer in [`crate::state`] drives every form the same way and asks
/// the schema for validators, coercion and the payload shape.
pub trait FormSchema {
    /// Where a valid submission goes.
    fn endpoint(&self) -> Endpoint;

    /// Values the form starts with.
    fn initial_values(&self) -> FormData;

    /// Single-field validators, also used on blur.
    fn validators(&self) -> ValidatorSet;

    /// Rules spanning several fields. Violations must carry their field.
    fn validate_record(&self, _data: &FormData) -> Option<ValidationResult> {
        None
    }

    /// Coercion applied to each change before it is stored.
    fn on_input(&self, _name: &str, value: FieldValue) -> FieldValue {
        value
    }

    /// Builds the body of a submission that already passed validation.
    fn build_payload(&self, data: &FormData, images: &ImageSet) -> PayloadBody;

    fn accepts_images(&self) -> bool {
        false
    }

    /// Banner shown when the server gives no message of its own.
    fn failure_banner(&self) -> &'static str;

    /// Field validators plus record rules, merged into one error map.
    fn validate_all(&self, data: &FormData) -> FormCheck {
        let mut errors = FieldErrorMap::new();
        errors.validate_form(data, &self.validators());
        if let Some(record) = self.validate_record(data) {
            errors.absorb(&record);
        }
        FormCheck {
            is_valid: !errors.has_errors(),
            errors,
        }
    }

    /// Everything known to be wrong with one field.
    fn validate_one(&self, name: &str, data: &FormData) -> ValidationResult {
        let mut violations = Vec::new();
        if let Some(validator) = self.validators().get(name) {
            violations.extend(validator(data.get(name)).errors().iter().cloned());
        }
        if let Some(record) = self.validate_record(data) {
            violations.extend(record.for_field(name).errors().iter().cloned());
        }
        ValidationResult::from_violations(violations)
    }
}
