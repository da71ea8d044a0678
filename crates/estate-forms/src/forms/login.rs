use estate_validation::{validate_email, ErrorKind, FieldValue, FormData, ValidationResult};

use super::{blank_record, pick_json};
use crate::errors::ValidatorSet;
use crate::images::ImageSet;
use crate::payload::{Endpoint, PayloadBody};
use crate::schema::FormSchema;

/// Email and password sign-in.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoginForm;

const FIELDS: &[&str] = &["email", "password"];

fn password_present(value: &FieldValue) -> ValidationResult {
    if value.is_blank() {
        ValidationResult::invalid(ErrorKind::EmptyField, "Please enter your password")
    } else {
        ValidationResult::valid()
    }
}

impl FormSchema for LoginForm {
    fn endpoint(&self) -> Endpoint {
        Endpoint::Login
    }

    fn initial_values(&self) -> FormData {
        blank_record(FIELDS)
    }

    fn validators(&self) -> ValidatorSet {
        ValidatorSet::new()
            .text("email", validate_email)
            .field("password", password_present)
    }

    fn build_payload(&self, data: &FormData, _images: &ImageSet) -> PayloadBody {
        PayloadBody::Json(pick_json(data, FIELDS))
    }

    fn failure_banner(&self) -> &'static str {
        "Login failed"
    }
}
