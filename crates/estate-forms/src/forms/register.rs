use estate_validation::{
    validate_email, validate_name, validate_password, validate_phone, ErrorKind, FormData, ValidationResult,
    Violations,
};
use serde_json::{json, Value};

use super::blank_record;
use crate::coercion::optional_text;
use crate::errors::ValidatorSet;
use crate::images::ImageSet;
use crate::payload::{field_to_json, Endpoint, PayloadBody};
use crate::schema::FormSchema;

pub const DEFAULT_USER_TYPE: &str = "client";

const FIELDS: &[&str] = &["name", "email", "password", "confirm_password", "phone"];

/// Account sign-up.
#[derive(Debug, Clone)]
pub struct RegisterForm {
    user_type: String,
}

impl RegisterForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sign-up for a different account type, e.g. `agent`.
    pub fn with_user_type(user_type: impl Into<String>) -> Self {
        Self {
            user_type: user_type.into(),
        }
    }

    pub fn user_type(&self) -> &str {
        &self.user_type
    }
}

impl Default for RegisterForm {
    fn default() -> Self {
        Self::with_user_type(DEFAULT_USER_TYPE)
    }
}

impl FormSchema for RegisterForm {
    fn endpoint(&self) -> Endpoint {
        Endpoint::Register
    }

    fn initial_values(&self) -> FormData {
        blank_record(FIELDS)
    }

    fn validators(&self) -> ValidatorSet {
        ValidatorSet::new()
            .field("name", |value| validate_name(&value.to_string(), "Name"))
            .text("email", validate_email)
            .text("password", validate_password)
            .text("phone", validate_phone)
    }

    fn validate_record(&self, data: &FormData) -> Option<ValidationResult> {
        let mut errors = Violations::new();
        if data.text("confirm_password") != data.text("password") {
            errors.push_field("confirm_password", ErrorKind::FormatError, "Passwords do not match");
        }
        Some(errors.finish())
    }

    fn build_payload(&self, data: &FormData, _images: &ImageSet) -> PayloadBody {
        let body: Value = json!({
            "name": data.text("name").trim(),
            "email": data.text("email").trim(),
            "password": data.text("password"),
            "user_type": self.user_type,
            "phone": field_to_json(&optional_text(data.get("phone"))),
        });
        PayloadBody::Json(body)
    }

    fn failure_banner(&self) -> &'static str {
        "An error occurred during registration. Please try again."
    }
}
