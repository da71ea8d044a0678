//! Estate Validation WASM
//!
//! WebAssembly bindings for the CRM validators, so the browser forms run
//! exactly the same rules as the Rust form pipeline.

use std::collections::BTreeMap;

use estate_validation as core;
use estate_validation::{FormData, PasswordRequirements, ValidationResult};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Set panic hook for better error messages in the browser
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Validation result handed to JavaScript.
///
/// `errors` is the flat message list the forms display; record validators
/// also fill `fieldErrors` so each message can sit next to its input.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JsValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub field_errors: BTreeMap<String, Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<PasswordRequirements>,
}

impl From<&ValidationResult> for JsValidation {
    fn from(result: &ValidationResult) -> Self {
        let mut field_errors: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for violation in result.errors() {
            if let Some(field) = &violation.field {
                field_errors
                    .entry(field.clone())
                    .or_default()
                    .push(violation.message.clone());
            }
        }

        Self {
            is_valid: result.is_valid(),
            errors: result.messages(),
            field_errors,
            requirements: result.requirements().copied(),
        }
    }
}

fn to_js(result: &ValidationResult) -> Result<JsValue, JsValue> {
    // Plain objects rather than ES Maps for fieldErrors
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    JsValidation::from(result)
        .serialize(&serializer)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize result: {}", e)))
}

// `undefined` and `null` read as an empty input
fn text(value: Option<String>) -> String {
    value.unwrap_or_default()
}

fn record_from_js(data: JsValue) -> Result<FormData, JsValue> {
    serde_wasm_bindgen::from_value(data).map_err(|e| {
        let message = JsValue::from_str(&format!("Failed to parse form data: {}", e));
        web_sys::console::warn_1(&message);
        message
    })
}

/// # Example (JavaScript)
/// ```javascript
/// const { isValid, errors } = validateEmail(input.value);
/// ```
#[wasm_bindgen(js_name = validateEmail)]
pub fn validate_email_js(value: Option<String>) -> Result<JsValue, JsValue> {
    to_js(&core::validate_email(&text(value)))
}

/// Result carries `requirements` for the strength checklist.
#[wasm_bindgen(js_name = validatePassword)]
pub fn validate_password_js(value: Option<String>) -> Result<JsValue, JsValue> {
    to_js(&core::validate_password(&text(value)))
}

#[wasm_bindgen(js_name = validateName)]
pub fn validate_name_js(value: Option<String>, label: Option<String>) -> Result<JsValue, JsValue> {
    let label = label.unwrap_or_else(|| "Name".to_string());
    to_js(&core::validate_name(&text(value), &label))
}

#[wasm_bindgen(js_name = validatePhone)]
pub fn validate_phone_js(value: Option<String>) -> Result<JsValue, JsValue> {
    to_js(&core::validate_phone(&text(value)))
}

/// Validate a whole property object, e.g. `validateProperty({ title, price, ... })`.
#[wasm_bindgen(js_name = validateProperty)]
pub fn validate_property_js(data: JsValue) -> Result<JsValue, JsValue> {
    to_js(&core::validate_property(&record_from_js(data)?))
}

#[wasm_bindgen(js_name = validateLead)]
pub fn validate_lead_js(data: JsValue) -> Result<JsValue, JsValue> {
    to_js(&core::validate_lead(&record_from_js(data)?))
}

/// Quick email validation
#[wasm_bindgen(js_name = isValidEmail)]
pub fn is_valid_email_js(email: Option<String>) -> bool {
    core::is_valid_email(&text(email))
}

#[wasm_bindgen(js_name = isValidPassword)]
pub fn is_valid_password_js(password: Option<String>) -> bool {
    core::is_valid_password(&text(password))
}

#[wasm_bindgen(js_name = isValidName)]
pub fn is_valid_name_js(name: Option<String>) -> bool {
    core::is_valid_name(&text(name))
}

/// Joins messages for a banner: `["A", "B"]` becomes `"A. B"`.
#[wasm_bindgen(js_name = formatValidationErrors)]
pub fn format_validation_errors_js(messages: Vec<String>) -> String {
    core::join_messages(messages)
}
