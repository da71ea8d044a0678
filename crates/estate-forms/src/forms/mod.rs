// File: src/forms/mod.rs
// Purpose: The four CRM forms expressed as schemas

mod lead;
mod login;
mod property;
mod register;

pub use lead::{LeadForm, LEAD_SOURCES, LEAD_STATUSES};
pub use login::LoginForm;
pub use property::{PropertyForm, PROPERTY_STATUSES, PROPERTY_TYPES};
pub use register::RegisterForm;

use estate_validation::{FieldValue, FormData};
use serde_json::{Map, Value};

use crate::payload::field_to_json;

/// JSON object holding only `keys`, in that order.
pub(crate) fn pick_json(data: &FormData, keys: &[&str]) -> Value {
    let object: Map<String, Value> = keys
        .iter()
        .map(|key| (key.to_string(), field_to_json(data.get(key))))
        .collect();
    Value::Object(object)
}

/// Starting record with every listed field set to empty text.
pub(crate) fn blank_record(keys: &[&str]) -> FormData {
    keys.iter().map(|key| (*key, FieldValue::from(""))).collect()
}
