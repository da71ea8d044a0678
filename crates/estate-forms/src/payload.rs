// File: src/payload.rs
// Purpose: Submission-ready bodies built from coerced form data

use estate_validation::{FieldValue, FormData};
use serde_json::{Map, Number, Value};

use crate::images::{ImageFile, ImageSet};

/// REST resources the forms post to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Login,
    Register,
    Properties,
    Leads,
}

impl Endpoint {
    /// Path relative to the API base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Login => "/auth/login",
            Endpoint::Register => "/auth/register",
            Endpoint::Properties => "/properties/",
            Endpoint::Leads => "/leads/",
        }
    }

    /// Whether the request carries the bearer token.
    pub fn requires_auth(&self) -> bool {
        matches!(self, Endpoint::Properties | Endpoint::Leads)
    }
}

/// Multipart body: text parts plus one `images` part per file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartBody {
    pub fields: Vec<(String, String)>,
    pub images: Vec<ImageFile>,
}

impl MultipartBody {
    pub const IMAGE_PART: &'static str = "images";

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PayloadBody {
    Json(Value),
    Multipart(MultipartBody),
}

impl PayloadBody {
    /// JSON when there are no images, multipart otherwise.
    pub fn from_record(data: &FormData, images: &ImageSet) -> Self {
        if images.is_empty() {
            PayloadBody::Json(to_json(data))
        } else {
            PayloadBody::Multipart(to_multipart(data, images))
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            PayloadBody::Json(value) => Some(value),
            PayloadBody::Multipart(_) => None,
        }
    }

    pub fn as_multipart(&self) -> Option<&MultipartBody> {
        match self {
            PayloadBody::Multipart(body) => Some(body),
            PayloadBody::Json(_) => None,
        }
    }
}

/// One submit attempt: where it goes and what it carries.
#[derive(Debug, Clone, PartialEq)]
pub struct FormPayload {
    pub endpoint: Endpoint,
    pub body: PayloadBody,
}

impl FormPayload {
    pub fn new(endpoint: Endpoint, body: PayloadBody) -> Self {
        Self { endpoint, body }
    }
}

pub fn field_to_json(value: &FieldValue) -> Value {
    match value {
        FieldValue::Null => Value::Null,
        FieldValue::Bool(b) => Value::Bool(*b),
        FieldValue::Int(n) => Value::Number((*n).into()),
        FieldValue::Float(n) => Number::from_f64(*n).map(Value::Number).unwrap_or(Value::Null),
        FieldValue::Text(s) => Value::String(s.clone()),
    }
}

pub fn to_json(data: &FormData) -> Value {
    let object: Map<String, Value> = data
        .iter()
        .map(|(name, value)| (name.to_string(), field_to_json(value)))
        .collect();
    Value::Object(object)
}

/// Null fields are left out; everything else is sent as its text form.
pub fn to_multipart(data: &FormData, images: &ImageSet) -> MultipartBody {
    let fields = data
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();
    MultipartBody {
        fields,
        images: images.files().cloned().collect(),
    }
}
