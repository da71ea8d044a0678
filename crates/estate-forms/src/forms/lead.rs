use estate_validation::string::is_one_of;
use estate_validation::{parse_number, validate_lead, ErrorKind, FieldValue, FormData, ValidationResult, Violations};

use super::blank_record;
use super::property::PROPERTY_TYPES;
use crate::coercion::{coerce_on_submit, optional_text, NumericKind};
use crate::errors::ValidatorSet;
use crate::images::ImageSet;
use crate::payload::{to_json, Endpoint, PayloadBody};
use crate::schema::FormSchema;

pub const LEAD_STATUSES: &[&str] = &[
    "new",
    "contacted",
    "in_progress",
    "qualified",
    "unqualified",
    "converted",
    "lost",
];

pub const LEAD_SOURCES: &[&str] = &[
    "website",
    "referral",
    "social_media",
    "phone_call",
    "walk_in",
    "advertisement",
    "other",
];

const FIELDS: &[&str] = &[
    "user_id",
    "property_id",
    "assigned_agent_id",
    "source",
    "notes",
    "budget_min",
    "budget_max",
    "preferred_contact",
    "preferred_contact_time",
    "desired_location",
    "desired_property_type",
    "desired_bedrooms",
    "desired_bathrooms",
];

/// Lead capture. Agents pick the client; a client files leads for themselves.
///
/// Numbers stay as typed until submit, where they are parsed and anything
/// empty or unreadable is sent as null.
#[derive(Debug, Clone, Default)]
pub struct LeadForm {
    client_id: Option<i64>,
}

impl LeadForm {
    pub fn for_agent() -> Self {
        Self { client_id: None }
    }

    pub fn for_client(client_id: i64) -> Self {
        Self {
            client_id: Some(client_id),
        }
    }

    pub fn is_client(&self) -> bool {
        self.client_id.is_some()
    }

    fn numeric_kind(name: &str) -> Option<NumericKind> {
        match name {
            "budget_min" | "budget_max" | "desired_bathrooms" => Some(NumericKind::Float),
            "desired_bedrooms" | "user_id" | "property_id" | "assigned_agent_id" => Some(NumericKind::Int),
            _ => None,
        }
    }
}

fn check_non_negative(data: &FormData, key: &str, message: &str, errors: &mut Violations) {
    let value = data.get(key);
    if !value.is_truthy() {
        return;
    }
    // Whole-string conversion: "3abc" is not a bedroom count
    let number = match value {
        FieldValue::Text(text) => parse_number(text),
        other => other.to_number(),
    };
    match number {
        Some(n) if n >= 0.0 => {}
        Some(_) => errors.push_field(key, ErrorKind::OutOfRange, message),
        None => errors.push_field(key, ErrorKind::FormatError, message),
    }
}

fn check_choice(data: &FormData, key: &str, allowed: &[&str], message: &str, errors: &mut Violations) {
    let value = data.get(key);
    if value.is_truthy() && !is_one_of(&value.to_string(), allowed) {
        errors.push_field(key, ErrorKind::InvalidEnumValue, message);
    }
}

impl FormSchema for LeadForm {
    fn endpoint(&self) -> Endpoint {
        Endpoint::Leads
    }

    fn initial_values(&self) -> FormData {
        let values = blank_record(FIELDS).with("status", "new");
        match self.client_id {
            Some(id) => values.with("user_id", id),
            None => values,
        }
    }

    fn validators(&self) -> ValidatorSet {
        ValidatorSet::new()
    }

    fn validate_record(&self, data: &FormData) -> Option<ValidationResult> {
        let mut errors = Violations::new();

        if !self.is_client() && !data.get("user_id").is_truthy() {
            errors.push_field("user_id", ErrorKind::RequiredFieldMissing, "Client is required");
        }

        check_non_negative(data, "desired_bedrooms", "Bedrooms must be a positive number", &mut errors);
        check_non_negative(data, "desired_bathrooms", "Bathrooms must be a positive number", &mut errors);
        check_choice(data, "status", LEAD_STATUSES, "Invalid lead status", &mut errors);
        check_choice(data, "source", LEAD_SOURCES, "Invalid lead source", &mut errors);
        check_choice(data, "desired_property_type", PROPERTY_TYPES, "Invalid property type", &mut errors);

        let mut violations = validate_lead(data).errors().to_vec();
        violations.extend(errors.finish().errors().iter().cloned());
        Some(ValidationResult::from_violations(violations))
    }

    fn build_payload(&self, data: &FormData, _images: &ImageSet) -> PayloadBody {
        let mut coerced: FormData = data
            .iter()
            .map(|(name, value)| {
                let value = match Self::numeric_kind(name) {
                    Some(kind) => coerce_on_submit(value, kind),
                    None => optional_text(value),
                };
                (name, value)
            })
            .collect();

        if let Some(id) = self.client_id {
            coerced.set("user_id", id);
        }
        PayloadBody::Json(to_json(&coerced))
    }

    fn failure_banner(&self) -> &'static str {
        "An error occurred while saving the lead"
    }
}
