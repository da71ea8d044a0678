use chrono::{Datelike, Utc};
use estate_validation::string::is_one_of;
use estate_validation::{validate_property, ErrorKind, FieldValue, FormData, ValidationResult, Violation, Violations};

use super::blank_record;
use crate::coercion::{coerce_on_input, optional_text, NumericKind};
use crate::errors::ValidatorSet;
use crate::images::ImageSet;
use crate::payload::{Endpoint, PayloadBody};
use crate::schema::FormSchema;

pub const PROPERTY_TYPES: &[&str] = &[
    "townhouse",
    "condominium",
    "apartment",
    "retail",
    "shopping_centre",
    "restaurant",
    "hospital",
    "warehouse",
    "factory",
    "farmland",
    "raw_land",
];

pub const PROPERTY_STATUSES: &[&str] = &["active", "pending", "sold", "withdrawn"];

const TEXT_FIELDS: &[&str] = &[
    "title",
    "description",
    "property_type",
    "price",
    "address",
    "city",
    "state",
    "zip_code",
    "latitude",
    "longitude",
    "bedrooms",
    "bathrooms",
    "square_feet",
    "lot_size",
    "year_built",
    "parking_spaces",
    "features",
    "amenities",
];

const INT_FIELDS: &[&str] = &["bedrooms", "year_built", "parking_spaces"];
const FLOAT_FIELDS: &[&str] = &["price", "bathrooms", "square_feet", "lot_size", "latitude", "longitude"];

/// Property listing editor. Numbers are coerced as the user types.
#[derive(Debug, Clone)]
pub struct PropertyForm {
    current_year: i32,
}

impl PropertyForm {
    pub fn new() -> Self {
        Self {
            current_year: Utc::now().year(),
        }
    }

    /// Pins the year used as the `year_built` ceiling.
    pub fn with_current_year(current_year: i32) -> Self {
        Self { current_year }
    }

    fn numeric_kind(name: &str) -> Option<NumericKind> {
        if INT_FIELDS.contains(&name) {
            Some(NumericKind::Int)
        } else if FLOAT_FIELDS.contains(&name) {
            Some(NumericKind::Float)
        } else {
            None
        }
    }
}

impl Default for PropertyForm {
    fn default() -> Self {
        Self::new()
    }
}

fn check_coordinate(data: &FormData, key: &str, limit: f64, message: &str, errors: &mut Violations) {
    let value = data.get(key);
    if !value.is_truthy() {
        return;
    }
    match value.to_number() {
        Some(n) if (-limit..=limit).contains(&n) => {}
        Some(_) => errors.push_field(key, ErrorKind::OutOfRange, message),
        None => errors.push_field(key, ErrorKind::FormatError, message),
    }
}

impl FormSchema for PropertyForm {
    fn endpoint(&self) -> Endpoint {
        Endpoint::Properties
    }

    fn initial_values(&self) -> FormData {
        blank_record(TEXT_FIELDS)
            .with("status", "active")
            .with("is_featured", false)
    }

    fn validators(&self) -> ValidatorSet {
        ValidatorSet::new()
    }

    fn validate_record(&self, data: &FormData) -> Option<ValidationResult> {
        let mut errors = Violations::new();

        let property_type = data.get("property_type");
        if property_type.is_truthy() && !is_one_of(&property_type.to_string(), PROPERTY_TYPES) {
            errors.push_field("property_type", ErrorKind::InvalidEnumValue, "Invalid property type");
        }

        let status = data.get("status");
        if status.is_truthy() && !is_one_of(&status.to_string(), PROPERTY_STATUSES) {
            errors.push_field("status", ErrorKind::InvalidEnumValue, "Invalid status");
        }

        check_coordinate(data, "latitude", 90.0, "Latitude must be between -90 and 90", &mut errors);
        check_coordinate(data, "longitude", 180.0, "Longitude must be between -180 and 180", &mut errors);

        // The table allows up to 2030; a listing cannot be built in the future
        let year = data.get("year_built");
        if year.is_truthy() {
            if let Some(y) = year.to_number() {
                if (1800.0..=2030.0).contains(&y) && y > f64::from(self.current_year) {
                    errors.push_field("year_built", ErrorKind::OutOfRange, "Please enter a valid year");
                }
            }
        }

        let mut violations: Vec<Violation> = validate_property(data).errors().to_vec();
        violations.extend(errors.finish().errors().iter().cloned());
        Some(ValidationResult::from_violations(violations))
    }

    fn on_input(&self, name: &str, value: FieldValue) -> FieldValue {
        match Self::numeric_kind(name) {
            Some(kind) => coerce_on_input(value, kind),
            None => value,
        }
    }

    fn build_payload(&self, data: &FormData, images: &ImageSet) -> PayloadBody {
        let pruned: FormData = data.iter().map(|(name, value)| (name, optional_text(value))).collect();
        PayloadBody::from_record(&pruned, images)
    }

    fn accepts_images(&self) -> bool {
        true
    }

    fn failure_banner(&self) -> &'static str {
        "An error occurred while saving the property"
    }
}
