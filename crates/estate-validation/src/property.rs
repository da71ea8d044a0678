//! Property record validation

use crate::result::{ErrorKind, ValidationResult, Violations};
use crate::string::{char_len, NAME_CHARS, ZIP_CHARS};
use crate::value::FormData;

/// Fields every property must carry, with their display labels.
pub const REQUIRED_PROPERTY_FIELDS: &[(&str, &str)] = &[
    ("title", "Title"),
    ("property_type", "Property Type"),
    ("price", "Price"),
    ("address", "Address"),
    ("city", "City"),
    ("state", "State"),
    ("zip_code", "Zip Code"),
];

pub const PRICE_MAX: f64 = 999_999_999.0;

/// Bounds for one optional numeric property field.
#[derive(Debug, Clone, Copy)]
pub struct NumericLimit {
    pub key: &'static str,
    pub label: &'static str,
    pub min: Option<f64>,
    pub max: f64,
}

pub const PROPERTY_NUMERIC_LIMITS: &[NumericLimit] = &[
    NumericLimit { key: "bedrooms", label: "Bedrooms", min: None, max: 50.0 },
    NumericLimit { key: "bathrooms", label: "Bathrooms", min: None, max: 20.0 },
    NumericLimit { key: "square_feet", label: "Square Feet", min: None, max: 999_999.0 },
    NumericLimit { key: "lot_size", label: "Lot Size", min: None, max: 999_999.0 },
    NumericLimit { key: "year_built", label: "Year Built", min: Some(1800.0), max: 2030.0 },
    NumericLimit { key: "parking_spaces", label: "Parking Spaces", min: None, max: 50.0 },
];

/// Validates a whole property record.
///
/// Every rule runs; each violation is tagged with the field it belongs to.
/// Conditional rules only look at fields that are present.
pub fn validate_property(data: &FormData) -> ValidationResult {
    let mut errors = Violations::new();

    for (key, label) in REQUIRED_PROPERTY_FIELDS {
        if data.get(key).is_blank() {
            errors.push_field(key, ErrorKind::RequiredFieldMissing, format!("{} is required", label));
        }
    }

    let title = data.get("title");
    if title.is_truthy() {
        let title = title.to_string();
        if char_len(title.trim()) < 5 {
            errors.push_field("title", ErrorKind::TooShort, "Title must be at least 5 characters long");
        }
        if char_len(&title) > 200 {
            errors.push_field("title", ErrorKind::LengthExceeded, "Title must be less than 200 characters");
        }
    }

    let price = data.get("price");
    if price.is_truthy() {
        match price.to_number() {
            None => errors.push_field("price", ErrorKind::FormatError, "Price must be a valid positive number"),
            Some(p) if p <= 0.0 => {
                errors.push_field("price", ErrorKind::OutOfRange, "Price must be a valid positive number")
            }
            Some(p) if p > PRICE_MAX => errors.push_field("price", ErrorKind::OutOfRange, "Price is too high"),
            Some(_) => {}
        }
    }

    let address = data.get("address");
    if address.is_truthy() && char_len(&address.to_string()) > 255 {
        errors.push_field("address", ErrorKind::LengthExceeded, "Address must be less than 255 characters");
    }

    let city = data.get("city");
    if city.is_truthy() {
        let city = city.to_string();
        if char_len(&city) > 100 {
            errors.push_field("city", ErrorKind::LengthExceeded, "City must be less than 100 characters");
        }
        if !NAME_CHARS.is_match(&city) {
            errors.push_field(
                "city",
                ErrorKind::InvalidCharacters,
                "City can only contain letters, spaces, hyphens, and apostrophes",
            );
        }
    }

    let state = data.get("state");
    if state.is_truthy() && char_len(&state.to_string()) > 100 {
        errors.push_field("state", ErrorKind::LengthExceeded, "State must be less than 100 characters");
    }

    let zip = data.get("zip_code");
    if zip.is_truthy() {
        let zip = zip.to_string();
        if !ZIP_CHARS.is_match(&zip) {
            errors.push_field(
                "zip_code",
                ErrorKind::InvalidCharacters,
                "Zip code can only contain numbers, hyphens, and spaces",
            );
        }
        if char_len(&zip) > 20 {
            errors.push_field("zip_code", ErrorKind::LengthExceeded, "Zip code must be less than 20 characters");
        }
    }

    for limit in PROPERTY_NUMERIC_LIMITS {
        check_numeric_limit(data, limit, &mut errors);
    }

    errors.finish()
}

fn check_numeric_limit(data: &FormData, limit: &NumericLimit, errors: &mut Violations) {
    let value = data.get(limit.key);
    if !value.is_supplied() {
        return;
    }

    let number = match value.to_number() {
        Some(n) if n >= 0.0 => n,
        parsed => {
            let kind = if parsed.is_some() { ErrorKind::OutOfRange } else { ErrorKind::FormatError };
            errors.push_field(limit.key, kind, format!("{} must be a valid positive number", limit.label));
            return;
        }
    };

    if let Some(min) = limit.min {
        if number < min {
            errors.push_field(limit.key, ErrorKind::OutOfRange, format!("{} must be at least {}", limit.label, min));
        }
    }
    if number > limit.max {
        errors.push_field(limit.key, ErrorKind::OutOfRange, format!("{} cannot exceed {}", limit.label, limit.max));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::FieldValue;
    use pretty_assertions::assert_eq;

    fn complete_property() -> FormData {
        FormData::new()
            .with("title", "Sunny family home")
            .with("property_type", "townhouse")
            .with("price", "250000.50")
            .with("address", "12 Elm Street")
            .with("city", "Springfield")
            .with("state", "IL")
            .with("zip_code", "62701")
    }

    #[test]
    fn test_complete_property_is_valid() {
        let result = validate_property(&complete_property());
        assert!(result.is_valid(), "{:?}", result.messages());
    }

    #[test]
    fn test_missing_title() {
        let data = complete_property().with("title", "");
        let result = validate_property(&data);
        assert!(!result.is_valid());
        assert_eq!(result.for_field("title").messages(), vec!["Title is required"]);
    }

    #[test]
    fn test_every_missing_field_reported() {
        let result = validate_property(&FormData::new());
        assert_eq!(
            result.messages(),
            vec![
                "Title is required",
                "Property Type is required",
                "Price is required",
                "Address is required",
                "City is required",
                "State is required",
                "Zip Code is required",
            ]
        );
        assert!(result.errors().iter().all(|v| v.kind == ErrorKind::RequiredFieldMissing));
    }

    #[test]
    fn test_zero_price_counts_as_missing() {
        let data = complete_property().with("price", 0);
        let result = validate_property(&data);
        assert_eq!(result.messages(), vec!["Price is required"]);
    }

    #[test]
    fn test_price_rules() {
        let negative = validate_property(&complete_property().with("price", "-5"));
        assert_eq!(negative.messages(), vec!["Price must be a valid positive number"]);

        let garbage = validate_property(&complete_property().with("price", "lots"));
        assert!(garbage.has_kind(ErrorKind::FormatError));

        let huge = validate_property(&complete_property().with("price", FieldValue::Float(1e10)));
        assert_eq!(huge.messages(), vec!["Price is too high"]);
    }

    #[test]
    fn test_rules_do_not_short_circuit() {
        let data = complete_property()
            .with("title", "Hut")
            .with("city", "Area 51")
            .with("zip_code", "ABC")
            .with("bedrooms", "-1")
            .with("year_built", 1700);
        let result = validate_property(&data);
        assert_eq!(
            result.messages(),
            vec![
                "Title must be at least 5 characters long",
                "City can only contain letters, spaces, hyphens, and apostrophes",
                "Zip code can only contain numbers, hyphens, and spaces",
                "Bedrooms must be a valid positive number",
                "Year Built must be at least 1800",
            ]
        );
    }

    #[test]
    fn test_numeric_limits() {
        let data = complete_property()
            .with("bathrooms", 21)
            .with("square_feet", FieldValue::Float(1_000_000.0))
            .with("parking_spaces", "51")
            .with("year_built", 2031);
        let result = validate_property(&data);
        assert_eq!(
            result.messages(),
            vec![
                "Bathrooms cannot exceed 20",
                "Square Feet cannot exceed 999999",
                "Year Built cannot exceed 2030",
                "Parking Spaces cannot exceed 50",
            ]
        );
    }

    #[test]
    fn test_unsupplied_numeric_fields_are_skipped() {
        let data = complete_property()
            .with("bedrooms", "")
            .with("lot_size", FieldValue::Null)
            .with("parking_spaces", 0);
        assert!(validate_property(&data).is_valid());
    }

    #[test]
    fn test_length_limits() {
        let data = complete_property()
            .with("title", "t".repeat(201))
            .with("address", "a".repeat(256))
            .with("state", "s".repeat(101))
            .with("zip_code", "1".repeat(21));
        let result = validate_property(&data);
        assert_eq!(result.errors().len(), 4);
        assert!(result.errors().iter().all(|v| v.kind == ErrorKind::LengthExceeded));
    }

    #[test]
    fn test_idempotent() {
        let data = complete_property().with("title", "");
        assert_eq!(validate_property(&data), validate_property(&data));
    }
}
