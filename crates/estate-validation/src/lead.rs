//! Lead record validation

use crate::result::{ErrorKind, ValidationResult, Violations};
use crate::string::is_one_of;
use crate::value::FormData;

pub const CONTACT_METHODS: &[&str] = &["email", "phone", "text", "any"];
pub const CONTACT_TIMES: &[&str] = &["morning", "afternoon", "evening", "any"];

/// Validates budget range and contact preferences of a lead record.
///
/// Budget checks only run when both bounds are present. Once both parse,
/// the sign check and the ordering check report independently.
pub fn validate_lead(data: &FormData) -> ValidationResult {
    let mut errors = Violations::new();

    let min = data.get("budget_min");
    let max = data.get("budget_max");
    if min.is_truthy() && max.is_truthy() {
        match (min.to_number(), max.to_number()) {
            (Some(min), Some(max)) => {
                if min < 0.0 || max < 0.0 {
                    errors.push_field("budget_min", ErrorKind::OutOfRange, "Budget values cannot be negative");
                }
                if min > max {
                    errors.push_field(
                        "budget_min",
                        ErrorKind::RangeInverted,
                        "Minimum budget cannot be greater than maximum budget",
                    );
                }
            }
            _ => errors.push_field("budget_min", ErrorKind::FormatError, "Budget values must be valid numbers"),
        }
    }

    let contact = data.get("preferred_contact");
    if contact.is_truthy() && !is_one_of(&contact.to_string(), CONTACT_METHODS) {
        errors.push_field("preferred_contact", ErrorKind::InvalidEnumValue, "Invalid contact preference");
    }

    let time = data.get("preferred_contact_time");
    if time.is_truthy() && !is_one_of(&time.to_string(), CONTACT_TIMES) {
        errors.push_field(
            "preferred_contact_time",
            ErrorKind::InvalidEnumValue,
            "Invalid contact time preference",
        );
    }

    errors.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_in_order_is_valid() {
        let data = FormData::new().with("budget_min", 300000).with("budget_max", 500000);
        assert!(validate_lead(&data).is_valid());
    }

    #[test]
    fn test_budget_inverted() {
        let data = FormData::new().with("budget_min", 500000).with("budget_max", 300000);
        let result = validate_lead(&data);
        assert!(!result.is_valid());
        assert!(result.has_kind(ErrorKind::RangeInverted));
        assert_eq!(result.for_field("budget_min").errors().len(), 1);
    }

    #[test]
    fn test_negative_and_inverted_both_reported() {
        let data = FormData::new().with("budget_min", "10").with("budget_max", "-5");
        let result = validate_lead(&data);
        assert_eq!(
            result.messages(),
            vec![
                "Budget values cannot be negative",
                "Minimum budget cannot be greater than maximum budget",
            ]
        );
    }

    #[test]
    fn test_unparsable_budget() {
        let data = FormData::new().with("budget_min", "cheap").with("budget_max", "500000");
        let result = validate_lead(&data);
        assert_eq!(result.messages(), vec!["Budget values must be valid numbers"]);
        assert!(result.has_kind(ErrorKind::FormatError));
    }

    #[test]
    fn test_single_budget_is_not_checked() {
        let data = FormData::new().with("budget_min", "-100");
        assert!(validate_lead(&data).is_valid());
    }

    #[test]
    fn test_contact_enums() {
        let data = FormData::new()
            .with("preferred_contact", "fax")
            .with("preferred_contact_time", "midnight");
        let result = validate_lead(&data);
        assert_eq!(
            result.messages(),
            vec!["Invalid contact preference", "Invalid contact time preference"]
        );
        assert!(result.errors().iter().all(|v| v.kind == ErrorKind::InvalidEnumValue));

        let ok = FormData::new()
            .with("preferred_contact", "text")
            .with("preferred_contact_time", "any");
        assert!(validate_lead(&ok).is_valid());
    }
}
