//! Property tests for the validators
//!
//! Each validator is checked against an independent statement of its rule
//! over generated input, plus the fixed record scenarios the forms rely on.

use estate_validation::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use regex::Regex;

const SPECIALS: &str = "!@#$%^&*(),.?\":{}|<>";

fn email_pattern() -> Regex {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
}

fn email_input() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9._%+@ -]{0,30}",
        "[a-z0-9._%+-]{1,90}@[a-z0-9.-]{1,40}\\.[a-zA-Z]{1,6}",
    ]
}

proptest! {
    #[test]
    fn password_valid_iff_all_rules_hold(p in "[ -~]{0,140}") {
        let len = p.chars().count();
        let expected = (8..=128).contains(&len)
            && p.chars().any(|c| c.is_ascii_uppercase())
            && p.chars().any(|c| c.is_ascii_lowercase())
            && p.chars().any(|c| c.is_ascii_digit())
            && p.chars().any(|c| SPECIALS.contains(c));
        prop_assert_eq!(validate_password(&p).is_valid(), expected);
    }

    #[test]
    fn email_valid_iff_pattern_and_length(e in email_input()) {
        let expected = email_pattern().is_match(&e) && e.chars().count() <= 120;
        prop_assert_eq!(validate_email(&e).is_valid(), expected);
    }

    #[test]
    fn phone_valid_iff_empty_or_digit_count(s in "[0-9 ()+.-]{0,24}") {
        let digits = s.chars().filter(|c| c.is_ascii_digit()).count();
        let expected = s.is_empty() || (10..=15).contains(&digits);
        prop_assert_eq!(validate_phone(&s).is_valid(), expected);
    }

    #[test]
    fn validators_are_pure(s in "[ -~]{0,60}") {
        prop_assert_eq!(validate_email(&s), validate_email(&s));
        prop_assert_eq!(validate_password(&s), validate_password(&s));
        prop_assert_eq!(validate_name(&s, "Name"), validate_name(&s, "Name"));
        prop_assert_eq!(validate_phone(&s), validate_phone(&s));
    }
}

fn complete_property() -> FormData {
    FormData::new()
        .with("title", "Harbour View Loft")
        .with("property_type", "apartment")
        .with("price", "250000.50")
        .with("address", "12 Quay Street")
        .with("city", "Auckland")
        .with("state", "Auckland")
        .with("zip_code", "1010")
}

#[test]
fn test_property_without_title() {
    let mut data = complete_property();
    data.set("title", "");
    let result = validate_property(&data);

    assert!(!result.is_valid());
    assert!(result.messages().contains(&"Title is required".to_string()));
    assert_eq!(result.for_field("title").messages(), vec!["Title is required"]);
}

#[test]
fn test_property_records_are_validated_the_same_twice() {
    let data = complete_property().with("bedrooms", "-2");
    assert_eq!(validate_property(&data), validate_property(&data));
}

#[test]
fn test_lead_budget_order() {
    let inverted = FormData::new().with("budget_min", 500000).with("budget_max", 300000);
    let result = validate_lead(&inverted);
    assert!(!result.is_valid());
    assert!(result.has_kind(ErrorKind::RangeInverted));

    let ordered = FormData::new().with("budget_min", 300000).with("budget_max", 500000);
    assert!(validate_lead(&ordered).is_valid());
}

#[test]
fn test_phone_examples() {
    assert!(validate_phone("(555) 123-4567").is_valid());
    assert!(!validate_phone("12345").is_valid());
}

#[test]
fn test_messages_join_for_banner() {
    let result = validate_password("abc");
    assert_eq!(
        join_messages(result.messages()),
        "Password must be at least 8 characters long. \
         Password must contain at least one uppercase letter. \
         Password must contain at least one number. \
         Password must contain at least one special character"
    );
}
