//! Numeric parsing
//!
//! Form inputs are parsed the way browsers do it: leading whitespace is
//! skipped and the longest numeric prefix wins, so `"12abc"` reads as `12`
//! and `"abc"` does not parse at all.

use once_cell::sync::Lazy;
use regex::Regex;

static FLOAT_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([+-]?)(?:(Infinity)|([0-9]*)(?:\.([0-9]*))?(?:[eE]([+-]?[0-9]+))?)").unwrap()
});

static INT_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?[0-9]+").unwrap());

static DECIMAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$").unwrap());

/// Parses the leading decimal number of `input` (`parseFloat` semantics).
pub fn parse_float(input: &str) -> Option<f64> {
    let caps = FLOAT_PREFIX.captures(input.trim_start())?;
    let negative = caps.get(1).map_or(false, |m| m.as_str() == "-");

    if caps.get(2).is_some() {
        return Some(if negative { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    let int = caps.get(3).map_or("", |m| m.as_str());
    let frac = caps.get(4).map_or("", |m| m.as_str());
    if int.is_empty() && frac.is_empty() {
        return None;
    }

    let exp = caps.get(5).map_or("0", |m| m.as_str());
    let normalized = format!(
        "{}{}.{}e{}",
        if negative { "-" } else { "" },
        if int.is_empty() { "0" } else { int },
        if frac.is_empty() { "0" } else { frac },
        exp
    );
    normalized.parse::<f64>().ok()
}

/// Parses the leading base-10 integer of `input` (`parseInt` semantics).
pub fn parse_int(input: &str) -> Option<i64> {
    let m = INT_PREFIX.find(input.trim_start())?;
    m.as_str().parse::<i64>().ok()
}

/// The leading integer of `input` as a float, for values past the `i64`
/// range. `parseInt("99999999999999999999")` is `1e20`, not a failure.
pub fn parse_int_wide(input: &str) -> Option<f64> {
    let m = INT_PREFIX.find(input.trim_start())?;
    m.as_str().parse::<f64>().ok()
}

/// Whole-string conversion (`Number()` semantics): surrounding whitespace is
/// ignored, blank text is `0`, and any trailing garbage fails the parse.
pub fn parse_number(input: &str) -> Option<f64> {
    let text = input.trim();
    if text.is_empty() {
        return Some(0.0);
    }

    let (negative, unsigned) = match text.as_bytes()[0] {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    if unsigned == "Infinity" {
        return Some(if negative { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    // Radix literals take no sign
    let radix = match text.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return u128::from_str_radix(&text[2..], radix).ok().map(|n| n as f64);
    }

    if !DECIMAL.is_match(text) {
        return None;
    }
    text.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("250000.50", Some(250000.5))]
    #[case("  42", Some(42.0))]
    #[case("12abc", Some(12.0))]
    #[case(".5", Some(0.5))]
    #[case("3.", Some(3.0))]
    #[case("-7.25", Some(-7.25))]
    #[case("1e3", Some(1000.0))]
    #[case("1e", Some(1.0))]
    #[case("abc", None)]
    #[case("", None)]
    #[case(".", None)]
    #[case("-", None)]
    fn test_parse_float(#[case] input: &str, #[case] expected: Option<f64>) {
        assert_eq!(parse_float(input), expected);
    }

    #[test]
    fn test_parse_float_infinity() {
        assert_eq!(parse_float("Infinity"), Some(f64::INFINITY));
        assert_eq!(parse_float("-Infinity"), Some(f64::NEG_INFINITY));
    }

    #[rstest]
    #[case("3", Some(3))]
    #[case("3.9", Some(3))]
    #[case(" -12px", Some(-12))]
    #[case("1e3", Some(1))]
    #[case("x1", None)]
    #[case("", None)]
    fn test_parse_int(#[case] input: &str, #[case] expected: Option<i64>) {
        assert_eq!(parse_int(input), expected);
    }

    #[test]
    fn test_parse_int_past_i64() {
        assert_eq!(parse_int("99999999999999999999"), None);
        assert_eq!(parse_int_wide("99999999999999999999"), Some(1e20));
        assert_eq!(parse_int_wide("-12px"), Some(-12.0));
        assert_eq!(parse_int_wide("px"), None);
    }

    #[rstest]
    #[case("3", Some(3.0))]
    #[case(" 2.5 ", Some(2.5))]
    #[case("", Some(0.0))]
    #[case("   ", Some(0.0))]
    #[case("-1", Some(-1.0))]
    #[case("1e3", Some(1000.0))]
    #[case(".5", Some(0.5))]
    #[case("0x1A", Some(26.0))]
    #[case("-Infinity", Some(f64::NEG_INFINITY))]
    #[case("3abc", None)]
    #[case("many", None)]
    #[case("1 2", None)]
    #[case("-0x1", None)]
    fn test_parse_number(#[case] input: &str, #[case] expected: Option<f64>) {
        assert_eq!(parse_number(input), expected);
    }
}
