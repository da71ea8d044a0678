//! String helpers shared by the validators

use once_cell::sync::Lazy;
use regex::Regex;

/// Letters, whitespace, hyphens, apostrophes and periods (names and cities).
pub(crate) static NAME_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z\s\-'.]+$").unwrap());

/// Digits, hyphens and whitespace (zip codes).
pub(crate) static ZIP_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9\-\s]+$").unwrap());

/// Length in characters, not bytes.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Enum/value restriction
pub fn is_one_of(value: &str, allowed: &[&str]) -> bool {
    allowed.contains(&value)
}

/// Joins messages into one banner line: `"A. B. C"`.
pub fn join_messages<I, S>(messages: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    messages
        .into_iter()
        .map(|m| m.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(". ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_len_counts_characters() {
        assert_eq!(char_len("abc"), 3);
        assert_eq!(char_len("José"), 4);
    }

    #[test]
    fn test_name_chars() {
        assert!(NAME_CHARS.is_match("Mary-Jane O'Neil Jr."));
        assert!(!NAME_CHARS.is_match("R2D2"));
        assert!(!NAME_CHARS.is_match(""));
    }

    #[test]
    fn test_zip_chars() {
        assert!(ZIP_CHARS.is_match("12345-6789"));
        assert!(ZIP_CHARS.is_match("123 45"));
        assert!(!ZIP_CHARS.is_match("SW1A 1AA"));
    }

    #[test]
    fn test_enum_variant() {
        let allowed = &["email", "phone", "text", "any"];
        assert!(is_one_of("text", allowed));
        assert!(!is_one_of("fax", allowed));
    }

    #[test]
    fn test_join_messages() {
        assert_eq!(join_messages(["Title is required", "Price is required"]), "Title is required. Price is required");
        assert_eq!(join_messages(Vec::<String>::new()), "");
    }
}
