// File: src/coercion.rs
// Purpose: Text to number conversion for numeric form fields

use estate_validation::{parse_float, parse_int, parse_int_wide, FieldValue};

/// How a numeric field is read from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericKind {
    Int,
    Float,
}

impl NumericKind {
    /// Integers past the `i64` range and infinities are kept as floats so
    /// range validation can still report them.
    fn parse(self, text: &str) -> Option<FieldValue> {
        match self {
            NumericKind::Int => parse_int(text)
                .map(FieldValue::Int)
                .or_else(|| parse_int_wide(text).map(FieldValue::Float)),
            NumericKind::Float => parse_float(text).map(FieldValue::Float),
        }
    }
}

/// Coercion applied while the user types.
///
/// Empty input stays empty text so the field can be cleared. Anything else
/// becomes a number, with unparsable input collapsing to `0`.
pub fn coerce_on_input(value: FieldValue, kind: NumericKind) -> FieldValue {
    match value {
        FieldValue::Text(text) if text.is_empty() => FieldValue::Text(text),
        FieldValue::Text(text) => kind.parse(&text).unwrap_or_else(|| zero(kind)),
        other => other,
    }
}

/// Coercion applied when the form is submitted.
///
/// Falsy input (empty text, null) and unparsable text become null.
pub fn coerce_on_submit(value: &FieldValue, kind: NumericKind) -> FieldValue {
    if !value.is_truthy() {
        return FieldValue::Null;
    }
    match value {
        FieldValue::Text(text) => kind.parse(text).unwrap_or(FieldValue::Null),
        FieldValue::Float(n) if kind == NumericKind::Int => FieldValue::Int(n.trunc() as i64),
        FieldValue::Bool(_) => FieldValue::Null,
        other => other.clone(),
    }
}

/// Optional text fields: empty becomes null.
pub fn optional_text(value: &FieldValue) -> FieldValue {
    match value {
        FieldValue::Text(text) if text.is_empty() => FieldValue::Null,
        other => other.clone(),
    }
}

fn zero(kind: NumericKind) -> FieldValue {
    match kind {
        NumericKind::Int => FieldValue::Int(0),
        NumericKind::Float => FieldValue::Float(0.0),
    }
}
