//! Field values
//!
//! Inputs arrive as text. Some forms coerce them to numbers as the user
//! types, others only at submit, so a form record holds a mix of text,
//! integers, floats, booleans (checkboxes) and nulls.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::numeric::parse_float;

/// A single form field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    /// JavaScript truthiness: empty text, zero, NaN, `false` and null are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Null => false,
            FieldValue::Bool(b) => *b,
            FieldValue::Int(n) => *n != 0,
            FieldValue::Float(n) => *n != 0.0 && !n.is_nan(),
            FieldValue::Text(s) => !s.is_empty(),
        }
    }

    /// A value that is absent for required-field purposes.
    pub fn is_blank(&self) -> bool {
        !self.is_truthy() || self.to_string().trim().is_empty()
    }

    /// Whether the user supplied anything at all (empty text and null do not count).
    pub fn is_supplied(&self) -> bool {
        match self {
            FieldValue::Null => false,
            FieldValue::Text(s) => !s.is_empty(),
            _ => true,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric reading of the value. Text goes through [`parse_float`].
    pub fn to_number(&self) -> Option<f64> {
        match self {
            FieldValue::Int(n) => Some(*n as f64),
            FieldValue::Float(n) if !n.is_nan() => Some(*n),
            FieldValue::Text(s) => parse_float(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Int(n) => write!(f, "{}", n),
            FieldValue::Float(n) => {
                // Whole floats print without the trailing ".0"
                if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Int(n)
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        FieldValue::Int(n as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Float(n)
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// A form record keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData(BTreeMap<String, FieldValue>);

static NULL: FieldValue = FieldValue::Null;

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value for `name`, or null when the field was never set.
    pub fn get(&self, name: &str) -> &FieldValue {
        self.0.get(name).unwrap_or(&NULL)
    }

    /// Text of a field; non-text values are rendered, missing ones are empty.
    pub fn text(&self, name: &str) -> String {
        self.get(name).to_string()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(name.into(), value.into());
    }

    /// Builder form of [`FormData::set`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
