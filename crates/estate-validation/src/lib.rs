//! Estate Validation
//!
//! Pure validation functions for the CRM forms. Every validator takes raw
//! input and returns a fresh [`ValidationResult`]; nothing here performs I/O
//! or keeps state, so the same functions back on-blur feedback, submit-time
//! gating and the browser bindings.

pub mod email;
pub mod lead;
pub mod name;
pub mod numeric;
pub mod password;
pub mod phone;
pub mod property;
pub mod result;
pub mod string;
pub mod value;

pub use email::*;
pub use lead::*;
pub use name::*;
pub use numeric::{parse_float, parse_int, parse_int_wide, parse_number};
pub use password::*;
pub use phone::*;
pub use property::*;
pub use result::{ErrorKind, PasswordRequirements, ValidationResult, Violation, Violations};
pub use string::join_messages;
pub use value::{FieldValue, FormData};
