// Estate Forms - form orchestration for the CRM front end
// Validation state, input coercion, image attachments and submission

pub mod coercion;
pub mod errors;
pub mod form;
pub mod forms;
pub mod images;
pub mod payload;
pub mod schema;
pub mod state;
pub mod submit;

// Re-export the validation core so views only need one import
pub use estate_validation as validation;
pub use estate_validation::{FieldValue, FormData, ValidationResult};

pub use errors::{FieldErrorMap, FieldValidator, FormCheck, ValidatorSet};
pub use form::{Form, SubmitOutcome};
pub use forms::{LeadForm, LoginForm, PropertyForm, RegisterForm};
pub use images::{ImageFile, ImagePolicy, ImageRejection, ImageSet, ObjectUrls, PreviewHandle, PreviewRegistry};
pub use payload::{Endpoint, FormPayload, MultipartBody, PayloadBody};
pub use schema::FormSchema;
pub use state::{FormEvent, FormState, FormStatus, Transition};
pub use submit::{SubmitError, Submitter};
