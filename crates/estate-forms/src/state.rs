// File: src/state.rs
// Purpose: Form state and the reducer that moves it between events

use estate_validation::{FieldValue, FormData};
use tracing::{debug, info};

use crate::errors::FieldErrorMap;
use crate::images::{ImageFile, ImageSet};
use crate::payload::FormPayload;
use crate::schema::FormSchema;

/// Error key used for image batch rejections.
pub const IMAGES_KEY: &str = "images";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormStatus {
    #[default]
    Editing,
    Submitting,
    Succeeded,
    Failed {
        message: String,
    },
}

impl FormStatus {
    pub fn is_busy(&self) -> bool {
        matches!(self, FormStatus::Submitting)
    }

    /// Banner text of a failed submission.
    pub fn banner(&self) -> Option<&str> {
        match self {
            FormStatus::Failed { message } => Some(message.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    FieldChanged { name: String, value: FieldValue },
    FieldBlurred { name: String },
    ImagesAdded(Vec<ImageFile>),
    ImageRemoved(usize),
    SubmitAttempted,
    SubmitSucceeded,
    SubmitFailed(String),
}

impl FormEvent {
    pub fn changed(name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        FormEvent::FieldChanged {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn blurred(name: impl Into<String>) -> Self {
        FormEvent::FieldBlurred { name: name.into() }
    }
}

/// Everything a form view renders from.
#[derive(Debug, Default)]
pub struct FormState {
    pub values: FormData,
    pub errors: FieldErrorMap,
    pub status: FormStatus,
    pub images: ImageSet,
}

/// Result of one reducer step. `payload` is set only when a submit attempt
/// passed validation and the caller should send it.
#[derive(Debug)]
pub struct Transition {
    pub state: FormState,
    pub payload: Option<FormPayload>,
}

impl FormState {
    pub fn new(values: FormData, images: ImageSet) -> Self {
        Self {
            values,
            errors: FieldErrorMap::new(),
            status: FormStatus::Editing,
            images,
        }
    }

    pub fn reduce<S>(mut self, schema: &S, event: FormEvent) -> Transition
    where
        S: FormSchema + ?Sized,
    {
        let mut payload = None;

        match event {
            FormEvent::FieldChanged { name, value } => {
                let value = schema.on_input(&name, value);
                debug!(field = %name, "field changed");
                self.values.set(name.clone(), value);
                self.errors.clear_field_error(&name);
            }

            FormEvent::FieldBlurred { name } => {
                // Blank fields wait for submit so tabbing through the form stays quiet
                if !self.values.get(&name).is_blank() {
                    let result = schema.validate_one(&name, &self.values);
                    debug!(field = %name, valid = result.is_valid(), "field blurred");
                    self.errors.record(&name, &result);
                }
            }

            FormEvent::ImagesAdded(files) => {
                if !schema.accepts_images() {
                    debug!("form does not take images, ignoring batch");
                } else {
                    match self.images.add_batch(files) {
                        Ok(_) => self.errors.clear_field_error(IMAGES_KEY),
                        Err(rejection) => self.errors.set_error(IMAGES_KEY, rejection.to_string()),
                    }
                }
            }

            FormEvent::ImageRemoved(index) => {
                self.images.remove(index);
            }

            FormEvent::SubmitAttempted => {
                if self.status.is_busy() {
                    debug!("submit already in flight, ignoring");
                } else {
                    let check = schema.validate_all(&self.values);
                    self.errors = check.errors;
                    if check.is_valid {
                        let body = schema.build_payload(&self.values, &self.images);
                        let endpoint = schema.endpoint();
                        info!(endpoint = endpoint.path(), "submitting form");
                        payload = Some(FormPayload::new(endpoint, body));
                        self.status = FormStatus::Submitting;
                    } else {
                        debug!(fields = self.errors.len(), "submit blocked by validation");
                        self.status = FormStatus::Editing;
                    }
                }
            }

            FormEvent::SubmitSucceeded => {
                self.status = FormStatus::Succeeded;
            }

            FormEvent::SubmitFailed(message) => {
                self.status = FormStatus::Failed { message };
            }
        }

        Transition { state: self, payload }
    }
}
