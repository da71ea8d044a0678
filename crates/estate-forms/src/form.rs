// File: src/form.rs
// Purpose: Form controller owning state and driving one submission at a time

use std::mem;
use std::sync::Arc;

use estate_validation::FieldValue;
use serde_json::Value;
use tracing::{info, warn};

use crate::errors::FieldErrorMap;
use crate::images::{ImagePolicy, ImageSet, PreviewRegistry};
use crate::payload::FormPayload;
use crate::schema::FormSchema;
use crate::state::{FormEvent, FormState, FormStatus};
use crate::submit::{SubmitError, Submitter};

/// Banner set when a submission future is dropped before it settles.
pub const INTERRUPTED_MESSAGE: &str = "Submission was interrupted";

/// How a call to [`Form::submit`] ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Another submission was still in flight; nothing was sent.
    Busy,
    /// Validation failed; errors are in the form state.
    Invalid,
    /// The server accepted the payload.
    Sent(Value),
    Failed(SubmitError),
}

/// A form bound to its schema.
#[derive(Debug)]
pub struct Form<S: FormSchema> {
    schema: S,
    state: FormState,
}

impl<S: FormSchema> Form<S> {
    pub fn new(schema: S) -> Self {
        let values = schema.initial_values();
        Self {
            schema,
            state: FormState::new(values, ImageSet::default()),
        }
    }

    /// Form whose previews come from `registry` and whose batches follow `policy`.
    pub fn with_images(schema: S, registry: Arc<dyn PreviewRegistry>, policy: ImagePolicy) -> Self {
        let values = schema.initial_values();
        Self {
            schema,
            state: FormState::new(values, ImageSet::new(policy, registry)),
        }
    }

    pub fn schema(&self) -> &S {
        &self.schema
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn errors(&self) -> &FieldErrorMap {
        &self.state.errors
    }

    pub fn status(&self) -> &FormStatus {
        &self.state.status
    }

    pub fn is_busy(&self) -> bool {
        self.state.status.is_busy()
    }

    /// Applies one event and returns the payload to send, if any.
    pub fn dispatch(&mut self, event: FormEvent) -> Option<FormPayload> {
        let state = mem::take(&mut self.state);
        let transition = state.reduce(&self.schema, event);
        self.state = transition.state;
        transition.payload
    }

    /// Shorthand for a change event.
    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) {
        self.dispatch(FormEvent::changed(name, value));
    }

    /// Validates, sends, and records the outcome in the form state.
    pub async fn submit<C>(&mut self, client: &C) -> SubmitOutcome
    where
        C: Submitter,
    {
        if self.is_busy() {
            return SubmitOutcome::Busy;
        }

        let Some(payload) = self.dispatch(FormEvent::SubmitAttempted) else {
            return SubmitOutcome::Invalid;
        };

        let guard = InFlight { form: self, settled: false };
        let result = client.submit(&payload).await;
        guard.settle(result)
    }
}

/// Keeps the busy status honest: if the submission future is dropped before
/// the response arrives, the form still leaves `Submitting`.
struct InFlight<'a, S: FormSchema> {
    form: &'a mut Form<S>,
    settled: bool,
}

impl<S: FormSchema> InFlight<'_, S> {
    fn settle(mut self, result: Result<Value, SubmitError>) -> SubmitOutcome {
        self.settled = true;
        match result {
            Ok(data) => {
                info!("submission accepted");
                self.form.dispatch(FormEvent::SubmitSucceeded);
                SubmitOutcome::Sent(data)
            }
            Err(err) => {
                warn!(error = %err, "submission failed");
                let banner = err.banner(self.form.schema.failure_banner());
                self.form.dispatch(FormEvent::SubmitFailed(banner));
                SubmitOutcome::Failed(err)
            }
        }
    }
}

impl<S: FormSchema> Drop for InFlight<'_, S> {
    fn drop(&mut self) {
        if !self.settled {
            warn!("submission dropped before it settled");
            self.form.dispatch(FormEvent::SubmitFailed(INTERRUPTED_MESSAGE.to_string()));
        }
    }
}
