//! Request lifecycle controller shared by every form.
//!
//! A form moves `Idle -> Submitting -> Succeeded | Failed`. Editing a field
//! while the form sits in a terminal state drops it back to `Idle`. While a
//! submission is in flight further submits are ignored, so each accepted
//! submit maps to exactly one backend call.

use futures::future::BoxFuture;
use tracing::{debug, warn};

use crate::{error::ValidationError, ClientError, PredictorApi};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    MultilineText,
    Email,
    Integer,
}

/// Typed descriptor for one form field. Drives both validation and rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub hint: Option<&'static str>,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            hint: None,
            kind,
            required: true,
        }
    }

    pub const fn with_hint(self, hint: &'static str) -> Self {
        Self {
            hint: Some(hint),
            ..self
        }
    }

    pub fn display_label(&self) -> String {
        match self.hint {
            Some(hint) => format!("{} ({hint})", self.label),
            None => self.label.to_string(),
        }
    }

    fn check(&self, raw: &str) -> Result<(), ValidationError> {
        let value = raw.trim();
        if value.is_empty() {
            return if self.required {
                Err(ValidationError::MissingField { field: self.label })
            } else {
                Ok(())
            };
        }

        match self.kind {
            FieldKind::Text | FieldKind::MultilineText => Ok(()),
            FieldKind::Integer => value
                .parse::<i64>()
                .map(|_| ())
                .map_err(|_| ValidationError::NotANumber { field: self.label }),
            FieldKind::Email => {
                if looks_like_email(value) {
                    Ok(())
                } else {
                    Err(ValidationError::InvalidEmail { field: self.label })
                }
            }
        }
    }
}

fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
}

/// Current input of a form, in schema (display) order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValues {
    fields: &'static [FieldSpec],
    values: Vec<String>,
}

impl FormValues {
    pub fn empty(fields: &'static [FieldSpec]) -> Self {
        Self {
            fields,
            values: vec![String::new(); fields.len()],
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|spec| spec.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name).map(|idx| self.values[idx].as_str())
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Result<(), ValidationError> {
        let idx = self
            .position(name)
            .ok_or_else(|| ValidationError::UnknownField(name.to_string()))?;
        self.values[idx] = value.into();
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static FieldSpec, &str)> + '_ {
        self.fields
            .iter()
            .zip(self.values.iter().map(String::as_str))
    }

    pub fn clear(&mut self) {
        self.values.iter_mut().for_each(String::clear);
    }

    /// Checks every field against its declared kind; the first failure wins.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.iter().try_for_each(|(spec, value)| spec.check(value))
    }

    pub fn text(&self, name: &str) -> Result<String, ValidationError> {
        self.get(name)
            .map(|value| value.trim().to_string())
            .ok_or_else(|| ValidationError::UnknownField(name.to_string()))
    }

    pub fn integer(&self, name: &str) -> Result<i64, ValidationError> {
        let idx = self
            .position(name)
            .ok_or_else(|| ValidationError::UnknownField(name.to_string()))?;
        let spec = &self.fields[idx];
        spec.check(&self.values[idx])?;
        self.values[idx]
            .trim()
            .parse::<i64>()
            .map_err(|_| ValidationError::NotANumber { field: spec.label })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormStatus<T> {
    Idle,
    Submitting,
    Succeeded(T),
    Failed(String),
}

impl<T> FormStatus<T> {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded(_) | Self::Failed(_))
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    pub fn result(&self) -> Option<&T> {
        match self {
            Self::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState<T> {
    pub values: FormValues,
    pub status: FormStatus<T>,
    /// Last rejected submit; cleared by the next edit or accepted submit.
    pub validation_error: Option<ValidationError>,
}

/// Identifies one accepted submission. Completions carrying any other ticket
/// are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubmissionTicket(u64);

#[derive(Debug)]
pub struct PendingSubmission<R> {
    pub ticket: SubmissionTicket,
    pub request: R,
}

pub trait FormSchema {
    type Request: Send + 'static;
    type Response: Send + 'static;

    const NAME: &'static str;
    const FIELDS: &'static [FieldSpec];
    /// Whether editable values are cleared after a successful submission.
    const RESET_ON_SUCCESS: bool;
    const FALLBACK_ERROR: &'static str;

    fn build_request(values: &FormValues) -> Result<Self::Request, ValidationError>;

    fn send<'a>(
        api: &'a dyn PredictorApi,
        request: Self::Request,
    ) -> BoxFuture<'a, Result<Self::Response, ClientError>>;
}

pub struct FormController<S: FormSchema> {
    state: FormState<S::Response>,
    generation: u64,
    in_flight: Option<SubmissionTicket>,
}

impl<S: FormSchema> Default for FormController<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: FormSchema> FormController<S> {
    pub fn new() -> Self {
        Self {
            state: FormState {
                values: FormValues::empty(S::FIELDS),
                status: FormStatus::Idle,
                validation_error: None,
            },
            generation: 0,
            in_flight: None,
        }
    }

    pub fn state(&self) -> &FormState<S::Response> {
        &self.state
    }

    pub fn values(&self) -> &FormValues {
        &self.state.values
    }

    pub fn status(&self) -> &FormStatus<S::Response> {
        &self.state.status
    }

    pub fn validation_error(&self) -> Option<&ValidationError> {
        self.state.validation_error.as_ref()
    }

    /// Records an edit. Editing a settled form returns it to `Idle`.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> Result<(), ValidationError> {
        self.state.values.set(name, value)?;
        self.state.validation_error = None;
        if self.state.status.is_terminal() {
            self.reset();
        }
        Ok(())
    }

    pub fn reset(&mut self) {
        if self.state.status.is_submitting() {
            return;
        }
        self.state.status = FormStatus::Idle;
    }

    /// Accepts a submission and hands back the request to send, or returns
    /// `Ok(None)` if one is already outstanding.
    pub fn begin_submit(
        &mut self,
    ) -> Result<Option<PendingSubmission<S::Request>>, ValidationError> {
        if let Some(ticket) = self.in_flight {
            debug!(form = S::NAME, ?ticket, "submit ignored while a request is in flight");
            return Ok(None);
        }

        let request = match self
            .state
            .values
            .validate()
            .and_then(|()| S::build_request(&self.state.values))
        {
            Ok(request) => request,
            Err(err) => {
                debug!(form = S::NAME, error = %err, "submit rejected by validation");
                self.state.status = FormStatus::Idle;
                self.state.validation_error = Some(err.clone());
                return Err(err);
            }
        };

        self.generation += 1;
        let ticket = SubmissionTicket(self.generation);
        self.in_flight = Some(ticket);
        self.state.status = FormStatus::Submitting;
        self.state.validation_error = None;
        debug!(form = S::NAME, ?ticket, "submission accepted");
        Ok(Some(PendingSubmission { ticket, request }))
    }

    /// Applies the backend outcome. Returns `false` when the ticket is stale
    /// (superseded or invalidated by [`Self::unmount`]) and nothing changed.
    pub fn complete(
        &mut self,
        ticket: SubmissionTicket,
        outcome: Result<S::Response, ClientError>,
    ) -> bool {
        if self.in_flight != Some(ticket) {
            debug!(form = S::NAME, ?ticket, "discarding late submission result");
            return false;
        }
        self.in_flight = None;

        match outcome {
            Ok(response) => {
                if S::RESET_ON_SUCCESS {
                    self.state.values.clear();
                }
                self.state.status = FormStatus::Succeeded(response);
            }
            Err(err) => {
                warn!(form = S::NAME, error = %err, "submission failed");
                self.state.status = FormStatus::Failed(err.user_message(S::FALLBACK_ERROR));
            }
        }
        true
    }

    /// Tears the form down: outstanding results will be dropped and the next
    /// mount starts from empty values.
    pub fn unmount(&mut self) {
        self.generation += 1;
        self.in_flight = None;
        self.state.values.clear();
        self.state.status = FormStatus::Idle;
        self.state.validation_error = None;
    }

    /// Runs one full lifecycle against `api`: validate, send, settle.
    pub async fn submit(&mut self, api: &dyn PredictorApi) -> Result<(), ValidationError> {
        let Some(pending) = self.begin_submit()? else {
            return Ok(());
        };
        let outcome = S::send(api, pending.request).await;
        self.complete(pending.ticket, outcome);
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
