//! The two concrete forms: candidate prediction and contact.

use futures::future::BoxFuture;
use shared::domain::{CandidateAttributes, ContactAck, ContactMessage, PredictionOutcome};

use crate::{
    error::ValidationError,
    form::{FieldKind, FieldSpec, FormSchema, FormValues},
    ClientError, PredictorApi,
};

pub const PREDICT_FALLBACK_ERROR: &str = "An error occurred";
pub const CONTACT_FALLBACK_ERROR: &str = "An error occurred while submitting the form";

const PREDICT_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("age", "Age", FieldKind::Integer),
    FieldSpec::required("gender", "Gender", FieldKind::Integer).with_hint("0: Female, 1: Male"),
    FieldSpec::required("educationLevel", "Education Level", FieldKind::Integer)
        .with_hint("1: High School, 2: Bachelor's, 3: Master's, 4: PhD"),
    FieldSpec::required("experienceYears", "Experience Years", FieldKind::Integer),
    FieldSpec::required("previousCompanies", "Previous Companies", FieldKind::Integer),
    FieldSpec::required("distanceFromCompany", "Distance from Company", FieldKind::Integer)
        .with_hint("km"),
    FieldSpec::required("interviewScore", "Interview Score", FieldKind::Integer).with_hint("0-100"),
    FieldSpec::required("skillScore", "Skill Score", FieldKind::Integer).with_hint("0-100"),
    FieldSpec::required("personalityScore", "Personality Score", FieldKind::Integer)
        .with_hint("0-100"),
    FieldSpec::required("recruitmentStrategy", "Recruitment Strategy", FieldKind::Integer)
        .with_hint("1: Aggressive, 2: Moderate, 3: Conservative"),
];

const CONTACT_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("name", "Name", FieldKind::Text),
    FieldSpec::required("email", "Email", FieldKind::Email),
    FieldSpec::required("message", "Message", FieldKind::MultilineText),
];

/// Keeps its values after success so the user can see what was submitted.
pub struct PredictForm;

impl FormSchema for PredictForm {
    type Request = CandidateAttributes;
    type Response = PredictionOutcome;

    const NAME: &'static str = "predict";
    const FIELDS: &'static [FieldSpec] = PREDICT_FIELDS;
    const RESET_ON_SUCCESS: bool = false;
    const FALLBACK_ERROR: &'static str = PREDICT_FALLBACK_ERROR;

    fn build_request(values: &FormValues) -> Result<Self::Request, ValidationError> {
        Ok(CandidateAttributes {
            age: values.integer("age")?,
            gender: values.integer("gender")?,
            education_level: values.integer("educationLevel")?,
            experience_years: values.integer("experienceYears")?,
            previous_companies: values.integer("previousCompanies")?,
            distance_from_company: values.integer("distanceFromCompany")?,
            interview_score: values.integer("interviewScore")?,
            skill_score: values.integer("skillScore")?,
            personality_score: values.integer("personalityScore")?,
            recruitment_strategy: values.integer("recruitmentStrategy")?,
        })
    }

    fn send<'a>(
        api: &'a dyn PredictorApi,
        request: Self::Request,
    ) -> BoxFuture<'a, Result<Self::Response, ClientError>> {
        Box::pin(async move { api.predict(&request).await })
    }
}

/// Clears its values after the backend accepts the message.
pub struct ContactForm;

impl FormSchema for ContactForm {
    type Request = ContactMessage;
    type Response = ContactAck;

    const NAME: &'static str = "contact";
    const FIELDS: &'static [FieldSpec] = CONTACT_FIELDS;
    const RESET_ON_SUCCESS: bool = true;
    const FALLBACK_ERROR: &'static str = CONTACT_FALLBACK_ERROR;

    fn build_request(values: &FormValues) -> Result<Self::Request, ValidationError> {
        Ok(ContactMessage {
            name: values.text("name")?,
            email: values.text("email")?,
            message: values.text("message")?,
        })
    }

    fn send<'a>(
        api: &'a dyn PredictorApi,
        request: Self::Request,
    ) -> BoxFuture<'a, Result<Self::Response, ClientError>> {
        Box::pin(async move { api.submit_contact(&request).await })
    }
}
