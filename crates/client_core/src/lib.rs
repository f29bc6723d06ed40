use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{
        CandidateAttributes, ContactAck, ContactMessage, PredictionOutcome, PredictionRecord,
        RecordId,
    },
    error::ApiErrorBody,
    protocol::{CONTACT_PATH, EXPORT_PATH_PREFIX, HISTORY_PATH, PREDICT_PATH},
};
use tracing::{info, warn};
use url::Url;

pub mod app_state;
pub mod config;
pub mod error;
pub mod export;
pub mod form;
pub mod history;
pub mod reveal;
pub mod schemas;
pub mod transition;

pub use app_state::{AppState, ThemeMode};
pub use config::{load_settings, load_settings_from, ClientSettings, ConfigError};
pub use error::{ClientError, ValidationError};
pub use export::{DirectorySink, DocumentSink, ExportError, ExportedDocument};
pub use form::{FormController, FormSchema, FormState, FormStatus, SubmissionTicket};
pub use history::{ExportOutcome, HistoryPipeline, HistoryStatus};
pub use reveal::{ObservationSupport, RevealController, RevealOptions, RevealVariant};
pub use schemas::{ContactForm, PredictForm};
pub use transition::{NavigationOutcome, RouteTransitionController, TransitionPhase, View};

/// Calls offered by the prediction backend. Each call is fire-once: no
/// retries, no client-side timeout.
#[async_trait]
pub trait PredictorApi: Send + Sync {
    async fn predict(
        &self,
        attributes: &CandidateAttributes,
    ) -> Result<PredictionOutcome, ClientError>;
    async fn submit_contact(&self, message: &ContactMessage) -> Result<ContactAck, ClientError>;
    async fn list_history(&self) -> Result<Vec<PredictionRecord>, ClientError>;
    async fn export_record(&self, id: &RecordId) -> Result<ExportedDocument, ClientError>;
}

pub struct HireClient {
    http: Client,
    base_url: Url,
}

impl HireClient {
    pub fn new(base_url: Url) -> Self {
        Self::with_http(Client::new(), base_url)
    }

    pub fn with_http(http: Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    pub fn from_settings(settings: &ClientSettings) -> Self {
        Self::new(settings.api_base_url.clone())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::transport(format!("invalid endpoint '{path}': {err}")))
    }

    fn export_endpoint(&self, id: &RecordId) -> Result<Url, ClientError> {
        let mut url = self.endpoint(EXPORT_PATH_PREFIX)?;
        url.path_segments_mut()
            .map_err(|()| ClientError::transport("API base URL cannot carry path segments"))?
            .push(id.as_str());
        Ok(url)
    }

    /// Turns a non-success response into a transport error carrying the
    /// body's `error` field, if any.
    async fn ensure_success(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.unwrap_or_default();
        let server_message = ApiErrorBody::message_from_bytes(&body);
        warn!(
            status = status.as_u16(),
            server_message = server_message.as_deref().unwrap_or(""),
            "backend call failed"
        );
        Err(ClientError::Transport {
            status: Some(status.as_u16()),
            server_message,
            detail: format!("backend responded with {status}"),
        })
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|err| ClientError::Decode(err.to_string()))
    }
}

#[async_trait]
impl PredictorApi for HireClient {
    async fn predict(
        &self,
        attributes: &CandidateAttributes,
    ) -> Result<PredictionOutcome, ClientError> {
        let response = self
            .http
            .post(self.endpoint(PREDICT_PATH)?)
            .json(attributes)
            .send()
            .await?;
        let outcome: PredictionOutcome = Self::read_json(response).await?;
        info!(
            prediction = outcome.prediction,
            probability = outcome.probability,
            "prediction received"
        );
        Ok(outcome)
    }

    async fn submit_contact(&self, message: &ContactMessage) -> Result<ContactAck, ClientError> {
        let response = self
            .http
            .post(self.endpoint(CONTACT_PATH)?)
            .json(message)
            .send()
            .await?;
        let ack: ContactAck = Self::read_json(response).await?;
        info!("contact message accepted");
        Ok(ack)
    }

    async fn list_history(&self) -> Result<Vec<PredictionRecord>, ClientError> {
        let response = self.http.get(self.endpoint(HISTORY_PATH)?).send().await?;
        let records: Vec<PredictionRecord> = Self::read_json(response).await?;
        info!(count = records.len(), "history loaded");
        Ok(records)
    }

    async fn export_record(&self, id: &RecordId) -> Result<ExportedDocument, ClientError> {
        let response = self.http.get(self.export_endpoint(id)?).send().await?;
        let response = Self::ensure_success(response).await?;
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?;
        info!(record_id = %id, size_bytes = bytes.len(), "export document received");
        Ok(ExportedDocument {
            bytes: bytes.to_vec(),
            content_type,
        })
    }
}

#[cfg(test)]
#[path = "tests/fake_api.rs"]
pub(crate) mod fake_api;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
