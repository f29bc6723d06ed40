//! Backend-to-UI events.

use client_core::{
    form::SubmissionTicket,
    history::{ExportTicket, LoadTicket},
    ClientError, ExportedDocument,
};
use shared::domain::{ContactAck, PredictionOutcome, PredictionRecord};

pub enum UiEvent {
    BackendUnavailable(String),
    PredictFinished {
        ticket: SubmissionTicket,
        outcome: Result<PredictionOutcome, ClientError>,
    },
    ContactFinished {
        ticket: SubmissionTicket,
        outcome: Result<ContactAck, ClientError>,
    },
    HistoryLoaded {
        ticket: LoadTicket,
        result: Result<Vec<PredictionRecord>, ClientError>,
    },
    ExportFetched {
        ticket: ExportTicket,
        result: Result<ExportedDocument, ClientError>,
    },
}

impl UiEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::BackendUnavailable(_) => "backend_unavailable",
            Self::PredictFinished { .. } => "predict_finished",
            Self::ContactFinished { .. } => "contact_finished",
            Self::HistoryLoaded { .. } => "history_loaded",
            Self::ExportFetched { .. } => "export_fetched",
        }
    }
}
