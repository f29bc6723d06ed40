//! History retrieval and per-record document export.

use std::path::PathBuf;

use shared::domain::{PredictionRecord, RecordId};
use tracing::{debug, warn};

use crate::{
    export::{deliver, export_file_name, DocumentSink, ExportError, ExportedDocument},
    ClientError, PredictorApi,
};

pub const HISTORY_FALLBACK_ERROR: &str = "An error occurred";
pub const EXPORT_FALLBACK_ERROR: &str = "An error occurred while downloading the PDF";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTicket {
    generation: u64,
    id: RecordId,
}

impl ExportTicket {
    pub fn record_id(&self) -> &RecordId {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Saved(PathBuf),
    Cancelled,
    Failed(String),
    /// The view was torn down before the document arrived.
    Discarded,
}

/// Owns the history list shown by one activation of the history view.
///
/// Every load is a fresh round trip; the list is replaced wholesale on
/// success and left empty on failure. The server's order is kept.
#[derive(Debug, Default)]
pub struct HistoryPipeline {
    records: Vec<PredictionRecord>,
    status: HistoryStatus,
    error: Option<String>,
    mount_generation: u64,
    load_seq: u64,
    load_in_flight: Option<LoadTicket>,
}

impl HistoryPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[PredictionRecord] {
        &self.records
    }

    pub fn status(&self) -> HistoryStatus {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.load_seq += 1;
        let ticket = LoadTicket(self.load_seq);
        self.load_in_flight = Some(ticket);
        self.records.clear();
        self.error = None;
        self.status = HistoryStatus::Loading;
        ticket
    }

    /// Applies a load result. Returns `false` for a stale ticket.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<PredictionRecord>, ClientError>,
    ) -> bool {
        if self.load_in_flight != Some(ticket) {
            debug!(?ticket, "discarding late history load");
            return false;
        }
        self.load_in_flight = None;

        match result {
            Ok(records) => {
                self.records = records;
                self.status = HistoryStatus::Loaded;
            }
            Err(err) => {
                warn!(error = %err, "history load failed");
                self.records.clear();
                self.error = Some(err.user_message(HISTORY_FALLBACK_ERROR));
                self.status = HistoryStatus::Failed;
            }
        }
        true
    }

    pub fn begin_export(&self, id: RecordId) -> ExportTicket {
        ExportTicket {
            generation: self.mount_generation,
            id,
        }
    }

    /// Saves a fetched document through `sink`. Failures set the visible
    /// error but never touch the record list.
    pub fn complete_export<K: DocumentSink + ?Sized>(
        &mut self,
        ticket: &ExportTicket,
        result: Result<ExportedDocument, ClientError>,
        sink: &mut K,
    ) -> ExportOutcome {
        if ticket.generation != self.mount_generation {
            debug!(record_id = %ticket.id, "discarding late export");
            return ExportOutcome::Discarded;
        }

        let document = match result {
            Ok(document) => document,
            Err(err) => {
                warn!(record_id = %ticket.id, error = %err, "export request failed");
                let message = err.user_message(EXPORT_FALLBACK_ERROR);
                self.error = Some(message.clone());
                return ExportOutcome::Failed(message);
            }
        };

        let file_name = export_file_name(&ticket.id, document.content_type.as_deref());
        match deliver(sink, &document.bytes, &file_name) {
            Ok(path) => ExportOutcome::Saved(path),
            Err(ExportError::Cancelled) => ExportOutcome::Cancelled,
            Err(err) => {
                warn!(record_id = %ticket.id, error = %err, "export save failed");
                let message = err.to_string();
                self.error = Some(message.clone());
                ExportOutcome::Failed(message)
            }
        }
    }

    /// Invalidates outstanding loads and exports.
    pub fn unmount(&mut self) {
        self.mount_generation += 1;
        self.load_in_flight = None;
    }

    pub async fn load(&mut self, api: &dyn PredictorApi) -> bool {
        let ticket = self.begin_load();
        let result = api.list_history().await;
        self.complete_load(ticket, result)
    }

    pub async fn export<K: DocumentSink + ?Sized>(
        &mut self,
        api: &dyn PredictorApi,
        id: RecordId,
        sink: &mut K,
    ) -> ExportOutcome {
        let ticket = self.begin_export(id);
        let result = api.export_record(ticket.record_id()).await;
        self.complete_export(&ticket, result, sink)
    }
}

#[cfg(test)]
#[path = "tests/history_tests.rs"]
mod tests;
