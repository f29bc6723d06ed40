//! Backend commands queued from UI to backend worker.

use client_core::{
    form::SubmissionTicket,
    history::{ExportTicket, LoadTicket},
};
use shared::domain::{CandidateAttributes, ContactMessage};

/// Each command carries the ticket its controller issued so the result can
/// be matched back, or dropped if the view has gone away.
pub enum BackendCommand {
    Predict {
        ticket: SubmissionTicket,
        request: CandidateAttributes,
    },
    Contact {
        ticket: SubmissionTicket,
        request: ContactMessage,
    },
    LoadHistory {
        ticket: LoadTicket,
    },
    FetchExport {
        ticket: ExportTicket,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Predict { .. } => "predict",
            BackendCommand::Contact { .. } => "contact",
            BackendCommand::LoadHistory { .. } => "load_history",
            BackendCommand::FetchExport { .. } => "fetch_export",
        }
    }
}
