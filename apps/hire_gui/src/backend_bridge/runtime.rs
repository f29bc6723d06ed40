//! Backend worker: one tokio runtime on its own thread, one task per command.

use std::{sync::Arc, thread};

use client_core::{HireClient, PredictorApi};
use crossbeam_channel::{Receiver, Sender, TrySendError};
use url::Url;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, api_base_url: Url) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::BackendUnavailable(format!(
                    "failed to build backend runtime: {err}"
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let client: Arc<dyn PredictorApi> = Arc::new(HireClient::new(api_base_url));
            tracing::info!("backend worker ready");

            while let Ok(cmd) = cmd_rx.recv() {
                let client = Arc::clone(&client);
                let ui_tx = ui_tx.clone();
                tokio::spawn(async move {
                    let event = run_command(client.as_ref(), cmd).await;
                    forward_to_ui(&ui_tx, event);
                });
            }
            tracing::info!("command queue closed; backend worker stopping");
        });
    });
}

/// Hands a result to the UI without blocking a runtime worker. A full queue
/// moves the send onto the blocking pool so the result is still delivered.
fn forward_to_ui(ui_tx: &Sender<UiEvent>, event: UiEvent) {
    match ui_tx.try_send(event) {
        Ok(()) => {}
        Err(TrySendError::Full(event)) => {
            tracing::warn!(event = event.name(), "ui queue full; deferring backend result");
            let ui_tx = ui_tx.clone();
            tokio::task::spawn_blocking(move || {
                if ui_tx.send(event).is_err() {
                    tracing::debug!("ui receiver dropped; discarding backend result");
                }
            });
        }
        Err(TrySendError::Disconnected(event)) => {
            tracing::debug!(
                event = event.name(),
                "ui receiver dropped; discarding backend result"
            );
        }
    }
}

pub async fn run_command(client: &dyn PredictorApi, cmd: BackendCommand) -> UiEvent {
    match cmd {
        BackendCommand::Predict { ticket, request } => UiEvent::PredictFinished {
            ticket,
            outcome: client.predict(&request).await,
        },
        BackendCommand::Contact { ticket, request } => UiEvent::ContactFinished {
            ticket,
            outcome: client.submit_contact(&request).await,
        },
        BackendCommand::LoadHistory { ticket } => UiEvent::HistoryLoaded {
            ticket,
            result: client.list_history().await,
        },
        BackendCommand::FetchExport { ticket } => {
            let result = client.export_record(ticket.record_id()).await;
            UiEvent::ExportFetched { ticket, result }
        }
    }
}
