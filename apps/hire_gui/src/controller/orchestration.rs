//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

pub const QUEUE_FULL_MESSAGE: &str = "UI command queue is full; please retry";
pub const WORKER_DISCONNECTED_MESSAGE: &str =
    "Backend worker is not running (startup or runtime failure); restart the app";

/// Queues `cmd` for the backend worker. On failure the reason is written to
/// `status` and returned so the caller can settle whatever it started.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> Result<(), &'static str> {
    let cmd_name = cmd.name();

    let reason = match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            return Ok(());
        }
        Err(TrySendError::Full(_)) => QUEUE_FULL_MESSAGE,
        Err(TrySendError::Disconnected(_)) => WORKER_DISCONNECTED_MESSAGE,
    };
    tracing::warn!(command = cmd_name, "{reason}");
    *status = reason.to_string();
    Err(reason)
}

#[cfg(test)]
mod tests {
    use client_core::history::HistoryPipeline;
    use crossbeam_channel::bounded;

    use super::*;

    fn load_command() -> BackendCommand {
        BackendCommand::LoadHistory {
            ticket: HistoryPipeline::new().begin_load(),
        }
    }

    #[test]
    fn queued_command_leaves_status_alone() {
        let (tx, rx) = bounded(1);
        let mut status = "Ready".to_string();

        assert!(dispatch_backend_command(&tx, load_command(), &mut status).is_ok());

        assert_eq!(status, "Ready");
        assert_eq!(rx.try_recv().map(|cmd| cmd.name()).ok(), Some("load_history"));
    }

    #[test]
    fn full_queue_reports_retry() {
        let (tx, _rx) = bounded(1);
        let mut status = String::new();
        dispatch_backend_command(&tx, load_command(), &mut status).expect("first fits");

        let err = dispatch_backend_command(&tx, load_command(), &mut status).expect_err("full");

        assert_eq!(err, QUEUE_FULL_MESSAGE);
        assert_eq!(status, QUEUE_FULL_MESSAGE);
    }

    #[test]
    fn dropped_worker_is_reported() {
        let (tx, rx) = bounded(1);
        drop(rx);
        let mut status = String::new();

        let err = dispatch_backend_command(&tx, load_command(), &mut status).expect_err("closed");

        assert_eq!(err, WORKER_DISCONNECTED_MESSAGE);
        assert_eq!(status, WORKER_DISCONNECTED_MESSAGE);
    }
}
