use std::{
    collections::HashMap,
    path::PathBuf,
    time::{Duration, Instant},
};

use client_core::{
    AppState, ClientError, ClientSettings, ContactForm, ExportOutcome, FormController,
    HistoryPipeline, HistoryStatus, ObservationSupport, PredictForm, RevealController,
    RevealOptions, ThemeMode, TransitionPhase, View,
};
use crossbeam_channel::{Receiver, Sender};
use shared::domain::RecordId;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{events::UiEvent, orchestration::dispatch_backend_command};
use crate::ui::save_dialog::DialogSink;

/// Reveal controllers for the sections of the currently mounted view.
///
/// Cleared on every mount, so a revisited view animates in again.
#[derive(Default)]
pub(super) struct SectionReveals {
    controllers: HashMap<&'static str, RevealController>,
    epoch: u64,
}

impl SectionReveals {
    pub(super) fn remount(&mut self) {
        self.controllers.clear();
        self.epoch = self.epoch.wrapping_add(1);
    }

    pub(super) fn epoch(&self) -> u64 {
        self.epoch
    }

    pub(super) fn controller(
        &mut self,
        section: &'static str,
        threshold: f32,
    ) -> &mut RevealController {
        self.controllers.entry(section).or_insert_with(|| {
            RevealController::new(
                section,
                RevealOptions::with_threshold(threshold),
                ObservationSupport::Available,
            )
        })
    }
}

pub struct HireApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    pub(super) app_state: AppState,
    pub(super) predict: FormController<PredictForm>,
    pub(super) contact: FormController<ContactForm>,
    pub(super) history: HistoryPipeline,
    pub(super) sections: SectionReveals,
    pub(super) status: String,
    mounted_view: Option<View>,
    applied_theme: Option<ThemeMode>,
    export_dir: PathBuf,
}

impl HireApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        settings: ClientSettings,
        startup_notice: Option<String>,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            app_state: AppState::new(settings.transition_duration),
            predict: FormController::new(),
            contact: FormController::new(),
            history: HistoryPipeline::new(),
            sections: SectionReveals::default(),
            status: startup_notice
                .unwrap_or_else(|| format!("Backend: {}", settings.api_base_url)),
            mounted_view: None,
            applied_theme: None,
            export_dir: settings.resolved_export_dir(),
        }
    }

    pub(super) fn navigate(&mut self, target: View) {
        let outcome = self.app_state.navigate(target, Instant::now());
        tracing::debug!(?target, ?outcome, "navigation requested");
    }

    pub(super) fn submit_predict(&mut self) {
        let Ok(Some(pending)) = self.predict.begin_submit() else {
            return;
        };
        let ticket = pending.ticket;
        let cmd = BackendCommand::Predict {
            ticket,
            request: pending.request,
        };
        if let Err(reason) = dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status) {
            self.predict.complete(ticket, Err(ClientError::transport(reason)));
        }
    }

    pub(super) fn submit_contact(&mut self) {
        let Ok(Some(pending)) = self.contact.begin_submit() else {
            return;
        };
        let ticket = pending.ticket;
        let cmd = BackendCommand::Contact {
            ticket,
            request: pending.request,
        };
        if let Err(reason) = dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status) {
            self.contact.complete(ticket, Err(ClientError::transport(reason)));
        }
    }

    pub(super) fn start_history_load(&mut self) {
        let ticket = self.history.begin_load();
        let cmd = BackendCommand::LoadHistory { ticket };
        if let Err(reason) = dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status) {
            self.history
                .complete_load(ticket, Err(ClientError::transport(reason)));
        }
    }

    pub(super) fn request_export(&mut self, id: RecordId) {
        let ticket = self.history.begin_export(id);
        let cmd = BackendCommand::FetchExport {
            ticket: ticket.clone(),
        };
        if let Err(reason) = dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status) {
            let mut sink = DialogSink::new(self.export_dir.clone());
            self.history
                .complete_export(&ticket, Err(ClientError::transport(reason)), &mut sink);
        }
    }

    pub(super) fn history_is_loading(&self) -> bool {
        self.history.status() == HistoryStatus::Loading
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::BackendUnavailable(message) => {
                    self.status = message;
                }
                UiEvent::PredictFinished { ticket, outcome } => {
                    self.predict.complete(ticket, outcome);
                }
                UiEvent::ContactFinished { ticket, outcome } => {
                    self.contact.complete(ticket, outcome);
                }
                UiEvent::HistoryLoaded { ticket, result } => {
                    self.history.complete_load(ticket, result);
                }
                UiEvent::ExportFetched { ticket, result } => {
                    let mut sink = DialogSink::new(self.export_dir.clone());
                    match self.history.complete_export(&ticket, result, &mut sink) {
                        ExportOutcome::Saved(path) => {
                            self.status = format!("Saved report to {}", path.display());
                        }
                        ExportOutcome::Cancelled => {
                            self.status = "Download cancelled".to_string();
                        }
                        ExportOutcome::Failed(_) | ExportOutcome::Discarded => {}
                    }
                }
            }
        }
    }

    /// Mounts whichever view is active after a transition step, tearing down
    /// the one it replaced.
    fn sync_mounted_view(&mut self) {
        let active = self.app_state.routes().active_view();
        if self.mounted_view == Some(active) {
            return;
        }
        if let Some(previous) = self.mounted_view.take() {
            match previous {
                View::Predict => self.predict.unmount(),
                View::Contact => self.contact.unmount(),
                View::History => self.history.unmount(),
                View::Home | View::About => {}
            }
        }
        self.sections.remount();
        self.mounted_view = Some(active);
        tracing::debug!(view = ?active, "view mounted");
        if active == View::History {
            self.start_history_load();
        }
    }

    fn apply_theme_if_needed(&mut self, ctx: &egui::Context) {
        let theme = self.app_state.theme();
        if self.applied_theme == Some(theme) {
            return;
        }
        let mut visuals = if theme.is_dark() {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        visuals.selection.bg_fill = egui::Color32::from_rgb(0x00, 0x7B, 0xFF);
        ctx.set_visuals(visuals);
        self.applied_theme = Some(theme);
    }

    fn show_nav_bar(&mut self, ctx: &egui::Context) {
        let state = self.app_state.routes().state();
        let highlighted = state.pending_view.unwrap_or(state.active_view);

        egui::TopBottomPanel::top("nav_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("Smart Hire").strong().size(20.0));
                ui.add_space(24.0);
                for view in View::ALL {
                    if ui
                        .selectable_label(view == highlighted, view.label())
                        .clicked()
                    {
                        self.navigate(view);
                    }
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let label = if self.app_state.theme().is_dark() {
                        "Light mode"
                    } else {
                        "Dark mode"
                    };
                    if ui.button(label).clicked() {
                        self.app_state.toggle_theme();
                    }
                });
            });
            ui.add_space(6.0);
        });
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.small(egui::RichText::new(&self.status).weak());
        });
    }

    fn show_active_view(&mut self, ctx: &egui::Context, now: Instant) {
        let routes = self.app_state.routes();
        let opacity = content_opacity(routes.phase(), routes.progress(now));
        let view = routes.active_view();
        let epoch = self.sections.epoch();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.set_opacity(opacity);
            egui::ScrollArea::vertical()
                .id_salt(("view_scroll", epoch))
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.add_space((1.0 - opacity) * 24.0);
                    match view {
                        View::Home => self.show_home(ui),
                        View::Predict => self.show_predict(ui),
                        View::History => self.show_history(ui),
                        View::About => self.show_about(ui),
                        View::Contact => self.show_contact(ui),
                    }
                });
        });
    }
}

/// Opacity of the routed content for a transition phase at `progress`.
pub(super) fn content_opacity(phase: TransitionPhase, progress: f32) -> f32 {
    let progress = progress.clamp(0.0, 1.0);
    match phase {
        TransitionPhase::Stable => 1.0,
        TransitionPhase::Exiting => 1.0 - progress,
        TransitionPhase::Entering => progress,
    }
}

impl eframe::App for HireApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.process_ui_events();
        self.app_state.tick(now);
        self.sync_mounted_view();
        self.apply_theme_if_needed(ctx);

        self.show_nav_bar(ctx);
        self.show_status_bar(ctx);
        self.show_active_view(ctx, now);

        if self.app_state.routes().phase() != TransitionPhase::Stable {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opacity_fades_out_then_in() {
        assert_eq!(content_opacity(TransitionPhase::Stable, 0.3), 1.0);
        assert_eq!(content_opacity(TransitionPhase::Exiting, 0.25), 0.75);
        assert_eq!(content_opacity(TransitionPhase::Entering, 0.25), 0.25);
        assert_eq!(content_opacity(TransitionPhase::Exiting, 2.0), 0.0);
    }

    #[test]
    fn section_reveals_reset_on_remount() {
        let mut sections = SectionReveals::default();
        sections.controller("hero", 0.2).observe(1.0);
        assert!(sections.controller("hero", 0.2).has_entered_viewport());

        sections.remount();

        assert!(!sections.controller("hero", 0.2).has_entered_viewport());
        assert_eq!(sections.epoch(), 1);
    }
}
