//! Per-view rendering. Each view draws its sections through
//! [`HireApp::reveal_section`] so they fade in on first sight.

use client_core::{
    form::{FieldKind, FormSchema},
    reveal::vertical_visible_fraction,
    FormController, FormStatus, HistoryStatus, View,
};
use shared::domain::{PredictionRecord, RecordId};

use super::app::HireApp;

const ACCENT: egui::Color32 = egui::Color32::from_rgb(0x00, 0x7B, 0xFF);
const HIGHLIGHT: egui::Color32 = egui::Color32::from_rgb(0x00, 0xC8, 0x6E);
const REVEAL_SECONDS: f32 = 0.6;
const CARD_WIDTH: f32 = 300.0;

#[derive(Clone, Copy)]
enum AlertKind {
    Success,
    Info,
    Error,
}

fn alert(ui: &mut egui::Ui, kind: AlertKind, text: &str) {
    let (fill, stroke) = match kind {
        AlertKind::Success => (egui::Color32::from_rgb(0xE6, 0xF6, 0xEA), HIGHLIGHT),
        AlertKind::Info => (egui::Color32::from_rgb(0xE5, 0xF1, 0xFF), ACCENT),
        AlertKind::Error => (
            egui::Color32::from_rgb(0xFD, 0xEC, 0xEA),
            egui::Color32::from_rgb(0xD3, 0x2F, 0x2F),
        ),
    };
    egui::Frame::new()
        .fill(fill)
        .stroke(egui::Stroke::new(1.0, stroke))
        .corner_radius(6.0)
        .inner_margin(egui::Margin::symmetric(12, 8))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            for line in text.lines() {
                ui.label(egui::RichText::new(line).color(egui::Color32::from_gray(30)));
            }
        });
}

fn page_title(ui: &mut egui::Ui, title: &str) {
    ui.add_space(12.0);
    ui.label(egui::RichText::new(title).size(34.0).strong().color(ACCENT));
    ui.add_space(16.0);
}

/// Renders one input per schema field and forwards edits to the controller.
fn form_fields<S: FormSchema>(ui: &mut egui::Ui, form: &mut FormController<S>) {
    let submitting = form.status().is_submitting();
    let fields: Vec<_> = form
        .values()
        .iter()
        .map(|(spec, value)| (spec, value.to_string()))
        .collect();

    for (spec, mut value) in fields {
        ui.label(egui::RichText::new(spec.display_label()).strong());
        let edit = match spec.kind {
            FieldKind::MultilineText => egui::TextEdit::multiline(&mut value).desired_rows(5),
            FieldKind::Text | FieldKind::Email | FieldKind::Integer => {
                egui::TextEdit::singleline(&mut value)
            }
        }
        .id_salt((S::NAME, spec.name))
        .desired_width(f32::INFINITY);

        if ui.add_enabled(!submitting, edit).changed() {
            if let Err(err) = form.set_value(spec.name, value) {
                tracing::warn!(form = S::NAME, "rejected edit: {err}");
            }
        }
        ui.add_space(8.0);
    }

    if let Some(err) = form.validation_error() {
        alert(ui, AlertKind::Error, &err.to_string());
        ui.add_space(8.0);
    }
}

/// Submit button plus a spinner while the request is outstanding. Returns
/// `true` when the user asked to submit.
fn submit_row(ui: &mut egui::Ui, label: &str, submitting: bool) -> bool {
    ui.horizontal(|ui| {
        let clicked = ui
            .add_enabled(
                !submitting,
                egui::Button::new(egui::RichText::new(label).strong()).fill(ACCENT),
            )
            .clicked();
        if submitting {
            ui.spinner();
        }
        clicked
    })
    .inner
}

fn history_card(ui: &mut egui::Ui, record: &PredictionRecord) -> bool {
    let mut export_clicked = false;
    egui::Frame::group(ui.style())
        .corner_radius(8.0)
        .inner_margin(egui::Margin::same(12))
        .show(ui, |ui| {
            ui.set_width(CARD_WIDTH);
            let local = record.timestamp.with_timezone(&chrono::Local);
            ui.label(
                egui::RichText::new(local.format("%Y-%m-%d %H:%M:%S").to_string())
                    .strong()
                    .color(ACCENT),
            );
            let input = &record.input;
            ui.weak(format!("Age: {}", input.age));
            ui.weak(format!("Gender: {}", input.gender_label()));
            ui.weak(format!("Education: {}", input.education_level));
            ui.weak(format!("Experience: {} years", input.experience_years));
            let verdict_color = if record.predicted {
                HIGHLIGHT
            } else {
                egui::Color32::from_rgb(0xD3, 0x2F, 0x2F)
            };
            ui.label(
                egui::RichText::new(record.verdict_label())
                    .strong()
                    .color(verdict_color),
            );
            ui.weak(format!("Probability: {}", record.probability_percent()));
            ui.add_space(6.0);
            export_clicked = ui.button("Download PDF").clicked();
        });
    export_clicked
}

impl HireApp {
    /// Lays out `add_contents` and feeds the section's on-screen fraction to
    /// its reveal controller. Hidden sections keep their space so the
    /// intersection can be measured.
    fn reveal_section<R>(
        &mut self,
        ui: &mut egui::Ui,
        section: &'static str,
        threshold: f32,
        add_contents: impl FnOnce(&mut Self, &mut egui::Ui) -> R,
    ) -> R {
        let viewport = ui.clip_rect();
        let entered = self
            .sections
            .controller(section, threshold)
            .has_entered_viewport();
        let opacity = ui.ctx().animate_bool_with_time(
            egui::Id::new(("reveal", self.sections.epoch(), section)),
            entered,
            REVEAL_SECONDS,
        );

        let scoped = ui.scope(|ui| {
            ui.set_opacity(opacity);
            ui.add_space((1.0 - opacity) * 30.0);
            add_contents(self, ui)
        });

        let rect = scoped.response.rect;
        let fraction =
            vertical_visible_fraction(rect.top(), rect.bottom(), viewport.top(), viewport.bottom());
        if self.sections.controller(section, threshold).observe(fraction) {
            ui.ctx().request_repaint();
        }
        scoped.inner
    }

    pub(super) fn show_home(&mut self, ui: &mut egui::Ui) {
        self.reveal_section(ui, "home-hero", 0.2, |app, ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(60.0);
                ui.label(egui::RichText::new("Smart Hire").size(56.0).strong());
                ui.add_space(8.0);
                ui.label(
                    egui::RichText::new("AI-Powered Candidate Prediction")
                        .size(28.0)
                        .color(HIGHLIGHT),
                );
                ui.add_space(40.0);
                ui.horizontal(|ui| {
                    ui.add_space((ui.available_width() - 280.0).max(0.0) / 2.0);
                    if ui
                        .add(egui::Button::new("Start Predicting").fill(ACCENT))
                        .clicked()
                    {
                        app.navigate(View::Predict);
                    }
                    ui.add_space(16.0);
                    if ui.button("Learn More").clicked() {
                        app.navigate(View::About);
                    }
                });
            });
        });
    }

    pub(super) fn show_about(&mut self, ui: &mut egui::Ui) {
        self.reveal_section(ui, "about", 0.0, |_app, ui| {
            page_title(ui, "About Smart Hire");
            egui::Frame::group(ui.style())
                .corner_radius(12.0)
                .inner_margin(egui::Margin::same(24))
                .show(ui, |ui| {
                    ui.set_max_width(800.0);
                    for paragraph in [
                        "Smart Hire is an AI-powered platform designed to streamline the hiring \
                         process by predicting the likelihood of a candidate being hired based \
                         on their profile.",
                        "Using advanced machine learning models, Smart Hire analyzes key \
                         candidate attributes to provide accurate and data-driven predictions.",
                        "Our mission is to empower recruiters with intelligent tools to make \
                         informed decisions, saving time and improving hiring outcomes.",
                    ] {
                        ui.label(paragraph);
                        ui.add_space(10.0);
                    }
                });
        });
    }

    pub(super) fn show_predict(&mut self, ui: &mut egui::Ui) {
        self.reveal_section(ui, "predict", 0.0, |app, ui| {
            page_title(ui, "Candidate Prediction");
            ui.set_max_width(640.0);
            form_fields(ui, &mut app.predict);
            if submit_row(ui, "Predict", app.predict.status().is_submitting()) {
                app.submit_predict();
            }
            ui.add_space(16.0);

            match app.predict.status() {
                FormStatus::Succeeded(outcome) => {
                    let kind = if outcome.prediction {
                        AlertKind::Success
                    } else {
                        AlertKind::Info
                    };
                    alert(
                        ui,
                        kind,
                        &format!(
                            "{}\nProbability of Hire: {}",
                            outcome.headline(),
                            outcome.probability_percent()
                        ),
                    );
                }
                FormStatus::Failed(message) => alert(ui, AlertKind::Error, message),
                FormStatus::Idle | FormStatus::Submitting => {}
            }
        });
    }

    pub(super) fn show_contact(&mut self, ui: &mut egui::Ui) {
        self.reveal_section(ui, "contact", 0.0, |app, ui| {
            page_title(ui, "Contact Us");
            ui.set_max_width(640.0);
            form_fields(ui, &mut app.contact);
            if submit_row(ui, "Send", app.contact.status().is_submitting()) {
                app.submit_contact();
            }
            ui.add_space(16.0);

            match app.contact.status() {
                FormStatus::Succeeded(ack) => alert(ui, AlertKind::Success, &ack.message),
                FormStatus::Failed(message) => alert(ui, AlertKind::Error, message),
                FormStatus::Idle | FormStatus::Submitting => {}
            }
        });
    }

    pub(super) fn show_history(&mut self, ui: &mut egui::Ui) {
        let requested: Option<RecordId> = self.reveal_section(ui, "history", 0.0, |app, ui| {
            page_title(ui, "Prediction History");
            if let Some(error) = app.history.error() {
                alert(ui, AlertKind::Error, error);
                ui.add_space(16.0);
            }
            if app.history_is_loading() {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.weak("Loading history...");
                });
                return None;
            }
            if app.history.status() == HistoryStatus::Loaded && app.history.records().is_empty() {
                ui.weak("No predictions yet.");
                return None;
            }

            let mut requested = None;
            ui.horizontal_wrapped(|ui| {
                ui.spacing_mut().item_spacing = egui::vec2(16.0, 16.0);
                for record in app.history.records() {
                    if history_card(ui, record) {
                        requested = Some(record.id.clone());
                    }
                }
            });
            requested
        });

        if let Some(id) = requested {
            self.request_export(id);
        }
    }
}
