mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::{load_settings, ClientSettings};
use crossbeam_channel::bounded;
use tracing_subscriber::EnvFilter;

use crate::{
    backend_bridge::{commands::BackendCommand, runtime},
    controller::events::UiEvent,
    ui::HireApp,
};

#[derive(Parser, Debug)]
#[command(name = "smart-hire-gui", about = "Desktop front end for the hiring prediction backend")]
struct Args {
    /// Backend base URL; overrides the config file and environment.
    #[arg(long)]
    api_url: Option<String>,
}

fn resolve_settings(args: &Args) -> (ClientSettings, Option<String>) {
    let settings = match load_settings() {
        Ok(settings) => settings,
        Err(err) => {
            tracing::warn!("falling back to default settings: {err}");
            return (ClientSettings::default(), Some(format!("Config ignored: {err}")));
        }
    };
    match args.api_url.as_deref() {
        Some(raw) => match settings.clone().with_api_base_url(raw) {
            Ok(settings) => (settings, None),
            Err(err) => (settings, Some(format!("--api-url ignored: {err}"))),
        },
        None => (settings, None),
    }
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();
    let (settings, startup_notice) = resolve_settings(&args);
    tracing::info!(api_base_url = %settings.api_base_url, "starting desktop client");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    runtime::launch(cmd_rx, ui_tx, settings.api_base_url.clone());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Smart Hire")
            .with_inner_size([1100.0, 780.0])
            .with_min_inner_size([720.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Smart Hire",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(HireApp::new(
                cmd_tx,
                ui_rx,
                settings,
                startup_notice,
            )))
        }),
    )
}
