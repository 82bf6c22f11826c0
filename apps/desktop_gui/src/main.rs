use std::{path::PathBuf, sync::Arc};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use client_core::{HttpPolicyService, PolicyService};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing::{info, warn};

mod backend_bridge;
mod clipboard;
mod config;
mod controller;
mod ui;

use backend_bridge::{commands::BackendCommand, runtime};
use clipboard::SystemClipboard;
use controller::{events::UiEvent, InteractionController};
use ui::PolicyGenApp;

#[derive(Parser, Debug)]
#[command(about = "Desktop front end for the IAM policy generation service")]
struct Args {
    /// TOML settings file (defaults to ./policy_gen.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Base URL of the policy service
    #[arg(long)]
    service_url: Option<String>,
    /// tracing env-filter directive
    #[arg(long)]
    log_filter: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let (mut settings, warnings) = config::load_settings(args.config.as_deref());
    if let Some(v) = args.service_url {
        settings.service_url = v;
    }
    if let Some(v) = args.log_filter {
        settings.log_filter = v;
    }

    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .init();
    for warning in &warnings {
        warn!("{warning}");
    }

    let service = HttpPolicyService::new(&settings.service_url)
        .with_context(|| format!("invalid policy service url '{}'", settings.service_url))?;
    info!(service_url = %service.base_url(), "using policy service");
    let service: Arc<dyn PolicyService> = Arc::new(service);

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    let _worker = runtime::launch(cmd_rx, ui_tx, service);

    let mut controller =
        InteractionController::new(cmd_tx, SystemClipboard::default(), settings.example_prompts);
    controller.request_health_check();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("IAM Policy Generator")
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([760.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "IAM Policy Generator",
        options,
        Box::new(move |_cc| Ok(Box::new(PolicyGenApp::new(controller, ui_rx)))),
    )
    .map_err(|err| anyhow!("failed to run desktop GUI: {err}"))
}
