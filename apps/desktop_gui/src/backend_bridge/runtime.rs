//! Runtime bridge between the UI command queue and the policy service.
//!
//! The worker thread owns a tokio runtime. Each command runs as its own task,
//! so an explain request is never queued behind a slow generation.

use std::{sync::Arc, thread};

use client_core::PolicyService;
use crossbeam_channel::{Receiver, Sender};
use tracing::{debug, error, warn};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    service: Arc<dyn PolicyService>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::Error(UiError::transport(
                    UiErrorContext::BackendStartup,
                )));
                return;
            }
        };

        runtime.block_on(async move {
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));
            while let Ok(cmd) = cmd_rx.recv() {
                debug!(command = cmd.name(), "backend command received");
                tokio::spawn(serve_command(Arc::clone(&service), ui_tx.clone(), cmd));
            }
            debug!("command queue closed; backend worker stopping");
        });
    })
}

async fn serve_command(service: Arc<dyn PolicyService>, ui_tx: Sender<UiEvent>, cmd: BackendCommand) {
    let name = cmd.name();
    let event = match cmd {
        BackendCommand::GeneratePolicy { ticket, prompt } => UiEvent::GenerateSettled {
            ticket,
            outcome: service.generate_policy(&prompt).await,
        },
        BackendCommand::ExplainPolicy { ticket, policy } => UiEvent::ExplainSettled {
            ticket,
            outcome: service.explain_policy(&policy).await,
        },
        BackendCommand::CheckHealth => UiEvent::HealthChecked(service.check_health().await),
    };
    if let Err(err) = ui_tx.try_send(event) {
        warn!(command = name, "failed to deliver backend completion: {err}");
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
