use std::time::Duration;

use super::*;
use crate::backend_bridge::commands::RequestTicket;
use async_trait::async_trait;
use client_core::ClientError;
use crossbeam_channel::bounded;
use serde_json::json;
use shared::{
    domain::{Policy, RiskAnalysis, RiskLevel, RiskScore},
    protocol::{GeneratedPolicy, ServiceReply},
};
use tokio::sync::Notify;

const WAIT: Duration = Duration::from_secs(5);

/// Generation waits until the test releases it; everything else answers at once.
struct ScriptedService {
    release_generate: Arc<Notify>,
    explanation: &'static str,
}

#[async_trait]
impl PolicyService for ScriptedService {
    async fn generate_policy(
        &self,
        prompt: &str,
    ) -> Result<ServiceReply<GeneratedPolicy>, ClientError> {
        self.release_generate.notified().await;
        if prompt == "unreachable" {
            return Err(ClientError::Status {
                endpoint: "generate-policy",
                status: 503,
            });
        }
        Ok(ServiceReply::Success(GeneratedPolicy {
            policy: Policy::new(json!({ "Version": "2012-10-17", "Statement": [] })),
            risk_analysis: RiskAnalysis {
                risk_score: RiskScore(5.0),
                risk_level: RiskLevel::Minimal,
                summary: String::new(),
                issues: Vec::new(),
                recommendations: Vec::new(),
            },
        }))
    }

    async fn explain_policy(&self, _policy: &Policy) -> Result<ServiceReply<String>, ClientError> {
        Ok(ServiceReply::Success(self.explanation.to_string()))
    }

    async fn check_health(&self) -> Result<String, ClientError> {
        Ok("healthy".to_string())
    }
}

fn start() -> (
    Sender<BackendCommand>,
    Receiver<UiEvent>,
    Arc<Notify>,
    thread::JoinHandle<()>,
) {
    let release_generate = Arc::new(Notify::new());
    let service = Arc::new(ScriptedService {
        release_generate: Arc::clone(&release_generate),
        explanation: "Read-only access.",
    });
    let (cmd_tx, cmd_rx) = bounded(8);
    let (ui_tx, ui_rx) = bounded(8);
    let handle = launch(cmd_rx, ui_tx, service);

    match ui_rx.recv_timeout(WAIT) {
        Ok(UiEvent::Info(message)) => assert_eq!(message, "Backend worker ready"),
        other => panic!("expected ready event, got {other:?}"),
    }
    (cmd_tx, ui_rx, release_generate, handle)
}

#[test]
fn explain_completes_while_generation_is_still_running() {
    let (cmd_tx, ui_rx, release_generate, _handle) = start();

    cmd_tx
        .send(BackendCommand::GeneratePolicy {
            ticket: RequestTicket(1),
            prompt: "Give EC2 read-only access to S3".to_string(),
        })
        .expect("send generate");
    cmd_tx
        .send(BackendCommand::ExplainPolicy {
            ticket: RequestTicket(2),
            policy: Policy::new(json!({ "Version": "2012-10-17" })),
        })
        .expect("send explain");

    match ui_rx.recv_timeout(WAIT) {
        Ok(UiEvent::ExplainSettled {
            ticket,
            outcome: Ok(ServiceReply::Success(text)),
        }) => {
            assert_eq!(ticket, RequestTicket(2));
            assert_eq!(text, "Read-only access.");
        }
        other => panic!("expected explain completion first, got {other:?}"),
    }

    release_generate.notify_one();
    match ui_rx.recv_timeout(WAIT) {
        Ok(UiEvent::GenerateSettled {
            ticket,
            outcome: Ok(ServiceReply::Success(generated)),
        }) => {
            assert_eq!(ticket, RequestTicket(1));
            assert_eq!(generated.risk_analysis.risk_level, RiskLevel::Minimal);
        }
        other => panic!("expected generate completion, got {other:?}"),
    }
}

#[test]
fn transport_errors_are_forwarded_with_their_ticket() {
    let (cmd_tx, ui_rx, release_generate, _handle) = start();

    release_generate.notify_one();
    cmd_tx
        .send(BackendCommand::GeneratePolicy {
            ticket: RequestTicket(7),
            prompt: "unreachable".to_string(),
        })
        .expect("send generate");

    match ui_rx.recv_timeout(WAIT) {
        Ok(UiEvent::GenerateSettled {
            ticket,
            outcome: Err(ClientError::Status { status, .. }),
        }) => {
            assert_eq!(ticket, RequestTicket(7));
            assert_eq!(status, 503);
        }
        other => panic!("expected failed generate completion, got {other:?}"),
    }
}

#[test]
fn health_check_reports_service_status() {
    let (cmd_tx, ui_rx, _release_generate, _handle) = start();

    cmd_tx.send(BackendCommand::CheckHealth).expect("send health");

    match ui_rx.recv_timeout(WAIT) {
        Ok(UiEvent::HealthChecked(Ok(status))) => assert_eq!(status, "healthy"),
        other => panic!("expected health result, got {other:?}"),
    }
}

#[test]
fn worker_stops_when_command_queue_closes() {
    let (cmd_tx, _ui_rx, _release_generate, handle) = start();

    drop(cmd_tx);

    handle.join().expect("worker thread exits cleanly");
}
