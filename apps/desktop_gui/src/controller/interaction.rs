//! Interaction controller: owns the UI state, turns gestures into backend
//! commands, and applies their completions to the view bindings.
//!
//! Handlers run on the UI thread only. A handler that issues a request
//! mutates state, queues a command and returns; the matching completion event
//! is applied on a later frame by [`InteractionController::handle_event`].

use std::time::{Duration, Instant};

use client_core::ClientError;
use crossbeam_channel::Sender;
use shared::{
    domain::Policy,
    error::ValidationError,
    protocol::{GeneratedPolicy, ServiceReply},
};
use tracing::{debug, error, info, warn};

use crate::{
    backend_bridge::commands::{BackendCommand, RequestTicket, TicketIssuer},
    clipboard::ClipboardWriter,
    controller::{
        events::{UiError, UiErrorContext, UiEvent},
        orchestration::dispatch_backend_command,
    },
    ui::{
        render::{render_error, render_explanation, render_policy, render_risk},
        views::{
            ControlStyle, Views, COPIED_LABEL, COPY_LABEL, EXPLAINING_LABEL, EXPLAIN_LABEL,
            GENERATE_LABEL, GENERATING_LABEL,
        },
    },
};

/// How long the copy control shows its confirmation state.
pub const COPY_FEEDBACK_WINDOW: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingTarget {
    Generate,
    Explain,
}

/// An in-flight request and the policy revision it was issued against. A
/// completion for an older revision clears the loading state but its result
/// is dropped.
#[derive(Clone, Copy)]
struct PendingRequest {
    ticket: RequestTicket,
    policy_revision: u64,
}

#[derive(Default)]
struct UiState {
    current_policy: Option<Policy>,
    /// Bumped whenever `current_policy` is replaced or cleared.
    policy_revision: u64,
    pending_generate: Option<PendingRequest>,
    pending_explain: Option<PendingRequest>,
    copy_feedback_until: Option<Instant>,
}

pub struct InteractionController<C: ClipboardWriter> {
    cmd_tx: Sender<BackendCommand>,
    clipboard: C,
    tickets: TicketIssuer,
    state: UiState,
    views: Views,
}

impl<C: ClipboardWriter> InteractionController<C> {
    pub fn new(cmd_tx: Sender<BackendCommand>, clipboard: C, examples: Vec<String>) -> Self {
        Self {
            cmd_tx,
            clipboard,
            tickets: TicketIssuer::default(),
            state: UiState::default(),
            views: Views::new(examples),
        }
    }

    pub fn views(&self) -> &Views {
        &self.views
    }

    pub fn prompt_text_mut(&mut self) -> &mut String {
        &mut self.views.prompt.text
    }

    pub fn take_prompt_focus_request(&mut self) -> bool {
        self.views.prompt.take_focus_request()
    }

    pub fn current_policy(&self) -> Option<&Policy> {
        self.state.current_policy.as_ref()
    }

    pub fn is_loading(&self, target: LoadingTarget) -> bool {
        match target {
            LoadingTarget::Generate => self.state.pending_generate.is_some(),
            LoadingTarget::Explain => self.state.pending_explain.is_some(),
        }
    }

    /// Earliest instant at which [`Self::tick`] has something to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.state.copy_feedback_until
    }

    pub fn request_health_check(&mut self) {
        if dispatch_backend_command(&self.cmd_tx, BackendCommand::CheckHealth).is_err() {
            self.views.status = "Policy service worker unavailable".to_string();
        }
    }

    pub fn on_example_select(&mut self, prompt_text: &str) {
        self.views.prompt.text = prompt_text.to_string();
    }

    pub fn on_generate_submit(&mut self, prompt_text: &str) {
        if self.is_loading(LoadingTarget::Generate) {
            debug!("generate already in flight; ignoring submit");
            return;
        }
        let prompt = prompt_text.trim();
        if prompt.is_empty() {
            self.show_error(UiError::validation(
                UiErrorContext::Generate,
                ValidationError::EmptyPrompt,
            ));
            return;
        }

        let ticket = self.tickets.next_ticket();
        self.state.pending_generate = Some(PendingRequest {
            ticket,
            policy_revision: self.state.policy_revision,
        });
        self.set_loading(LoadingTarget::Generate, true);
        self.views.hide_error();
        self.views.hide_explanation();

        let cmd = BackendCommand::GeneratePolicy {
            ticket,
            prompt: prompt.to_string(),
        };
        if dispatch_backend_command(&self.cmd_tx, cmd).is_err() {
            self.state.pending_generate = None;
            self.set_loading(LoadingTarget::Generate, false);
            self.show_error(UiError::transport(UiErrorContext::Generate));
        }
    }

    pub fn on_explain_request(&mut self) {
        if self.is_loading(LoadingTarget::Explain) {
            debug!("explain already in flight; ignoring request");
            return;
        }
        let Some(policy) = self.state.current_policy.clone() else {
            self.show_error(UiError::validation(
                UiErrorContext::Explain,
                ValidationError::NoPolicyToExplain,
            ));
            return;
        };

        let ticket = self.tickets.next_ticket();
        self.state.pending_explain = Some(PendingRequest {
            ticket,
            policy_revision: self.state.policy_revision,
        });
        self.set_loading(LoadingTarget::Explain, true);

        if dispatch_backend_command(&self.cmd_tx, BackendCommand::ExplainPolicy { ticket, policy })
            .is_err()
        {
            self.state.pending_explain = None;
            self.set_loading(LoadingTarget::Explain, false);
            self.show_error(UiError::transport(UiErrorContext::Explain));
        }
    }

    pub fn on_copy_request(&mut self, now: Instant) {
        let Some(policy) = self.state.current_policy.as_ref() else {
            self.show_error(UiError::validation(
                UiErrorContext::Copy,
                ValidationError::NoPolicyToCopy,
            ));
            return;
        };

        let text = render_policy(policy);
        match self.clipboard.write_text(&text) {
            Ok(()) => {
                self.state.copy_feedback_until = Some(now + COPY_FEEDBACK_WINDOW);
                self.views.copy.label = COPIED_LABEL;
                self.views.copy.style = ControlStyle::Success;
            }
            Err(err) => {
                warn!(error = %err, "failed to copy policy to clipboard");
                self.restore_copy_control();
                self.show_error(UiError::clipboard());
            }
        }
    }

    /// In-flight requests stay pending so their controls remain disabled
    /// until they settle; their results are then dropped.
    pub fn on_reset_request(&mut self) {
        let pending_generate = self.state.pending_generate;
        let pending_explain = self.state.pending_explain;
        if pending_generate.is_some() || pending_explain.is_some() {
            debug!("reset while requests are in flight; their results will be dropped");
        }
        self.state = UiState {
            policy_revision: self.state.policy_revision + 1,
            pending_generate,
            pending_explain,
            ..UiState::default()
        };
        self.views.reset();
        if pending_generate.is_some() {
            self.set_loading(LoadingTarget::Generate, true);
        }
        if pending_explain.is_some() {
            self.set_loading(LoadingTarget::Explain, true);
        }
    }

    pub fn tick(&mut self, now: Instant) {
        if self
            .state
            .copy_feedback_until
            .is_some_and(|until| now >= until)
        {
            self.restore_copy_control();
        }
    }

    pub fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) => {
                info!(status = %message, "backend status");
                self.views.status = message;
            }
            UiEvent::Error(err) => {
                error!(context = ?err.context(), detail = err.message(), "backend error");
                self.show_error(err);
            }
            UiEvent::GenerateSettled { ticket, outcome } => {
                self.on_generate_settled(ticket, outcome);
            }
            UiEvent::ExplainSettled { ticket, outcome } => {
                self.on_explain_settled(ticket, outcome);
            }
            UiEvent::HealthChecked(Ok(status)) => {
                self.views.status = format!("Policy service: {status}");
            }
            UiEvent::HealthChecked(Err(err)) => {
                warn!(error = %err, "policy service health check failed");
                self.views.status = "Policy service unreachable; requests may fail".to_string();
            }
        }
    }

    fn on_generate_settled(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<ServiceReply<GeneratedPolicy>, ClientError>,
    ) {
        let policy_revision = match self.state.pending_generate {
            Some(pending) if pending.ticket == ticket => pending.policy_revision,
            _ => {
                debug!(ticket = ticket.0, "dropping stale generate-policy completion");
                return;
            }
        };
        self.state.pending_generate = None;
        self.set_loading(LoadingTarget::Generate, false);

        if policy_revision != self.state.policy_revision {
            debug!(ticket = ticket.0, "dropping generate-policy result issued before a reset");
            return;
        }

        match outcome {
            Ok(ServiceReply::Success(generated)) => {
                info!(
                    ticket = ticket.0,
                    risk_level = %generated.risk_analysis.risk_level,
                    "policy generated"
                );
                self.install_policy(generated);
            }
            Ok(ServiceReply::Failure { error }) => {
                warn!(
                    ticket = ticket.0,
                    error = error.as_deref().unwrap_or_default(),
                    "policy service rejected generate request"
                );
                self.show_error(UiError::application(UiErrorContext::Generate, error));
            }
            Err(err) => {
                error!(ticket = ticket.0, error = %err, "generate-policy request failed");
                self.show_error(UiError::transport(UiErrorContext::Generate));
            }
        }
    }

    fn on_explain_settled(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<ServiceReply<String>, ClientError>,
    ) {
        let policy_revision = match self.state.pending_explain {
            Some(pending) if pending.ticket == ticket => pending.policy_revision,
            _ => {
                debug!(ticket = ticket.0, "dropping stale explain-policy completion");
                return;
            }
        };
        self.state.pending_explain = None;
        self.set_loading(LoadingTarget::Explain, false);

        if policy_revision != self.state.policy_revision {
            debug!(
                ticket = ticket.0,
                "dropping explanation for a policy that is no longer current"
            );
            return;
        }

        match outcome {
            Ok(ServiceReply::Success(text)) => {
                self.views.show_explanation(render_explanation(text));
            }
            Ok(ServiceReply::Failure { error }) => {
                warn!(
                    ticket = ticket.0,
                    error = error.as_deref().unwrap_or_default(),
                    "policy service rejected explain request"
                );
                self.show_error(UiError::application(UiErrorContext::Explain, error));
            }
            Err(err) => {
                error!(ticket = ticket.0, error = %err, "explain-policy request failed");
                self.show_error(UiError::transport(UiErrorContext::Explain));
            }
        }
    }

    fn install_policy(&mut self, generated: GeneratedPolicy) {
        let GeneratedPolicy {
            policy,
            risk_analysis,
        } = generated;
        self.views.output.policy_text = render_policy(&policy);
        self.views.output.risk = Some(render_risk(&risk_analysis));
        self.views.hide_explanation();
        self.views.show_output();
        self.state.current_policy = Some(policy);
        self.state.policy_revision += 1;
    }

    fn set_loading(&mut self, target: LoadingTarget, loading: bool) {
        match target {
            LoadingTarget::Generate => {
                self.views
                    .generate
                    .set_busy(loading, GENERATE_LABEL, GENERATING_LABEL);
                self.views.busy_indicator = loading;
            }
            LoadingTarget::Explain => {
                self.views
                    .explain
                    .set_busy(loading, EXPLAIN_LABEL, EXPLAINING_LABEL);
            }
        }
        self.views.window_busy =
            self.is_loading(LoadingTarget::Generate) || self.is_loading(LoadingTarget::Explain);
    }

    fn restore_copy_control(&mut self) {
        self.state.copy_feedback_until = None;
        self.views.copy.label = COPY_LABEL;
        self.views.copy.style = ControlStyle::Normal;
    }

    fn show_error(&mut self, err: UiError) {
        debug!(category = ?err.category(), context = ?err.context(), "showing error view");
        self.views.show_error(render_error(err.message()));
    }
}

#[cfg(test)]
#[path = "tests/interaction_tests.rs"]
mod tests;
