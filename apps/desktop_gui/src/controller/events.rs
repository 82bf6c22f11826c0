//! Backend-to-UI events and error modeling for the interaction controller.

use client_core::ClientError;
use shared::{
    error::ValidationError,
    protocol::{GeneratedPolicy, ServiceReply},
};

use crate::backend_bridge::commands::RequestTicket;

#[derive(Debug)]
pub enum UiEvent {
    Info(String),
    Error(UiError),
    GenerateSettled {
        ticket: RequestTicket,
        outcome: Result<ServiceReply<GeneratedPolicy>, ClientError>,
    },
    ExplainSettled {
        ticket: RequestTicket,
        outcome: Result<ServiceReply<String>, ClientError>,
    },
    HealthChecked(Result<String, ClientError>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Validation,
    Application,
    Transport,
    Clipboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Generate,
    Explain,
    Copy,
}

const GENERATE_FAILED: &str = "Failed to generate policy";
const EXPLAIN_FAILED: &str = "Failed to explain policy";
const GENERATE_NETWORK: &str = "Network error. Please check your connection and try again.";
const EXPLAIN_NETWORK: &str = "Network error. Please try again.";
const CLIPBOARD_FAILED: &str = "Failed to copy to clipboard";
const BACKEND_UNAVAILABLE: &str =
    "The policy service worker is not running. Restart the application and try again.";

/// A user-facing error. The message is what the error view shows; causes are
/// logged where the error is raised and never copied into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn validation(context: UiErrorContext, err: ValidationError) -> Self {
        Self {
            category: UiErrorCategory::Validation,
            context,
            message: err.to_string(),
        }
    }

    /// Server-supplied text wins; an absent or blank message falls back to the
    /// action's static text.
    pub fn application(context: UiErrorContext, server_message: Option<String>) -> Self {
        let message = server_message
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| {
                match context {
                    UiErrorContext::Explain => EXPLAIN_FAILED,
                    _ => GENERATE_FAILED,
                }
                .to_string()
            });
        Self {
            category: UiErrorCategory::Application,
            context,
            message,
        }
    }

    pub fn transport(context: UiErrorContext) -> Self {
        let message = match context {
            UiErrorContext::Explain => EXPLAIN_NETWORK,
            UiErrorContext::BackendStartup => BACKEND_UNAVAILABLE,
            UiErrorContext::Generate | UiErrorContext::Copy => GENERATE_NETWORK,
        };
        Self {
            category: UiErrorCategory::Transport,
            context,
            message: message.to_string(),
        }
    }

    pub fn clipboard() -> Self {
        Self {
            category: UiErrorCategory::Clipboard,
            context: UiErrorContext::Copy,
            message: CLIPBOARD_FAILED.to_string(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
