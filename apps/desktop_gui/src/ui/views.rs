//! View bindings: every panel and action control the GUI draws, built once at
//! startup and mutated only by the interaction controller.

use crate::ui::render::{ErrorView, ExplanationView, RiskView};

pub const GENERATE_LABEL: &str = "Generate Policy";
pub const GENERATING_LABEL: &str = "Generating...";
pub const EXPLAIN_LABEL: &str = "Explain";
pub const EXPLAINING_LABEL: &str = "Explaining...";
pub const COPY_LABEL: &str = "Copy";
pub const COPIED_LABEL: &str = "Copied!";
pub const RESET_LABEL: &str = "New Policy";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlStyle {
    Normal,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionControl {
    pub label: &'static str,
    pub visible: bool,
    pub enabled: bool,
    pub style: ControlStyle,
}

impl ActionControl {
    fn shown(label: &'static str) -> Self {
        Self {
            label,
            visible: true,
            enabled: true,
            style: ControlStyle::Normal,
        }
    }

    fn hidden(label: &'static str) -> Self {
        Self {
            visible: false,
            ..Self::shown(label)
        }
    }

    pub fn set_busy(&mut self, busy: bool, idle_label: &'static str, busy_label: &'static str) {
        self.enabled = !busy;
        self.label = if busy { busy_label } else { idle_label };
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptField {
    pub text: String,
    focus_requested: bool,
}

impl PromptField {
    pub fn request_focus(&mut self) {
        self.focus_requested = true;
    }

    pub fn focus_requested(&self) -> bool {
        self.focus_requested
    }

    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputPanel {
    pub visible: bool,
    pub policy_text: String,
    pub risk: Option<RiskView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Views {
    pub prompt: PromptField,
    pub examples: Vec<String>,
    pub placeholder_visible: bool,
    pub output: OutputPanel,
    pub error: Option<ErrorView>,
    pub explanation: Option<ExplanationView>,
    pub generate: ActionControl,
    pub explain: ActionControl,
    pub copy: ActionControl,
    pub reset: ActionControl,
    /// Spinner next to the generate control.
    pub busy_indicator: bool,
    /// Set while any action is loading.
    pub window_busy: bool,
    pub status: String,
}

impl Views {
    pub fn new(examples: Vec<String>) -> Self {
        Self {
            prompt: PromptField::default(),
            examples,
            placeholder_visible: true,
            output: OutputPanel::default(),
            error: None,
            explanation: None,
            generate: ActionControl::shown(GENERATE_LABEL),
            explain: ActionControl::hidden(EXPLAIN_LABEL),
            copy: ActionControl::hidden(COPY_LABEL),
            reset: ActionControl::hidden(RESET_LABEL),
            busy_indicator: false,
            window_busy: false,
            status: String::new(),
        }
    }

    pub fn show_output(&mut self) {
        self.placeholder_visible = false;
        self.output.visible = true;
        self.error = None;
        self.copy.visible = true;
        self.explain.visible = true;
        self.reset.visible = true;
    }

    /// Error display and successful output are mutually exclusive.
    pub fn show_error(&mut self, view: ErrorView) {
        self.error = Some(view);
        self.output.visible = false;
        self.placeholder_visible = true;
    }

    pub fn hide_error(&mut self) {
        self.error = None;
    }

    pub fn show_explanation(&mut self, view: ExplanationView) {
        self.explanation = Some(view);
    }

    pub fn hide_explanation(&mut self) {
        self.explanation = None;
    }

    /// Back to the startup layout, keeping the example list and status line,
    /// with focus requested on an empty prompt.
    pub fn reset(&mut self) {
        let examples = std::mem::take(&mut self.examples);
        let status = std::mem::take(&mut self.status);
        *self = Self::new(examples);
        self.status = status;
        self.prompt.request_focus();
    }
}
