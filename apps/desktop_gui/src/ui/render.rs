//! Pure mappings from service data to view models.

use shared::domain::{Policy, RiskAnalysis};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulletGroup {
    pub title: &'static str,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskView {
    pub style_token: &'static str,
    pub score_label: String,
    pub badge_label: String,
    pub summary: String,
    pub issues: Option<BulletGroup>,
    pub recommendations: Option<BulletGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorView {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplanationView {
    pub text: String,
}

pub fn render_policy(policy: &Policy) -> String {
    policy.to_pretty_json()
}

/// Empty issue or recommendation lists produce no group at all, not an empty
/// heading.
pub fn render_risk(risk: &RiskAnalysis) -> RiskView {
    RiskView {
        style_token: risk.risk_level.style_token(),
        score_label: format!("{}/100", risk.risk_score),
        badge_label: format!("{} RISK", risk.risk_level),
        summary: risk.summary.clone(),
        issues: bullet_group("Security Issues:", &risk.issues),
        recommendations: bullet_group("Recommendations:", &risk.recommendations),
    }
}

fn bullet_group(title: &'static str, items: &[String]) -> Option<BulletGroup> {
    (!items.is_empty()).then(|| BulletGroup {
        title,
        items: items.to_vec(),
    })
}

/// Applying the result through `Views::show_error` also hides the output
/// view and brings the placeholder back.
pub fn render_error(message: impl Into<String>) -> ErrorView {
    ErrorView {
        message: message.into(),
    }
}

pub fn render_explanation(text: impl Into<String>) -> ExplanationView {
    ExplanationView { text: text.into() }
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
