use super::*;
use crate::ui::views::Views;
use serde_json::json;
use shared::domain::{RiskLevel, RiskScore};

fn analysis(level: RiskLevel, score: f64, issues: &[&str], recommendations: &[&str]) -> RiskAnalysis {
    RiskAnalysis {
        risk_score: RiskScore(score),
        risk_level: level,
        summary: "Grants broad access.".to_string(),
        issues: issues.iter().map(|s| s.to_string()).collect(),
        recommendations: recommendations.iter().map(|s| s.to_string()).collect(),
    }
}

#[test]
fn risk_view_omits_groups_for_empty_lists() {
    let view = render_risk(&analysis(RiskLevel::Low, 15.0, &[], &[]));

    assert_eq!(view.style_token, "low");
    assert_eq!(view.score_label, "15/100");
    assert_eq!(view.badge_label, "LOW RISK");
    assert_eq!(view.summary, "Grants broad access.");
    assert!(view.issues.is_none());
    assert!(view.recommendations.is_none());
}

#[test]
fn risk_view_keeps_items_in_order() {
    let view = render_risk(&analysis(
        RiskLevel::High,
        85.0,
        &["Wildcard action", "Wildcard resource"],
        &["Scope to specific buckets"],
    ));

    assert_eq!(view.style_token, "high");
    assert_eq!(view.badge_label, "HIGH RISK");
    assert_eq!(
        view.issues,
        Some(BulletGroup {
            title: "Security Issues:",
            items: vec!["Wildcard action".to_string(), "Wildcard resource".to_string()],
        })
    );
    assert_eq!(
        view.recommendations,
        Some(BulletGroup {
            title: "Recommendations:",
            items: vec!["Scope to specific buckets".to_string()],
        })
    );
}

#[test]
fn only_non_empty_group_is_rendered() {
    let view = render_risk(&analysis(RiskLevel::Medium, 42.5, &[], &["Add a condition"]));

    assert_eq!(view.style_token, "medium");
    assert_eq!(view.score_label, "42.5/100");
    assert!(view.issues.is_none());
    assert!(view.recommendations.is_some());
}

#[test]
fn minimal_level_and_out_of_range_scores() {
    let view = render_risk(&analysis(RiskLevel::Minimal, -4.0, &[], &[]));
    assert_eq!(view.style_token, "minimal");
    assert_eq!(view.badge_label, "MINIMAL RISK");
    assert_eq!(view.score_label, "0/100");

    let view = render_risk(&analysis(RiskLevel::High, 130.0, &[], &[]));
    assert_eq!(view.score_label, "100/100");
}

#[test]
fn policy_is_rendered_with_two_space_indent() {
    let policy = Policy::new(json!({ "Version": "2012-10-17", "Statement": [] }));

    assert_eq!(
        render_policy(&policy),
        "{\n  \"Version\": \"2012-10-17\",\n  \"Statement\": []\n}"
    );
}

#[test]
fn error_view_replaces_output() {
    let mut views = Views::new(Vec::new());
    views.output.policy_text = "{}".to_string();
    views.show_output();

    views.show_error(render_error("Failed to generate policy"));

    assert_eq!(
        views.error,
        Some(ErrorView {
            message: "Failed to generate policy".to_string()
        })
    );
    assert!(!views.output.visible);
    assert!(views.placeholder_visible);
    // Actions stay reachable once a policy exists.
    assert!(views.copy.visible && views.reset.visible);
}

#[test]
fn explanation_text_is_kept_verbatim() {
    let text = "Line one.\n\nLine two with *markdown*.";
    assert_eq!(render_explanation(text).text, text);
}
