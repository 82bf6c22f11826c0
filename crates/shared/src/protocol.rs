use serde::{Deserialize, Serialize};

use crate::{
    domain::{null_as_default, Policy, RiskAnalysis},
    error::MalformedResponse,
};

pub const GENERATE_POLICY_PATH: &str = "generate-policy";
pub const EXPLAIN_POLICY_PATH: &str = "explain-policy";
pub const HEALTH_PATH: &str = "health";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratePolicyRequest {
    pub prompt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplainPolicyRequest {
    pub policy: Policy,
}

/// Body of `POST /generate-policy` as the service sends it.
///
/// A missing `success` flag counts as failure; the reference service omits it
/// on its 400 responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratePolicyResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<Policy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_analysis: Option<RiskAnalysis>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExplainPolicyResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPolicy {
    pub policy: Policy,
    pub risk_analysis: RiskAnalysis,
}

/// Application-level outcome of a service call that reached the service and
/// came back with a readable body.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceReply<T> {
    Success(T),
    Failure { error: Option<String> },
}

impl GeneratePolicyResponse {
    pub fn into_reply(self) -> Result<ServiceReply<GeneratedPolicy>, MalformedResponse> {
        if !self.success {
            return Ok(ServiceReply::Failure { error: self.error });
        }
        let policy = self
            .policy
            .ok_or_else(|| MalformedResponse::new("/generate-policy", "policy"))?;
        let risk_analysis = self
            .risk_analysis
            .ok_or_else(|| MalformedResponse::new("/generate-policy", "risk_analysis"))?;
        Ok(ServiceReply::Success(GeneratedPolicy {
            policy,
            risk_analysis,
        }))
    }
}

impl ExplainPolicyResponse {
    pub fn into_reply(self) -> Result<ServiceReply<String>, MalformedResponse> {
        if !self.success {
            return Ok(ServiceReply::Failure { error: self.error });
        }
        self.explanation
            .map(ServiceReply::Success)
            .ok_or_else(|| MalformedResponse::new("/explain-policy", "explanation"))
    }
}
