use thiserror::Error;

/// Local precondition failures. These never reach the network, and their
/// messages are shown to the user verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a prompt")]
    EmptyPrompt,
    #[error("No policy to explain")]
    NoPolicyToExplain,
    #[error("No policy to copy")]
    NoPolicyToCopy,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown risk level '{0}'")]
pub struct UnknownRiskLevel(pub String);

/// A response body that parsed as JSON but reported success without the
/// payload that success requires.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed {endpoint} response: success without `{field}`")]
pub struct MalformedResponse {
    pub endpoint: &'static str,
    pub field: &'static str,
}

impl MalformedResponse {
    pub fn new(endpoint: &'static str, field: &'static str) -> Self {
        Self { endpoint, field }
    }
}
