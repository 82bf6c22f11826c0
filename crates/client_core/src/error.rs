use shared::error::MalformedResponse;
use thiserror::Error;

/// Transport-level failures talking to the policy service.
///
/// Anything that prevents the client from obtaining a readable reply lands
/// here. Replies with `success: false` are not errors at this layer.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid service url '{url}': {reason}")]
    InvalidServiceUrl { url: String, reason: String },
    #[error("request to {endpoint} failed: {source}")]
    Request {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} returned HTTP {status} with an unreadable body")]
    Status { endpoint: &'static str, status: u16 },
    #[error("{endpoint} returned an unparsable body: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Malformed(#[from] MalformedResponse),
}
