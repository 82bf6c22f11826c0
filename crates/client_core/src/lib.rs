use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    domain::Policy,
    protocol::{
        ExplainPolicyRequest, ExplainPolicyResponse, GeneratePolicyRequest,
        GeneratePolicyResponse, GeneratedPolicy, HealthResponse, ServiceReply,
        EXPLAIN_POLICY_PATH, GENERATE_POLICY_PATH, HEALTH_PATH,
    },
};
use tracing::debug;
use url::Url;

pub mod error;

pub use error::ClientError;

/// The external policy service, seen from the client.
///
/// `Ok` means the service answered with a readable body, which may still be an
/// application-level failure. `Err` is reserved for transport problems.
#[async_trait]
pub trait PolicyService: Send + Sync {
    async fn generate_policy(
        &self,
        prompt: &str,
    ) -> Result<ServiceReply<GeneratedPolicy>, ClientError>;
    async fn explain_policy(&self, policy: &Policy) -> Result<ServiceReply<String>, ClientError>;
    async fn check_health(&self) -> Result<String, ClientError>;
}

pub struct HttpPolicyService {
    http: Client,
    base_url: Url,
}

impl HttpPolicyService {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &'static str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::InvalidServiceUrl {
                url: self.base_url.to_string(),
                reason: err.to_string(),
            })
    }

    async fn post_json<B, R>(&self, path: &'static str, body: &B) -> Result<R, ClientError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .http
            .post(self.endpoint(path)?)
            .json(body)
            .send()
            .await
            .map_err(|source| ClientError::Request {
                endpoint: path,
                source,
            })?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|source| ClientError::Request {
                endpoint: path,
                source,
            })?;

        match serde_json::from_slice::<R>(&bytes) {
            Ok(parsed) => {
                if !status.is_success() {
                    debug!(
                        endpoint = path,
                        status = status.as_u16(),
                        "service replied with a non-success status and a readable body"
                    );
                }
                Ok(parsed)
            }
            Err(_) if !status.is_success() => Err(ClientError::Status {
                endpoint: path,
                status: status.as_u16(),
            }),
            Err(source) => Err(ClientError::Decode {
                endpoint: path,
                source,
            }),
        }
    }
}

#[async_trait]
impl PolicyService for HttpPolicyService {
    async fn generate_policy(
        &self,
        prompt: &str,
    ) -> Result<ServiceReply<GeneratedPolicy>, ClientError> {
        let body: GeneratePolicyResponse = self
            .post_json(
                GENERATE_POLICY_PATH,
                &GeneratePolicyRequest {
                    prompt: prompt.to_string(),
                },
            )
            .await?;
        Ok(body.into_reply()?)
    }

    async fn explain_policy(&self, policy: &Policy) -> Result<ServiceReply<String>, ClientError> {
        let body: ExplainPolicyResponse = self
            .post_json(
                EXPLAIN_POLICY_PATH,
                &ExplainPolicyRequest {
                    policy: policy.clone(),
                },
            )
            .await?;
        Ok(body.into_reply()?)
    }

    async fn check_health(&self) -> Result<String, ClientError> {
        let request_error = |source: reqwest::Error| ClientError::Request {
            endpoint: HEALTH_PATH,
            source,
        };
        let body: HealthResponse = self
            .http
            .get(self.endpoint(HEALTH_PATH)?)
            .send()
            .await
            .map_err(request_error)?
            .error_for_status()
            .map_err(request_error)?
            .json()
            .await
            .map_err(request_error)?;
        Ok(body.status)
    }
}

/// Parses the service base URL and makes sure relative endpoint joins keep
/// any path prefix (`http://host/api` -> `http://host/api/generate-policy`).
fn normalize_base_url(raw: &str) -> Result<Url, ClientError> {
    let invalid = |reason: String| ClientError::InvalidServiceUrl {
        url: raw.to_string(),
        reason,
    };
    let mut url = Url::parse(raw.trim()).map_err(|err| invalid(err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
