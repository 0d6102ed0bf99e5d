use crate::core::errors::GatewayError;
use crate::core::kernel::signer::RequestSigner;
use crate::core::types::{ParamSet, SignedRequest};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{error, instrument, trace};

/// Transport trait for issuing gateway calls
///
/// The action facade delegates every remote call through this seam, and
/// tests inject their own implementation to capture what would go over the
/// wire.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue `action` with `params` and return the unwrapped response value.
    async fn call(&self, action: &str, params: ParamSet) -> Result<Value, GatewayError>;
}

/// Configuration for the HTTP transport
#[derive(Clone, Debug)]
pub struct TransportConfig {
    /// Full URL of the gateway endpoint
    pub endpoint: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string to include in requests
    pub user_agent: String,
}

impl TransportConfig {
    pub fn new(endpoint: String) -> Self {
        Self {
            endpoint,
            timeout_seconds: 30,
            user_agent: "GsgClient/0.1".to_string(),
        }
    }

    /// Set the request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Set the user agent string
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }
}

/// Implementation of `Transport` using reqwest
///
/// One best-effort POST per call; failures are mapped to their
/// [`GatewayError`] category, logged, and returned. No retries.
pub struct ReqwestTransport {
    client: Client,
    config: TransportConfig,
    signer: RequestSigner,
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ReqwestTransport {
    /// Create a new transport for the configured endpoint
    pub fn new(config: TransportConfig, signer: RequestSigner) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| GatewayError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config,
            signer,
        })
    }

    /// Current UTC time in whole seconds since epoch
    fn unix_timestamp() -> Result<u64, GatewayError> {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .map_err(|e| GatewayError::Other(format!("Failed to get timestamp: {}", e)))
    }

    /// Extract the payload from a gateway reply: the first element of the
    /// top-level `response` array.
    fn unwrap_response(value: Value) -> Result<Value, GatewayError> {
        match value {
            Value::Object(mut map) => match map.remove("response") {
                Some(Value::Array(mut items)) if !items.is_empty() => Ok(items.remove(0)),
                Some(Value::Array(_)) => Err(GatewayError::Decode(
                    "Empty response array in gateway reply".to_string(),
                )),
                Some(other) => Err(GatewayError::Decode(format!(
                    "Unexpected response shape: {}",
                    other
                ))),
                None => Err(GatewayError::Decode(
                    "Missing response key in gateway reply".to_string(),
                )),
            },
            other => Err(GatewayError::Decode(format!(
                "Gateway reply is not a JSON object: {}",
                other
            ))),
        }
    }

    async fn handle_response(&self, response: Response) -> Result<Value, GatewayError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Network(format!("Failed to read response body: {}", e)))?;

        trace!(status = %status, "Response body: {}", body);

        if !status.is_success() {
            return Err(GatewayError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let value: Value = serde_json::from_str(&body)
            .map_err(|e| GatewayError::Decode(format!("Failed to parse JSON response: {}", e)))?;

        Self::unwrap_response(value)
    }

    async fn execute(&self, action: &str, params: ParamSet) -> Result<Value, GatewayError> {
        let timestamp = Self::unix_timestamp()?;
        let envelope = self.signer.build_envelope(action, params, timestamp);

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&SignedRequest { request: envelope })
            .send()
            .await
            .map_err(|e| GatewayError::from_transport(&e))?;

        self.handle_response(response).await
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[instrument(skip(self, params), fields(endpoint = %self.config.endpoint, action = %action, param_count = params.len()))]
    async fn call(&self, action: &str, params: ParamSet) -> Result<Value, GatewayError> {
        match self.execute(action, params).await {
            Ok(value) => Ok(value),
            Err(err) => {
                error!("Gateway call failed: {}", err);
                Err(err)
            }
        }
    }
}
