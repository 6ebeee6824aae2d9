//! Operations endpoint client
//!
//! The runtime exposes an internal operations API; the only call this
//! layer makes is posting the aggregated trigger list.

use serde_json::Value;
use tracing::debug;

use super::HostError;

/// Client for the runtime's operations endpoint
pub trait OperationsClient {
    /// POST a JSON body to a relative path under the operations base URL
    fn post(
        &self,
        path: &str,
        body: &Value,
    ) -> impl Future<Output = Result<(), HostError>> + Send;
}

/// HTTP implementation over `reqwest`
#[derive(Debug, Clone)]
pub struct HttpOperationsClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpOperationsClient {
    /// Create a client for the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

impl OperationsClient for HttpOperationsClient {
    async fn post(&self, path: &str, body: &Value) -> Result<(), HostError> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), path);
        debug!(%url, "posting to operations endpoint");

        let response = self.http_client.post(&url).json(body).send().await?;
        if !response.status().is_success() {
            return Err(HostError::Operations {
                status: response.status().as_u16(),
            });
        }
        Ok(())
    }
}
