//! Blocking GraphQL transport for the credential API.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::error::{AppError, AppResult};

/// One GraphQL call: a query document plus its variables.
#[derive(Debug, Clone, Serialize)]
pub struct GraphqlRequest {
    pub query: String,
    pub variables: JsonValue,
}

impl GraphqlRequest {
    pub fn new(query: &str, variables: JsonValue) -> Self {
        Self {
            query: query.to_string(),
            variables,
        }
    }
}

/// HTTP client for the GraphQL credential API.
///
/// Owned by whoever needs it and passed down explicitly; reqwest pools
/// connections internally, so cloning shares the pool.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::blocking::Client,
    url: String,
}

impl ApiClient {
    pub fn new(url: &str, timeout: Duration) -> AppResult<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .use_rustls_tls()
            .build()
            .map_err(|e| AppError::Configuration {
                key: "api.url".to_string(),
                source: anyhow::Error::from(e),
            })?;

        Ok(Self {
            http,
            url: url.to_string(),
        })
    }

    /// Sends one request and returns the response `data` object.
    ///
    /// GraphQL transports failures in-band: a 200 response can still carry
    /// an `errors` array, which counts as a failed call here.
    pub fn execute(
        &self,
        auth_token: &str,
        operation: &str,
        request: &GraphqlRequest,
    ) -> AppResult<JsonValue> {
        debug!(operation, "Calling credential API");

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(auth_token)
            .json(request)
            .send()
            .map_err(|e| AppError::Api {
                operation: operation.to_string(),
                source: anyhow::Error::from(e),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Api {
                operation: operation.to_string(),
                source: anyhow::anyhow!("API returned HTTP {}", status),
            });
        }

        let body: JsonValue = response.json().map_err(|e| AppError::Api {
            operation: operation.to_string(),
            source: anyhow::Error::from(e),
        })?;

        if let Some(errors) = body.get("errors").and_then(JsonValue::as_array) {
            if !errors.is_empty() {
                return Err(AppError::Api {
                    operation: operation.to_string(),
                    source: anyhow::anyhow!(
                        "API returned errors: {}",
                        JsonValue::Array(errors.clone())
                    ),
                });
            }
        }

        Ok(body.get("data").cloned().unwrap_or(JsonValue::Null))
    }
}
