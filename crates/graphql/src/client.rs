//! reqwest-backed GraphQL executor.

use std::time::Duration;

use async_trait::async_trait;
use ayah_core::graphql::GraphQlRequest;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;

/// Default timeout for a single upstream call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from the upstream GraphQL service. Every variant is an upstream
/// failure from the point of view of the HTTP endpoints.
#[derive(Debug, thiserror::Error)]
pub enum GraphQlError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("GraphQL endpoint error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response carried a non-empty `errors` array.
    #[error("GraphQL errors: {}", .0.join("; "))]
    Graphql(Vec<String>),

    /// The response had neither `errors` nor `data`.
    #[error("GraphQL response contained no data")]
    MissingData,
}

/// Executes GraphQL operations on behalf of an authenticated caller.
#[async_trait]
pub trait GraphQlExecutor: Send + Sync {
    /// Run `request` with `bearer_token` as the credential and return the
    /// `data` member of the response.
    async fn execute(
        &self,
        request: &GraphQlRequest,
        bearer_token: &str,
    ) -> Result<serde_json::Value, GraphQlError>;
}

/// HTTP client for a single GraphQL endpoint.
pub struct GraphQlClient {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<serde_json::Value>,
    #[serde(default)]
    errors: Vec<GraphQlErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorEntry {
    message: String,
}

impl GraphQlClient {
    /// Create a client whose every call is bounded by `timeout`.
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self, GraphQlError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Unwrap the `{ data, errors }` envelope.
    fn into_data(response: GraphQlResponse) -> Result<serde_json::Value, GraphQlError> {
        if !response.errors.is_empty() {
            return Err(GraphQlError::Graphql(
                response.errors.into_iter().map(|e| e.message).collect(),
            ));
        }
        match response.data {
            Some(data) if !data.is_null() => Ok(data),
            _ => Err(GraphQlError::MissingData),
        }
    }
}

#[async_trait]
impl GraphQlExecutor for GraphQlClient {
    async fn execute(
        &self,
        request: &GraphQlRequest,
        bearer_token: &str,
    ) -> Result<serde_json::Value, GraphQlError> {
        tracing::debug!(operation = request.operation_name, "Sending GraphQL operation");

        let response = self
            .client
            .post(&self.endpoint)
            .header(AUTHORIZATION, format!("Bearer {bearer_token}"))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GraphQlError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let envelope = response.json::<GraphQlResponse>().await?;
        Self::into_data(envelope)
    }
}
