//! HTTP client for the Shopify Admin GraphQL API.

mod endpoint;
mod operations;

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use shopsync_core::AppConfig;

use crate::error::AdminError;
use crate::types::{Envelope, GraphqlResponse};

pub use endpoint::admin_graphql_endpoint;

/// Per-request timeout. Fixed; there is no per-operation override.
const REQUEST_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;
const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Client for one store's Admin GraphQL endpoint.
///
/// Every remote operation funnels through [`AdminClient::execute`]. Two
/// failure channels are kept apart:
///
/// - `Err(AdminError)`: the call itself failed (network, timeout, non-2xx,
///   unreadable body). Callers should abandon whatever they were doing.
/// - `Ok(GraphqlResponse::Errors(..))`: the server answered but rejected the
///   document. HTTP 200 with an `errors` array is not success.
///
/// Nothing is retried.
pub struct AdminClient {
    client: Client,
    endpoint: Url,
    access_token: String,
}

impl AdminClient {
    /// Creates a client for `store` at the given API version.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::InvalidEndpoint`] if the derived endpoint is not
    /// a valid URL, or [`AdminError::Http`] if the `reqwest::Client` cannot be
    /// constructed.
    pub fn new(store: &str, access_token: &str, api_version: &str) -> Result<Self, AdminError> {
        Self::with_endpoint(&admin_graphql_endpoint(store, api_version), access_token)
    }

    /// Creates a client from the process configuration.
    ///
    /// # Errors
    ///
    /// See [`AdminClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, AdminError> {
        Self::new(&config.store, &config.access_token, &config.api_version)
    }

    /// Creates a client posting to an explicit endpoint URL (for testing with
    /// wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::InvalidEndpoint`] if `endpoint` is not a valid
    /// URL, or [`AdminError::Http`] if the `reqwest::Client` cannot be
    /// constructed.
    pub fn with_endpoint(endpoint: &str, access_token: &str) -> Result<Self, AdminError> {
        let endpoint = Url::parse(endpoint).map_err(|e| AdminError::InvalidEndpoint {
            endpoint: endpoint.to_owned(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .user_agent(concat!("shopsync/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint,
            access_token: access_token.to_owned(),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Submits one GraphQL document with its variables.
    ///
    /// # Errors
    ///
    /// - [`AdminError::Http`] on network failure or timeout.
    /// - [`AdminError::UnexpectedStatus`] on any non-2xx status.
    /// - [`AdminError::Deserialize`] if the body is not JSON or `data` does
    ///   not match `T`.
    /// - [`AdminError::MissingData`] if the body has neither `data` nor `errors`.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        document: &str,
        variables: Value,
    ) -> Result<GraphqlResponse<T>, AdminError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .json(&json!({ "query": document, "variables": variables }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdminError::UnexpectedStatus {
                status: status.as_u16(),
                endpoint: self.endpoint.to_string(),
            });
        }

        let body = response.text().await?;
        let envelope: Envelope =
            serde_json::from_str(&body).map_err(|e| AdminError::Deserialize {
                context: format!("GraphQL response from {}", self.endpoint),
                source: e,
            })?;

        if !envelope.errors.is_empty() {
            tracing::debug!(
                count = envelope.errors.len(),
                first = %envelope.errors[0].message,
                "GraphQL errors in response"
            );
            return Ok(GraphqlResponse::Errors(envelope.errors));
        }

        let data = envelope
            .data
            .filter(|d| !d.is_null())
            .ok_or_else(|| AdminError::MissingData {
                endpoint: self.endpoint.to_string(),
            })?;

        serde_json::from_value(data)
            .map(GraphqlResponse::Data)
            .map_err(|e| AdminError::Deserialize {
                context: format!("GraphQL data from {}", self.endpoint),
                source: e,
            })
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
