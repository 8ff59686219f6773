//! HTTP client for Trello API requests.
//!
//! This module provides the low-level client that sends one request per
//! `Endpoint`, attaches the API key and access token as query parameters, and
//! classifies the outcome as decoded JSON or a `FetchError`.

use super::{Endpoint, FetchError};
use log::*;
use serde_json::Value;

/// Issues single API calls on behalf of the navigation core.
///
/// Implementations make exactly one network attempt per call and never retry.
///
#[allow(async_fn_in_trait)]
pub trait Fetch {
    /// Returns true when credentials are available for requests.
    ///
    fn is_configured(&self) -> bool;

    /// Perform the call described by the endpoint and return the decoded body.
    ///
    async fn fetch(&self, endpoint: &Endpoint) -> Result<Value, FetchError>;
}

/// Makes requests to Trello and returns the decoded JSON payload.
///
pub struct TrelloClient {
    api_key: Option<String>,
    access_token: Option<String>,
    base_url: String,
    http_client: reqwest::Client,
}

impl TrelloClient {
    /// Returns a new instance for the given credentials and base URL.
    ///
    pub fn new(api_key: Option<&str>, access_token: Option<&str>, base_url: &str) -> Self {
        TrelloClient {
            api_key: api_key.filter(|k| !k.is_empty()).map(str::to_owned),
            access_token: access_token.filter(|t| !t.is_empty()).map(str::to_owned),
            base_url: base_url.trim_end_matches('/').to_owned(),
            http_client: reqwest::Client::new(),
        }
    }
}

impl Fetch for TrelloClient {
    fn is_configured(&self) -> bool {
        self.api_key.is_some() && self.access_token.is_some()
    }

    async fn fetch(&self, endpoint: &Endpoint) -> Result<Value, FetchError> {
        let (key, token) = match (&self.api_key, &self.access_token) {
            (Some(key), Some(token)) => (key, token),
            _ => return Err(FetchError::other("Access token not configured")),
        };
        let request_url = format!("{}/{}", self.base_url, endpoint.path);
        debug!("{} {} {:?}", endpoint.method, request_url, endpoint.params);

        let response = self
            .http_client
            .request(endpoint.method.clone(), &request_url)
            .query(&endpoint.params)
            .query(&[("key", key.as_str()), ("token", token.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let response_text = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("Unable to read response"));
            error!(
                "API request to {} failed with status {}: {}",
                endpoint.path, status, response_text
            );
            return Err(FetchError::status(status.as_u16(), &response_text));
        }

        let response_bytes = response.bytes().await?;
        if response_bytes.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice::<Value>(&response_bytes).map_err(|e| {
            error!(
                "Failed to decode response from {}: {}. Response body: {}",
                endpoint.path,
                e,
                String::from_utf8_lossy(&response_bytes)
            );
            FetchError::from(e)
        })
    }
}
