//! Reqwest-backed Directions API source adapter.
//!
//! This adapter owns transport details only: query serialisation, timeout and
//! HTTP error mapping, and JSON decoding into the domain response. Provider
//! statuses such as `OVER_QUERY_LIMIT` arrive inside a 200 body and are passed
//! through for the domain service to act on.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use thiserror::Error;
use tracing::debug;

use super::dto::DirectionsResponseDto;
use super::query::query_parameters;
use crate::domain::ports::{
    DirectionsRequest, DirectionsResponse, DirectionsSource, DirectionsSourceError,
};

/// Default Directions API base URL. Must end with `/`.
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/";
const DIRECTIONS_PATH: &str = "directions/json";

/// Errors raised while constructing [`GoogleDirectionsHttpSource`].
#[derive(Debug, Error)]
pub enum GoogleDirectionsSourceBuildError {
    /// The endpoint could not be derived from the base URL.
    #[error("invalid directions endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Directions source that performs HTTP GET requests against one endpoint.
pub struct GoogleDirectionsHttpSource {
    client: Client,
    endpoint: Url,
}

impl GoogleDirectionsHttpSource {
    /// Build an adapter for `base_url` with an explicit request timeout.
    /// ```rust,ignore
    /// let source = GoogleDirectionsHttpSource::new(base_url, Duration::from_secs(30))?;
    /// ```
    /// # Errors
    ///
    /// Returns an error when the endpoint URL cannot be joined or the reqwest
    /// client cannot be constructed.
    pub fn new(base_url: &Url, timeout: Duration) -> Result<Self, GoogleDirectionsSourceBuildError> {
        let endpoint = directions_endpoint(base_url)?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    /// Fully-qualified endpoint requests are sent to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl DirectionsSource for GoogleDirectionsHttpSource {
    async fn fetch_directions(
        &self,
        request: &DirectionsRequest,
    ) -> Result<DirectionsResponse, DirectionsSourceError> {
        let parameters = query_parameters(request);
        let response = self
            .client
            .get(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&parameters)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        parse_directions(body.as_ref())
    }
}

fn directions_endpoint(base_url: &Url) -> Result<Url, url::ParseError> {
    base_url.join(DIRECTIONS_PATH)
}

fn parse_directions(body: &[u8]) -> Result<DirectionsResponse, DirectionsSourceError> {
    let decoded: DirectionsResponseDto = serde_json::from_slice(body).map_err(|error| {
        DirectionsSourceError::decode(format!("invalid directions JSON payload: {error}"))
    })?;
    if let Some(message) = decoded.error_message.as_deref() {
        debug!(status = decoded.status.as_str(), %message, "directions provider reported an error");
    }
    decoded.into_domain().map_err(DirectionsSourceError::decode)
}

fn map_transport_error(error: reqwest::Error) -> DirectionsSourceError {
    if error.is_timeout() {
        DirectionsSourceError::timeout(error.to_string())
    } else {
        DirectionsSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> DirectionsSourceError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::TOO_MANY_REQUESTS => DirectionsSourceError::rate_limited(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            DirectionsSourceError::timeout(message)
        }
        _ if status.is_client_error() => DirectionsSourceError::invalid_request(message),
        _ => DirectionsSourceError::transport(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
