//! Directions configuration loaded via OrthoConfig.
//!
//! Values come from `DIRECTIONS_*` environment variables or a configuration
//! file, and are read once when the service is wired.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::domain::ports::DirectionsRequestOptions;
use crate::domain::{DirectionsServiceConfig, TravelMode, TravelModeValidationError};
use crate::outbound::google::DEFAULT_BASE_URL;

const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

/// Errors raised while turning settings into runtime configuration.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// `base_url` is not an absolute URL.
    #[error("invalid directions base URL {value:?}: {source}")]
    InvalidBaseUrl {
        /// Rejected value.
        value: String,
        /// Parser failure.
        source: url::ParseError,
    },
    /// `travel_mode` failed validation.
    #[error("invalid travel mode: {0}")]
    InvalidTravelMode(#[from] TravelModeValidationError),
}

/// Configuration values controlling the directions service and adapter.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DIRECTIONS")]
pub struct DirectionsSettings {
    /// Consult and populate the in-process route cache.
    #[ortho_config(default = true)]
    pub cache_enabled: bool,
    /// Provider API key.
    pub api_key: Option<String>,
    /// Routing heuristic forwarded as `mode`.
    pub travel_mode: Option<String>,
    /// Provider base URL override.
    pub base_url: Option<String>,
    /// HTTP request timeout override in seconds.
    pub request_timeout_seconds: Option<u64>,
}

impl DirectionsSettings {
    /// Return the provider base URL, falling back to the public API.
    ///
    /// A trailing `/` is added when missing so relative joins keep the path.
    pub fn base_url(&self) -> Result<Url, SettingsError> {
        let raw = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let normalised = if raw.ends_with('/') {
            raw.to_owned()
        } else {
            format!("{raw}/")
        };
        Url::parse(&normalised).map_err(|source| SettingsError::InvalidBaseUrl {
            value: raw.to_owned(),
            source,
        })
    }

    /// Return the HTTP request timeout, falling back to the default.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_seconds
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECONDS)
                .max(1),
        )
    }

    /// Build the service configuration, validating the travel mode.
    ///
    /// Blank API keys and travel modes are treated as unset.
    pub fn service_config(&self) -> Result<DirectionsServiceConfig, SettingsError> {
        let travel_mode = self
            .travel_mode
            .as_deref()
            .filter(|mode| !mode.trim().is_empty())
            .map(TravelMode::new)
            .transpose()?;
        let api_key = self
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty());

        Ok(DirectionsServiceConfig {
            cache_enabled: self.cache_enabled,
            request_options: DirectionsRequestOptions {
                api_key,
                travel_mode,
            },
        })
    }
}
