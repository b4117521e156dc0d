//! Driven port for fetching turn-by-turn directions from a remote provider.
//!
//! The domain owns the request descriptor and the decoded response shape so
//! the orchestration service and cache stay adapter-agnostic.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{GeoPoint, ModeSwitchSignal, RouteQuery, TravelMode};

/// Provider credentials and routing options applied to every request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectionsRequestOptions {
    /// Provider API key. Blank keys are not forwarded.
    pub api_key: Option<String>,
    /// Routing heuristic, e.g. `walking`.
    pub travel_mode: Option<TravelMode>,
}

/// Request descriptor handed to a [`DirectionsSource`].
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionsRequest {
    query: RouteQuery,
    api_key: Option<String>,
    travel_mode: Option<TravelMode>,
}

impl DirectionsRequest {
    /// Combine a query with the configured provider options.
    ///
    /// # Examples
    /// ```
    /// use directions::domain::ports::{DirectionsRequest, DirectionsRequestOptions};
    /// use directions::domain::{GeoPoint, RouteQuery};
    ///
    /// let p = |lat, lng| GeoPoint::new(lat, lng).expect("valid point");
    /// let options = DirectionsRequestOptions {
    ///     api_key: Some(String::new()),
    ///     travel_mode: None,
    /// };
    /// let request = DirectionsRequest::new(RouteQuery::new(p(0.0, 0.0), vec![], p(1.0, 1.0)), &options);
    /// assert_eq!(request.api_key(), None);
    /// ```
    pub fn new(query: RouteQuery, options: &DirectionsRequestOptions) -> Self {
        Self {
            query,
            api_key: options
                .api_key
                .as_ref()
                .filter(|key| !key.trim().is_empty())
                .cloned(),
            travel_mode: options.travel_mode.clone(),
        }
    }

    /// Query being resolved.
    pub const fn query(&self) -> &RouteQuery {
        &self.query
    }

    /// Non-blank API key, if configured.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Routing heuristic, if configured.
    pub const fn travel_mode(&self) -> Option<&TravelMode> {
        self.travel_mode.as_ref()
    }

    /// Recover the query once the request has been sent.
    pub fn into_query(self) -> RouteQuery {
        self.query
    }
}

/// Provider status carried in every response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectionsStatus {
    /// `OK`
    Ok,
    /// `OVER_QUERY_LIMIT`: quota exhausted, the response must not be cached.
    OverQueryLimit,
    /// Any other provider status (`ZERO_RESULTS`, `NOT_FOUND`, ...).
    Other(String),
}

impl DirectionsStatus {
    /// Classify a raw status string.
    ///
    /// ```
    /// use directions::domain::ports::DirectionsStatus;
    ///
    /// assert_eq!(DirectionsStatus::parse("OVER_QUERY_LIMIT"), DirectionsStatus::OverQueryLimit);
    /// assert_eq!(DirectionsStatus::parse("ZERO_RESULTS").as_str(), "ZERO_RESULTS");
    /// ```
    pub fn parse(raw: &str) -> Self {
        match raw {
            "OK" => Self::Ok,
            "OVER_QUERY_LIMIT" => Self::OverQueryLimit,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Wire representation.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ok => "OK",
            Self::OverQueryLimit => "OVER_QUERY_LIMIT",
            Self::Other(raw) => raw.as_str(),
        }
    }

    /// Whether the provider refused the call for quota reasons.
    pub const fn is_over_query_limit(&self) -> bool {
        matches!(self, Self::OverQueryLimit)
    }
}

/// One manoeuvre within a leg.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteStep {
    /// Where the step begins.
    pub start_location: GeoPoint,
    /// Where the step ends.
    pub end_location: GeoPoint,
    /// Step length in metres.
    pub distance_metres: u64,
    /// Expected travel time in seconds.
    pub duration_seconds: u64,
    /// Provider-formatted instruction text.
    pub instructions: String,
}

/// Route section between two consecutive stops.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteLeg {
    /// Leg start.
    pub start_location: GeoPoint,
    /// Leg end.
    pub end_location: GeoPoint,
    /// Leg length in metres.
    pub distance_metres: u64,
    /// Expected travel time in seconds.
    pub duration_seconds: u64,
    /// Ordered steps.
    pub steps: Vec<RouteStep>,
}

/// One candidate route.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionsRoute {
    /// Short provider description, e.g. the main road name.
    pub summary: String,
    /// Legs in visiting order; one more than the number of waypoints.
    pub legs: Vec<RouteLeg>,
}

/// Decoded provider payload. Stored in the cache as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionsResponse {
    /// Provider status.
    pub status: DirectionsStatus,
    /// Candidate routes, best first.
    pub routes: Vec<DirectionsRoute>,
}

define_port_error! {
    /// Errors surfaced while calling the directions provider.
    pub enum DirectionsSourceError {
        /// Network transport failed before receiving a response.
        Transport { message: String } =>
            "directions transport failed: {message}",
        /// Provider call exceeded its timeout.
        Timeout { message: String } =>
            "directions timeout: {message}",
        /// Provider rate-limited the request at the HTTP layer.
        RateLimited { message: String } =>
            "directions rate limited request: {message}",
        /// Provider response could not be decoded.
        Decode { message: String } =>
            "directions response decode failed: {message}",
        /// Adapter or provider rejected the request.
        InvalidRequest { message: String } =>
            "directions request invalid: {message}",
        /// A session rule asked the caller to switch mode mid-request.
        ModeSwitch { rule: String } =>
            "directions interrupted by mode switch rule {rule}",
    }
}

impl DirectionsSourceError {
    /// Return the control-flow signal carried by this error, if any.
    pub fn control_signal(&self) -> Option<ModeSwitchSignal> {
        match self {
            Self::ModeSwitch { rule } => Some(ModeSwitchSignal::new(rule.as_str())),
            _ => None,
        }
    }
}

/// Port for resolving directions against a remote provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectionsSource: Send + Sync {
    /// Fetch directions for one request descriptor.
    ///
    /// Provider-level statuses (including `OVER_QUERY_LIMIT`) are returned in
    /// [`DirectionsResponse::status`]; only transport, HTTP, and decode
    /// failures are errors.
    async fn fetch_directions(
        &self,
        request: &DirectionsRequest,
    ) -> Result<DirectionsResponse, DirectionsSourceError>;
}
