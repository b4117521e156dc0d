//! Test utilities for the directions crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`).
//! Only compiled for tests or with the `test-support` feature.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use tokio::sync::Barrier;

use crate::domain::GeoPoint;
use crate::domain::ports::{
    DirectionsRequest, DirectionsResponse, DirectionsRoute, DirectionsSource,
    DirectionsSourceError, DirectionsStatus, RouteLeg, RouteStep,
};

/// Build a point, panicking on invalid test input.
pub fn point(latitude: f64, longitude: f64) -> GeoPoint {
    match GeoPoint::new(latitude, longitude) {
        Ok(point) => point,
        Err(error) => panic!("invalid test point: {error}"),
    }
}

/// Fixed instant used by [`FixedClock::default`].
pub fn sample_instant() -> DateTime<Utc> {
    match Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).single() {
        Some(instant) => instant,
        None => panic!("sample instant must be unambiguous"),
    }
}

/// Clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Default for FixedClock {
    fn default() -> Self {
        Self(sample_instant())
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// A single-leg, single-step `OK` response from `from` to `to`.
pub fn ok_response(from: GeoPoint, to: GeoPoint, distance_metres: u64) -> DirectionsResponse {
    response_with_status(DirectionsStatus::Ok, from, to, distance_metres)
}

/// A single-leg response carrying an arbitrary status.
pub fn response_with_status(
    status: DirectionsStatus,
    from: GeoPoint,
    to: GeoPoint,
    distance_metres: u64,
) -> DirectionsResponse {
    let duration_seconds = distance_metres;
    DirectionsResponse {
        status,
        routes: vec![DirectionsRoute {
            summary: "test route".to_owned(),
            legs: vec![RouteLeg {
                start_location: from,
                end_location: to,
                distance_metres,
                duration_seconds,
                steps: vec![RouteStep {
                    start_location: from,
                    end_location: to,
                    distance_metres,
                    duration_seconds,
                    instructions: "Head north".to_owned(),
                }],
            }],
        }],
    }
}

/// `OVER_QUERY_LIMIT` response without routes.
pub fn over_query_limit_response() -> DirectionsResponse {
    DirectionsResponse {
        status: DirectionsStatus::OverQueryLimit,
        routes: Vec::new(),
    }
}

type ScriptedResult = Result<DirectionsResponse, DirectionsSourceError>;

enum Fallback {
    Fixed(ScriptedResult),
    Echo,
}

/// Directions source replaying scripted results in order.
///
/// Once the script is exhausted every call returns `fallback`. With a
/// barrier attached, each call waits on it before answering so tests can
/// force calls to overlap.
pub struct ScriptedDirectionsSource {
    scripted: Mutex<VecDeque<ScriptedResult>>,
    fallback: Fallback,
    calls: AtomicUsize,
    requests: Mutex<Vec<DirectionsRequest>>,
    barrier: Option<Arc<Barrier>>,
}

impl ScriptedDirectionsSource {
    /// Replay `scripted`, then fail with an invalid-request error.
    pub fn scripted(scripted: Vec<ScriptedResult>) -> Self {
        Self {
            scripted: Mutex::new(scripted.into()),
            fallback: Fallback::Fixed(Err(DirectionsSourceError::invalid_request(
                "source script exhausted unexpectedly",
            ))),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            barrier: None,
        }
    }

    /// Answer every call with `result`.
    pub fn always(result: ScriptedResult) -> Self {
        Self {
            fallback: Fallback::Fixed(result),
            ..Self::scripted(Vec::new())
        }
    }

    /// Answer every call with an `OK` route between the request's endpoints.
    pub fn echoing() -> Self {
        Self {
            fallback: Fallback::Echo,
            ..Self::scripted(Vec::new())
        }
    }

    /// Make every call wait on `barrier` before answering.
    #[must_use]
    pub fn with_barrier(mut self, barrier: Arc<Barrier>) -> Self {
        self.barrier = Some(barrier);
        self
    }

    /// Number of provider calls made.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Requests received, in call order.
    pub fn requests(&self) -> Vec<DirectionsRequest> {
        match self.requests.lock() {
            Ok(requests) => requests.clone(),
            Err(_) => panic!("requests mutex"),
        }
    }

    fn record(&self, request: &DirectionsRequest) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.requests.lock() {
            Ok(mut requests) => requests.push(request.clone()),
            Err(_) => panic!("requests mutex"),
        }
    }

    fn next_result(&self, request: &DirectionsRequest) -> ScriptedResult {
        let scripted = match self.scripted.lock() {
            Ok(mut scripted) => scripted.pop_front(),
            Err(_) => panic!("script mutex"),
        };
        match (scripted, &self.fallback) {
            (Some(result), _) => result,
            (None, Fallback::Fixed(result)) => result.clone(),
            (None, Fallback::Echo) => {
                let query = request.query();
                Ok(ok_response(query.origin(), query.destination(), 100))
            }
        }
    }
}

#[async_trait]
impl DirectionsSource for ScriptedDirectionsSource {
    async fn fetch_directions(
        &self,
        request: &DirectionsRequest,
    ) -> Result<DirectionsResponse, DirectionsSourceError> {
        self.record(request);
        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }
        self.next_result(request)
    }
}
