//! Caller-facing walk representation and the default step normaliser.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::ports::{DirectionsRoute, RouteNormalizer, RouteNormalizerError};
use super::{GeoPoint, ResolvedDirections};

/// A walkable path derived from a provider route.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Walk {
    /// Points to visit in order, consecutive duplicates removed.
    pub points: Vec<GeoPoint>,
    /// Total length in metres.
    pub distance_metres: u64,
    /// Total expected duration in seconds.
    pub duration_seconds: u64,
    /// When the provider was called for this route.
    pub requested_at: DateTime<Utc>,
    /// Whether the route came from the cache.
    pub from_cache: bool,
}

/// Builds a [`Walk`] from the first route's step boundaries.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepWalkNormalizer;

impl RouteNormalizer for StepWalkNormalizer {
    fn normalize(&self, resolved: &ResolvedDirections) -> Result<Walk, RouteNormalizerError> {
        let entry = resolved.entry();
        let route = entry
            .response()
            .routes
            .first()
            .ok_or_else(RouteNormalizerError::no_route)?;
        if route.legs.is_empty() {
            return Err(RouteNormalizerError::malformed("route has no legs"));
        }

        Ok(Walk {
            points: route_points(route),
            distance_metres: route.legs.iter().map(|leg| leg.distance_metres).sum(),
            duration_seconds: route.legs.iter().map(|leg| leg.duration_seconds).sum(),
            requested_at: entry.fetched_at(),
            from_cache: resolved.served_from_cache(),
        })
    }
}

fn route_points(route: &DirectionsRoute) -> Vec<GeoPoint> {
    let mut points: Vec<GeoPoint> = Vec::new();
    let mut push = |point: GeoPoint| {
        if points.last() != Some(&point) {
            points.push(point);
        }
    };

    for leg in &route.legs {
        match leg.steps.first() {
            None => {
                push(leg.start_location);
                push(leg.end_location);
            }
            Some(first) => {
                push(first.start_location);
                for step in &leg.steps {
                    push(step.end_location);
                }
            }
        }
    }
    points
}
