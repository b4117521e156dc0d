//! DTOs for decoding Directions API JSON responses.
//!
//! The adapter decodes into these transport DTOs first, then maps into the
//! domain `DirectionsResponse` in one pass, validating coordinates on the way.

use serde::Deserialize;

use crate::domain::GeoPoint;
use crate::domain::ports::{
    DirectionsResponse, DirectionsRoute, DirectionsStatus, RouteLeg, RouteStep,
};

#[derive(Debug, Deserialize)]
pub(super) struct DirectionsResponseDto {
    pub(super) status: String,
    #[serde(default)]
    pub(super) error_message: Option<String>,
    #[serde(default)]
    routes: Vec<RouteDto>,
}

#[derive(Debug, Deserialize)]
struct RouteDto {
    #[serde(default)]
    summary: String,
    #[serde(default)]
    legs: Vec<LegDto>,
}

#[derive(Debug, Deserialize)]
struct LegDto {
    start_location: LatLngDto,
    end_location: LatLngDto,
    #[serde(default)]
    distance: Option<QuantityDto>,
    #[serde(default)]
    duration: Option<QuantityDto>,
    #[serde(default)]
    steps: Vec<StepDto>,
}

#[derive(Debug, Deserialize)]
struct StepDto {
    start_location: LatLngDto,
    end_location: LatLngDto,
    #[serde(default)]
    distance: Option<QuantityDto>,
    #[serde(default)]
    duration: Option<QuantityDto>,
    #[serde(default)]
    html_instructions: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct LatLngDto {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct QuantityDto {
    value: u64,
}

impl DirectionsResponseDto {
    pub(super) fn into_domain(self) -> Result<DirectionsResponse, String> {
        let routes = self
            .routes
            .into_iter()
            .map(RouteDto::into_domain)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(DirectionsResponse {
            status: DirectionsStatus::parse(&self.status),
            routes,
        })
    }
}

impl RouteDto {
    fn into_domain(self) -> Result<DirectionsRoute, String> {
        let legs = self
            .legs
            .into_iter()
            .map(LegDto::into_domain)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(DirectionsRoute {
            summary: self.summary,
            legs,
        })
    }
}

impl LegDto {
    fn into_domain(self) -> Result<RouteLeg, String> {
        let steps = self
            .steps
            .into_iter()
            .map(StepDto::into_domain)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(RouteLeg {
            start_location: self.start_location.into_domain()?,
            end_location: self.end_location.into_domain()?,
            distance_metres: quantity(self.distance),
            duration_seconds: quantity(self.duration),
            steps,
        })
    }
}

impl StepDto {
    fn into_domain(self) -> Result<RouteStep, String> {
        Ok(RouteStep {
            start_location: self.start_location.into_domain()?,
            end_location: self.end_location.into_domain()?,
            distance_metres: quantity(self.distance),
            duration_seconds: quantity(self.duration),
            instructions: self.html_instructions,
        })
    }
}

impl LatLngDto {
    fn into_domain(self) -> Result<GeoPoint, String> {
        GeoPoint::new(self.lat, self.lng).map_err(|error| error.to_string())
    }
}

fn quantity(value: Option<QuantityDto>) -> u64 {
    value.map_or(0, |quantity| quantity.value)
}
