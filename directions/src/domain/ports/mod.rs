//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod directions_source;
mod route_cache;
mod route_normalizer;

#[cfg(test)]
pub use directions_source::MockDirectionsSource;
pub use directions_source::{
    DirectionsRequest, DirectionsRequestOptions, DirectionsResponse, DirectionsRoute,
    DirectionsSource, DirectionsSourceError, DirectionsStatus, RouteLeg, RouteStep,
};
#[cfg(test)]
pub use route_cache::MockRouteCache;
pub use route_cache::RouteCache;
#[cfg(test)]
pub use route_normalizer::MockRouteNormalizer;
pub use route_normalizer::{RouteNormalizer, RouteNormalizerError};
