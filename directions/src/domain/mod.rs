//! Domain primitives, services, and ports.
//!
//! Purpose: model directions queries and their similarity-keyed cache
//! independently of any provider. Types here are immutable once built; the
//! only shared mutable state is behind the [`ports::RouteCache`] port.
//!
//! Public surface:
//! - `GeoPoint`, `RouteQuery`: validated coordinates and query identity.
//! - `CacheEntry`, `ResolvedDirections`: cached payloads and provenance.
//! - `Walk`, `StepWalkNormalizer`: caller-facing route and its builder.
//! - `DirectionsService`: cache-fronted orchestration entry point.
//! - `ModeSwitchSignal`: the one error that escapes the service.

pub mod ports;

mod cache_entry;
mod directions_service;
mod geo_point;
mod mode_switch;
mod route_query;
mod travel_mode;
mod walk;

pub use self::cache_entry::{CacheEntry, ResolvedDirections};
pub use self::directions_service::{
    DirectionsService, DirectionsServiceConfig, DirectionsServicePorts,
};
pub use self::geo_point::{EARTH_RADIUS_METRES, GeoPoint, GeoPointValidationError};
pub use self::mode_switch::ModeSwitchSignal;
pub use self::route_query::{ENDPOINT_TOLERANCE_METRES, RouteQuery, within_endpoint_tolerance};
pub use self::travel_mode::{TravelMode, TravelModeValidationError};
pub use self::walk::{StepWalkNormalizer, Walk};
