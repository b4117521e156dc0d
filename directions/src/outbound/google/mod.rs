//! Google Directions API outbound adapter.
//!
//! Provides a thin HTTP implementation of the `DirectionsSource` port.

mod dto;
mod http_source;
mod query;

pub use http_source::{
    DEFAULT_BASE_URL, GoogleDirectionsHttpSource, GoogleDirectionsSourceBuildError,
};
