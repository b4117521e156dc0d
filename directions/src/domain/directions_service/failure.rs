//! Classification of failures raised while resolving one query.
//!
//! Everything is absorbed into "no route" except the mode switch signal,
//! which the service hands back to its caller.

use crate::domain::ModeSwitchSignal;
use crate::domain::ports::{DirectionsSourceError, RouteNormalizerError};

#[derive(Debug)]
pub(super) enum ResolveFailure {
    Absorbed(String),
    Propagate(ModeSwitchSignal),
}

impl From<DirectionsSourceError> for ResolveFailure {
    fn from(error: DirectionsSourceError) -> Self {
        match error.control_signal() {
            Some(signal) => Self::Propagate(signal),
            None => Self::Absorbed(error.to_string()),
        }
    }
}

impl From<RouteNormalizerError> for ResolveFailure {
    fn from(error: RouteNormalizerError) -> Self {
        match error.control_signal() {
            Some(signal) => Self::Propagate(signal),
            None => Self::Absorbed(error.to_string()),
        }
    }
}
