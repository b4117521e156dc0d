//! Similarity-keyed walk directions cache in front of a remote provider.
//!
//! Callers ask [`domain::DirectionsService`] for a walk between two points.
//! Queries whose endpoints drift by less than ten metres (and whose waypoints
//! are identical) are answered from an in-process cache; everything else goes
//! to the provider adapter in [`outbound::google`].

pub mod domain;
pub mod outbound;
pub mod settings;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
