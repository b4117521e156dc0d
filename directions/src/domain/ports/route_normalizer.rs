//! Port for translating provider payloads into caller-facing walks.

use super::define_port_error;
use crate::domain::{ModeSwitchSignal, ResolvedDirections, Walk};

define_port_error! {
    /// Errors surfaced while normalising a resolved response.
    pub enum RouteNormalizerError {
        /// Provider returned no usable route.
        NoRoute => "directions response contains no route",
        /// Payload is structurally unusable.
        Malformed { message: String } => "directions response malformed: {message}",
        /// A session rule asked the caller to switch mode.
        ModeSwitch { rule: String } => "normalisation interrupted by mode switch rule {rule}",
    }
}

impl RouteNormalizerError {
    /// Return the control-flow signal carried by this error, if any.
    pub fn control_signal(&self) -> Option<ModeSwitchSignal> {
        match self {
            Self::ModeSwitch { rule } => Some(ModeSwitchSignal::new(rule.as_str())),
            Self::NoRoute | Self::Malformed { .. } => None,
        }
    }
}

/// Maps resolved directions (payload plus provenance) into a [`Walk`].
#[cfg_attr(test, mockall::automock)]
pub trait RouteNormalizer: Send + Sync {
    /// Normalise one resolved response.
    fn normalize(&self, resolved: &ResolvedDirections) -> Result<Walk, RouteNormalizerError>;
}
