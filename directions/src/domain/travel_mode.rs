//! Provider routing heuristic (`walking`, `driving`, ...).

use thiserror::Error;

/// Validated routing mode forwarded verbatim to the provider.
///
/// # Examples
/// ```
/// use directions::domain::TravelMode;
///
/// let mode = TravelMode::new("walking").expect("valid mode");
/// assert_eq!(mode.as_str(), "walking");
/// assert!(TravelMode::new("walk ing").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TravelMode(String);

impl TravelMode {
    /// Validate a mode string: non-blank, ASCII alphanumerics or `_` only.
    pub fn new(value: impl Into<String>) -> Result<Self, TravelModeValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(TravelModeValidationError::Empty);
        }
        if let Some(invalid) = raw
            .chars()
            .find(|ch| !(ch.is_ascii_alphanumeric() || *ch == '_'))
        {
            return Err(TravelModeValidationError::InvalidCharacter(invalid));
        }
        Ok(Self(raw))
    }

    /// Borrow the mode as sent on the wire.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors returned when constructing [`TravelMode`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TravelModeValidationError {
    /// Mode is empty after trimming whitespace.
    #[error("travel mode must not be empty")]
    Empty,
    /// Mode contains a character that is not safe to forward.
    #[error("travel mode contains invalid character {0:?}")]
    InvalidCharacter(char),
}
