//! Control-flow signal that must escape the directions boundary.

use thiserror::Error;

/// Request from an enclosing session rule to change operating mode.
///
/// Every other failure while resolving directions is absorbed into "no
/// route"; this one is handed back to the caller untouched.
///
/// # Examples
/// ```
/// use directions::domain::ModeSwitchSignal;
///
/// let signal = ModeSwitchSignal::new("battery-saver");
/// assert_eq!(signal.rule(), "battery-saver");
/// assert_eq!(signal.to_string(), "mode switch requested by rule battery-saver");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("mode switch requested by rule {rule}")]
pub struct ModeSwitchSignal {
    rule: String,
}

impl ModeSwitchSignal {
    /// Build a signal naming the rule that triggered it.
    pub fn new(rule: impl Into<String>) -> Self {
        Self { rule: rule.into() }
    }

    /// Name of the triggering rule.
    pub fn rule(&self) -> &str {
        self.rule.as_str()
    }
}
