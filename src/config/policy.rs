//! Request policy configuration.

use serde::Deserialize;

/// What a new pulse request does while a burst is armed or running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RequestPolicy {
    /// Replace the stored burst and direction immediately. The running burst
    /// keeps its counts but sees the new direction level.
    #[default]
    Overwrite,
    /// Refuse the request until the burst completes or is disabled.
    Reject,
}
