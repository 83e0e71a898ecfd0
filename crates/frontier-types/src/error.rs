//! Error types for frontier.

use thiserror::Error;

use crate::{Checkpoint, RateLimit};

/// Result type alias for estimation operations.
pub type Result<T> = std::result::Result<T, EstimateError>;

/// Reasons an estimation stops without producing an estimate.
///
/// `RateLimited` and `Transport` abort the search mid-flight and carry a
/// [`Checkpoint`] the caller may resume from. `RangeExceeded` is a
/// configuration problem: resuming would only repeat it. `InvalidCheckpoint`
/// rejects a resume before any probe is issued.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EstimateError {
    /// The server throttled a probe.
    #[error("Rate limited after {} probes: {limit}", .checkpoint.probes)]
    RateLimited {
        /// Throttling details from the server.
        limit: RateLimit,
        /// Search position at the throttled probe.
        checkpoint: Checkpoint,
    },

    /// A probe failed for any other reason.
    #[error("Transport error after {} probes: {detail}", .checkpoint.probes)]
    Transport {
        /// Description of the failure.
        detail: String,
        /// Search position at the failed probe.
        checkpoint: Checkpoint,
    },

    /// Every bracketing probe was non-empty.
    #[error("Frontier exceeds configured maximum power: 2^{} is still non-empty", .max_power - 1)]
    RangeExceeded {
        /// Exclusive upper exponent that was configured.
        max_power: u32,
        /// Probes issued before giving up.
        probes: u32,
    },

    /// A checkpoint handed to resume lies outside the configured search.
    #[error("Checkpoint does not fit the search configuration: {:?}", .checkpoint.state)]
    InvalidCheckpoint {
        /// The rejected checkpoint.
        checkpoint: Checkpoint,
    },
}

impl EstimateError {
    /// Returns true if the search aborted on a failed probe.
    #[must_use]
    pub const fn is_aborted(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Transport { .. })
    }

    /// Returns true if the server throttled the search.
    #[must_use]
    pub const fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    /// Returns the resumable position of an aborted search.
    #[must_use]
    pub const fn checkpoint(&self) -> Option<&Checkpoint> {
        match self {
            Self::RateLimited { checkpoint, .. } | Self::Transport { checkpoint, .. } => {
                Some(checkpoint)
            }
            Self::RangeExceeded { .. } | Self::InvalidCheckpoint { .. } => None,
        }
    }

    /// Returns the number of probes issued before the error.
    #[must_use]
    pub const fn probes(&self) -> u32 {
        match self {
            Self::RateLimited { checkpoint, .. } | Self::Transport { checkpoint, .. } => {
                checkpoint.probes
            }
            Self::RangeExceeded { probes, .. } => *probes,
            Self::InvalidCheckpoint { checkpoint } => checkpoint.probes,
        }
    }
}

/// Error for invalid search configurations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Bracketing must start above `2^0`.
    #[error("Invalid search range: min power must be at least 1")]
    ZeroMinPower,

    /// Exponent does not fit a 64-bit identifier.
    #[error("Invalid search range: power {power} exceeds {limit}")]
    PowerTooLarge {
        /// The offending exponent.
        power: u32,
        /// Largest supported exponent.
        limit: u32,
    },

    /// Bracketing would issue no probes.
    #[error("Invalid search range: min power {min_power} >= max power {max_power}")]
    EmptyRange {
        /// Configured min power.
        min_power: u32,
        /// Configured max power.
        max_power: u32,
    },

    /// Resolution floor lies outside the searched range.
    #[error("Invalid resolution floor: {floor_power} >= max power {max_power}")]
    FloorAboveRange {
        /// Configured floor power.
        floor_power: u32,
        /// Configured max power.
        max_power: u32,
    },
}
