//! Probe outcome classification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Throttling details reported by the server alongside a rate-limit response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimit {
    /// HTTP status of the throttling response, if it came over HTTP.
    pub status: Option<u16>,
    /// Server-provided message (e.g., GitHub's `message` field).
    pub message: Option<String>,
    /// Delay requested by a `Retry-After` header.
    pub retry_after: Option<Duration>,
    /// Moment the quota resets (e.g., GitHub's `x-ratelimit-reset`).
    pub reset_at: Option<DateTime<Utc>>,
}

impl RateLimit {
    /// Returns how long to wait before resuming, measured from `now`.
    ///
    /// `Retry-After` wins over the reset timestamp. Returns `None` when the
    /// server gave no hint.
    #[must_use]
    pub fn wait_hint(&self, now: DateTime<Utc>) -> Option<Duration> {
        if let Some(delay) = self.retry_after {
            return Some(delay);
        }
        self.reset_at
            .map(|reset| (reset - now).to_std().unwrap_or(Duration::ZERO))
    }
}

impl std::fmt::Display for RateLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(status) = self.status {
            write!(f, "{status}")?;
        } else {
            write!(f, "throttled")?;
        }
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        Ok(())
    }
}

/// Result of one probe at a tested identifier `N`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// At least one item with id >= N exists.
    NonEmpty,
    /// No item with id >= N exists.
    Empty,
    /// The server is throttling requests.
    RateLimited(RateLimit),
    /// Network failure, malformed response or unexpected status.
    TransportError(String),
}

impl ProbeOutcome {
    /// Returns true for outcomes that end the search.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::RateLimited(_) | Self::TransportError(_))
    }

    /// Returns a short label for logging.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NonEmpty => "non-empty",
            Self::Empty => "empty",
            Self::RateLimited(_) => "rate-limited",
            Self::TransportError(_) => "transport-error",
        }
    }
}

impl std::fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RateLimited(limit) => write!(f, "rate-limited ({limit})"),
            Self::TransportError(detail) => write!(f, "transport error ({detail})"),
            _ => write!(f, "{}", self.as_str()),
        }
    }
}
