//! Search configuration, brackets and resumable search state.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Largest exponent a `u64` identifier can be probed at.
const POWER_LIMIT: u32 = 63;

/// Default first exponent tried while bracketing.
const DEFAULT_MIN_POWER: u32 = 25;

/// Default exclusive upper exponent for bracketing.
const DEFAULT_MAX_POWER: u32 = 40;

/// Default resolution floor (estimates land within 1024 of the frontier).
const DEFAULT_FLOOR_POWER: u32 = 10;

/// Returns `2^power` as an identifier.
///
/// # Panics
///
/// Panics in debug builds if `power` is 64 or more.
#[must_use]
pub const fn pow2(power: u32) -> u64 {
    1u64 << power
}

/// Validated search range and resolution floor for one estimator.
///
/// Bracketing probes `2^min_power .. 2^(max_power - 1)`; refinement stops at
/// `2^floor_power`. A higher floor issues fewer probes and returns a coarser
/// estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSearchConfig")]
pub struct SearchConfig {
    min_power: u32,
    max_power: u32,
    floor_power: u32,
}

/// Unvalidated wire form of [`SearchConfig`].
#[derive(Deserialize)]
struct RawSearchConfig {
    min_power: u32,
    max_power: u32,
    floor_power: u32,
}

impl TryFrom<RawSearchConfig> for SearchConfig {
    type Error = ConfigError;

    fn try_from(raw: RawSearchConfig) -> Result<Self, Self::Error> {
        Self::new(raw.min_power, raw.max_power, raw.floor_power)
    }
}

impl SearchConfig {
    /// Creates a search configuration.
    ///
    /// # Errors
    ///
    /// Returns an error unless `1 <= min_power < max_power <= 63` and
    /// `floor_power < max_power`.
    pub const fn new(min_power: u32, max_power: u32, floor_power: u32) -> Result<Self, ConfigError> {
        if min_power == 0 {
            return Err(ConfigError::ZeroMinPower);
        }
        if max_power > POWER_LIMIT {
            return Err(ConfigError::PowerTooLarge {
                power: max_power,
                limit: POWER_LIMIT,
            });
        }
        if min_power >= max_power {
            return Err(ConfigError::EmptyRange {
                min_power,
                max_power,
            });
        }
        if floor_power >= max_power {
            return Err(ConfigError::FloorAboveRange {
                floor_power,
                max_power,
            });
        }
        Ok(Self {
            min_power,
            max_power,
            floor_power,
        })
    }

    /// Returns the first exponent probed while bracketing.
    #[must_use]
    pub const fn min_power(&self) -> u32 {
        self.min_power
    }

    /// Returns the exclusive upper exponent for bracketing.
    #[must_use]
    pub const fn max_power(&self) -> u32 {
        self.max_power
    }

    /// Returns the resolution floor exponent.
    #[must_use]
    pub const fn floor_power(&self) -> u32 {
        self.floor_power
    }

    /// Returns the worst-case error of a successful estimate.
    #[must_use]
    pub const fn resolution(&self) -> u64 {
        pow2(self.floor_power)
    }

    /// Returns the worst-case number of probes for one estimation.
    #[must_use]
    pub const fn max_probes(&self) -> u32 {
        // Deepest bracket is (max - 2, max - 1); the shallowest one has an
        // unverified low bound and costs one extra refinement probe.
        let deepest = (self.max_power - self.min_power) + (self.max_power - 2).saturating_sub(self.floor_power);
        let shallowest = 1 + self.min_power.saturating_sub(self.floor_power);
        if deepest > shallowest {
            deepest
        } else {
            shallowest
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_power: DEFAULT_MIN_POWER,
            max_power: DEFAULT_MAX_POWER,
            floor_power: DEFAULT_FLOOR_POWER,
        }
    }
}

/// Power-of-two interval `[2^low_power, 2^high_power)` containing the frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bracket {
    /// Exponent of the inclusive lower bound.
    pub low_power: u32,
    /// Exponent of the first identifier that probed empty.
    pub high_power: u32,
    /// Whether `2^low_power` was actually observed non-empty.
    ///
    /// False when the very first bracketing probe was already empty, so the
    /// frontier may lie anywhere below `2^high_power`.
    pub low_verified: bool,
}

impl Bracket {
    /// Creates the bracket closed by an empty probe at `2^high_power`.
    ///
    /// # Panics
    ///
    /// Panics if `high_power` is zero.
    #[must_use]
    pub const fn closed_at(high_power: u32, low_verified: bool) -> Self {
        Self {
            low_power: high_power - 1,
            high_power,
            low_verified,
        }
    }

    /// Returns the inclusive lower bound `2^low_power`.
    #[must_use]
    pub const fn lower_bound(&self) -> u64 {
        pow2(self.low_power)
    }

    /// Returns the exclusive upper bound `2^high_power`.
    #[must_use]
    pub const fn upper_bound(&self) -> u64 {
        pow2(self.high_power)
    }

    /// Returns the estimate refinement starts from.
    #[must_use]
    pub const fn initial_estimate(&self) -> u64 {
        if self.low_verified {
            self.lower_bound()
        } else {
            0
        }
    }

    /// Returns the largest power refinement tries, or `None` if refinement
    /// has nothing to try above the floor.
    #[must_use]
    pub const fn first_refinement_power(&self, floor_power: u32) -> Option<u32> {
        let top = if self.low_verified {
            match self.low_power.checked_sub(1) {
                Some(top) => top,
                None => return None,
            }
        } else {
            self.low_power
        };
        if top >= floor_power { Some(top) } else { None }
    }

    /// Returns the exact number of probes refinement issues for this bracket.
    #[must_use]
    pub const fn refinement_probes(&self, floor_power: u32) -> u32 {
        match self.first_refinement_power(floor_power) {
            Some(top) => top - floor_power + 1,
            None => 0,
        }
    }
}

impl std::fmt::Display for Bracket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[2^{}, 2^{})", self.low_power, self.high_power)
    }
}

/// Position of a search between two probes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "lowercase")]
pub enum SearchState {
    /// Bracketing will probe `2^next_power` next.
    Bracketing {
        /// Exponent of the next bracketing probe.
        next_power: u32,
    },
    /// Refinement will probe `estimate + 2^next_power` next.
    Refining {
        /// Bracket found by the bracketing phase.
        bracket: Bracket,
        /// Estimate accumulated so far.
        estimate: u64,
        /// Exponent of the next increment to try.
        next_power: u32,
    },
}

/// Resumable search state together with the probes already spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Where the search stopped.
    pub state: SearchState,
    /// Probes issued before the checkpoint, the failed one included.
    pub probes: u32,
}

impl Checkpoint {
    /// Returns the checkpoint of a search that has not issued any probe.
    #[must_use]
    pub const fn start(config: &SearchConfig) -> Self {
        Self {
            state: SearchState::Bracketing {
                next_power: config.min_power,
            },
            probes: 0,
        }
    }

    /// Returns true if this checkpoint could have been taken by a search
    /// under `config`, so resuming it stays inside the configured range.
    #[must_use]
    pub fn fits(&self, config: &SearchConfig) -> bool {
        match self.state {
            SearchState::Bracketing { next_power } => {
                (config.min_power..config.max_power).contains(&next_power)
            }
            SearchState::Refining {
                bracket,
                estimate,
                next_power,
            } => {
                let in_range = (config.min_power..config.max_power).contains(&bracket.high_power)
                    && bracket.high_power.checked_sub(1) == Some(bracket.low_power)
                    && (bracket.low_verified || bracket.high_power == config.min_power);
                in_range
                    && bracket
                        .first_refinement_power(config.floor_power)
                        .is_some_and(|top| (config.floor_power..=top).contains(&next_power))
                    && (bracket.initial_estimate()..bracket.upper_bound()).contains(&estimate)
            }
        }
    }

    /// Returns the bracket, if the search got past bracketing.
    #[must_use]
    pub const fn bracket(&self) -> Option<Bracket> {
        match self.state {
            SearchState::Bracketing { .. } => None,
            SearchState::Refining { bracket, .. } => Some(bracket),
        }
    }
}

/// Final result of a successful estimation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontierEstimate {
    /// Estimated largest allocated identifier.
    pub estimate: u64,
    /// Bracket found by the bracketing phase.
    pub bracket: Bracket,
    /// Total number of probes issued, across resumes.
    pub probes: u32,
    /// Worst-case distance below the true frontier (`2^floor_power`).
    pub resolution: u64,
}
