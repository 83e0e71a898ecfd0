//! Two-phase frontier estimation.

use frontier_types::{
    Checkpoint, EstimateError, FrontierEstimate, Result, SearchConfig, SearchState,
};
use tracing::{info, warn};

use crate::Probe;
use crate::bracket::bracket_from;
use crate::refine::refine_from;

/// Estimates the largest allocated identifier behind one probe.
///
/// Each estimator owns its probe and configuration, so independent
/// estimations (one per endpoint, say) can run concurrently without sharing
/// state.
///
/// # Example
///
/// ```
/// use frontier_estimate::{FrontierEstimator, SimulatedCollection};
/// use frontier_types::SearchConfig;
///
/// # futures::executor::block_on(async {
/// let collection = SimulatedCollection::new(5_234_987);
/// let estimator = FrontierEstimator::new(&collection, SearchConfig::new(20, 40, 10)?);
///
/// let found = estimator.estimate().await?;
/// assert!(5_234_987 - found.estimate < 1024);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// # }).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct FrontierEstimator<P> {
    probe: P,
    config: SearchConfig,
}

impl<P: Probe> FrontierEstimator<P> {
    /// Creates an estimator with the given search configuration.
    #[must_use]
    pub const fn new(probe: P, config: SearchConfig) -> Self {
        Self { probe, config }
    }

    /// Creates an estimator with the default search configuration.
    #[must_use]
    pub fn with_defaults(probe: P) -> Self {
        Self::new(probe, SearchConfig::default())
    }

    /// Returns the search configuration.
    #[must_use]
    pub const fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Returns the underlying probe.
    #[must_use]
    pub const fn probe(&self) -> &P {
        &self.probe
    }

    /// Runs bracketing and refinement from scratch.
    ///
    /// # Errors
    ///
    /// Returns [`frontier_types::EstimateError::RangeExceeded`] if bracketing
    /// never sees an empty probe, or an abort error carrying a checkpoint on
    /// the first throttled or failed probe.
    pub async fn estimate(&self) -> Result<FrontierEstimate> {
        self.resume(Checkpoint::start(&self.config)).await
    }

    /// Continues a search from a checkpoint taken by an aborted run.
    ///
    /// The failed probe is repeated first. Probe counts accumulate from the
    /// checkpoint, so the returned total includes every probe issued.
    ///
    /// # Errors
    ///
    /// Same as [`Self::estimate`], plus
    /// [`EstimateError::InvalidCheckpoint`] without probing if the checkpoint
    /// does not fit this estimator's configuration.
    pub async fn resume(&self, checkpoint: Checkpoint) -> Result<FrontierEstimate> {
        let result = self.run(checkpoint).await;
        match &result {
            Ok(found) => info!(
                estimate = found.estimate,
                bracket = %found.bracket,
                probes = found.probes,
                "frontier estimated"
            ),
            Err(e) => warn!(error = %e, "estimation stopped"),
        }
        result
    }

    async fn run(&self, checkpoint: Checkpoint) -> Result<FrontierEstimate> {
        if !checkpoint.fits(&self.config) {
            return Err(EstimateError::InvalidCheckpoint { checkpoint });
        }

        let floor_power = self.config.floor_power();
        let mut probes = checkpoint.probes;

        let (bracket, estimate, next_power) = match checkpoint.state {
            SearchState::Bracketing { next_power } => {
                let bracket =
                    bracket_from(&self.probe, &self.config, next_power, &mut probes).await?;
                (
                    bracket,
                    bracket.initial_estimate(),
                    bracket.first_refinement_power(floor_power),
                )
            }
            SearchState::Refining {
                bracket,
                estimate,
                next_power,
            } => (bracket, estimate, Some(next_power)),
        };

        let estimate = refine_from(
            &self.probe,
            bracket,
            floor_power,
            estimate,
            next_power,
            &mut probes,
        )
        .await?;

        Ok(FrontierEstimate {
            estimate,
            bracket,
            probes,
            resolution: self.config.resolution(),
        })
    }
}
