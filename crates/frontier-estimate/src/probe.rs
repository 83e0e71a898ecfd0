//! The probe abstraction the search is built on.

use std::sync::Arc;

use async_trait::async_trait;
use frontier_types::{Checkpoint, EstimateError, ProbeOutcome, Result, SearchState};
use tracing::debug;

/// A single bounded query against one collection.
///
/// Implementations answer "does the collection contain any item with
/// identifier >= `test_id`?" with exactly one outbound query and no retries.
/// Throttling must be reported as [`ProbeOutcome::RateLimited`] and every
/// other failure as [`ProbeOutcome::TransportError`].
#[async_trait]
pub trait Probe: Send + Sync {
    /// Probes the collection at `test_id`.
    async fn probe(&self, test_id: u64) -> ProbeOutcome;
}

#[async_trait]
impl<P: Probe + ?Sized> Probe for &P {
    async fn probe(&self, test_id: u64) -> ProbeOutcome {
        (**self).probe(test_id).await
    }
}

#[async_trait]
impl<P: Probe + ?Sized> Probe for Arc<P> {
    async fn probe(&self, test_id: u64) -> ProbeOutcome {
        (**self).probe(test_id).await
    }
}

/// Issues one probe and reduces it to the search decision.
///
/// Returns `Ok(true)` for non-empty, `Ok(false)` for empty. A failed probe
/// becomes an error whose checkpoint points back at `state`, so resuming
/// repeats the failed probe.
pub(crate) async fn observe<P: Probe + ?Sized>(
    probe: &P,
    test_id: u64,
    probes: &mut u32,
    state: SearchState,
) -> Result<bool> {
    let outcome = probe.probe(test_id).await;
    *probes += 1;
    debug!(test_id, probes = *probes, outcome = outcome.as_str(), "probe");

    let checkpoint = Checkpoint {
        state,
        probes: *probes,
    };
    match outcome {
        ProbeOutcome::NonEmpty => Ok(true),
        ProbeOutcome::Empty => Ok(false),
        ProbeOutcome::RateLimited(limit) => Err(EstimateError::RateLimited { limit, checkpoint }),
        ProbeOutcome::TransportError(detail) => {
            Err(EstimateError::Transport { detail, checkpoint })
        }
    }
}
