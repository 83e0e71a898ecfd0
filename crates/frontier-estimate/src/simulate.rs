//! In-memory collection with a known frontier.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use frontier_types::{ProbeOutcome, RateLimit};

use crate::Probe;

/// A dense collection holding every identifier up to `frontier`.
///
/// Probing at `N` is non-empty iff `N <= frontier`. Faults can be injected at
/// given probe indices; each fires once, so a search aborted by a fault can
/// be resumed against the same collection. Every probe is recorded.
#[derive(Debug)]
pub struct SimulatedCollection {
    frontier: u64,
    faults: Mutex<HashMap<u32, ProbeOutcome>>,
    trace: Mutex<Vec<(u64, ProbeOutcome)>>,
}

impl SimulatedCollection {
    /// Creates a collection whose largest identifier is `frontier`.
    #[must_use]
    pub fn new(frontier: u64) -> Self {
        Self {
            frontier,
            faults: Mutex::new(HashMap::new()),
            trace: Mutex::new(Vec::new()),
        }
    }

    /// Makes the probe with 0-based index `at` return `outcome` instead.
    #[must_use]
    pub fn with_fault(self, at: u32, outcome: ProbeOutcome) -> Self {
        self.faults
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(at, outcome);
        self
    }

    /// Makes the probe with 0-based index `at` come back throttled.
    #[must_use]
    pub fn with_rate_limit_at(self, at: u32, limit: RateLimit) -> Self {
        self.with_fault(at, ProbeOutcome::RateLimited(limit))
    }

    /// Returns the true frontier.
    #[must_use]
    pub const fn frontier(&self) -> u64 {
        self.frontier
    }

    /// Answers a probe at `test_id` without recording it.
    #[must_use]
    pub const fn lookup(&self, test_id: u64) -> ProbeOutcome {
        if test_id <= self.frontier {
            ProbeOutcome::NonEmpty
        } else {
            ProbeOutcome::Empty
        }
    }

    /// Returns the number of probes issued so far.
    #[must_use]
    pub fn probe_count(&self) -> u32 {
        self.trace().len() as u32
    }

    /// Returns the tested identifiers in probe order.
    #[must_use]
    pub fn probed_ids(&self) -> Vec<u64> {
        self.trace().into_iter().map(|(id, _)| id).collect()
    }

    /// Returns every probe with the outcome it received.
    #[must_use]
    pub fn trace(&self) -> Vec<(u64, ProbeOutcome)> {
        self.trace
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Probe for SimulatedCollection {
    async fn probe(&self, test_id: u64) -> ProbeOutcome {
        let mut trace = self.trace.lock().unwrap_or_else(PoisonError::into_inner);
        let index = trace.len() as u32;
        let outcome = self
            .faults
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&index)
            .unwrap_or_else(|| self.lookup(test_id));
        trace.push((test_id, outcome.clone()));
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_monotone() {
        let collection = SimulatedCollection::new(1_000);
        assert_eq!(collection.lookup(0), ProbeOutcome::NonEmpty);
        assert_eq!(collection.lookup(1_000), ProbeOutcome::NonEmpty);
        assert_eq!(collection.lookup(1_001), ProbeOutcome::Empty);
        assert_eq!(collection.lookup(u64::MAX), ProbeOutcome::Empty);
    }

    #[tokio::test]
    async fn test_faults_fire_once() {
        let collection = SimulatedCollection::new(1_000)
            .with_fault(1, ProbeOutcome::TransportError("reset".into()));

        assert_eq!(collection.probe(10).await, ProbeOutcome::NonEmpty);
        assert_eq!(
            collection.probe(10).await,
            ProbeOutcome::TransportError("reset".into())
        );
        assert_eq!(collection.probe(10).await, ProbeOutcome::NonEmpty);
        assert_eq!(collection.probe_count(), 3);
    }

    #[tokio::test]
    async fn test_trace_records_outcomes() {
        let collection = SimulatedCollection::new(5).with_rate_limit_at(0, RateLimit::default());
        collection.probe(1).await;
        collection.probe(8).await;

        assert_eq!(
            collection.trace(),
            vec![
                (1, ProbeOutcome::RateLimited(RateLimit::default())),
                (8, ProbeOutcome::Empty),
            ]
        );
        assert_eq!(collection.probed_ids(), vec![1, 8]);
    }
}
