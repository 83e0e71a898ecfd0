//! Exponential bracketing.

use frontier_types::{Bracket, EstimateError, Result, SearchConfig, SearchState, pow2};
use tracing::info;

use crate::Probe;
use crate::probe::observe;

/// Finds the power-of-two bracket containing the frontier.
///
/// Probes `2^i` for `i` in `min_power..max_power` and stops at the first
/// empty probe `k`, returning `(k - 1, k)`.
///
/// # Errors
///
/// Returns [`EstimateError::RangeExceeded`] if `2^(max_power - 1)` is still
/// non-empty, or an abort error on the first throttled or failed probe.
pub async fn bracket<P: Probe + ?Sized>(probe: &P, config: &SearchConfig) -> Result<Bracket> {
    let mut probes = 0;
    bracket_from(probe, config, config.min_power(), &mut probes).await
}

/// Bracketing starting at `2^next_power`, adding to a running probe count.
pub(crate) async fn bracket_from<P: Probe + ?Sized>(
    probe: &P,
    config: &SearchConfig,
    next_power: u32,
    probes: &mut u32,
) -> Result<Bracket> {
    for power in next_power..config.max_power() {
        let state = SearchState::Bracketing { next_power: power };
        if !observe(probe, pow2(power), probes, state).await? {
            let bracket = Bracket::closed_at(power, power > config.min_power());
            info!(%bracket, probes = *probes, "bracket found");
            return Ok(bracket);
        }
    }

    Err(EstimateError::RangeExceeded {
        max_power: config.max_power(),
        probes: *probes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SimulatedCollection;
    use frontier_types::{Checkpoint, ProbeOutcome, RateLimit};

    fn config(min_power: u32, max_power: u32) -> SearchConfig {
        SearchConfig::new(min_power, max_power, 0).unwrap()
    }

    #[tokio::test]
    async fn test_bracket_contains_frontier() {
        let collection = SimulatedCollection::new(5_234_987);
        let bracket = bracket(&collection, &config(10, 40)).await.unwrap();

        assert_eq!(bracket, Bracket::closed_at(23, true));
        // 2^10 ..= 2^23
        assert_eq!(collection.probe_count(), 14);
    }

    #[tokio::test]
    async fn test_bracket_stops_at_first_empty() {
        let collection = SimulatedCollection::new(1 << 12);
        bracket(&collection, &config(10, 40)).await.unwrap();
        assert_eq!(collection.probed_ids(), vec![1 << 10, 1 << 11, 1 << 12, 1 << 13]);
    }

    #[tokio::test]
    async fn test_empty_at_min_power_is_unverified() {
        let collection = SimulatedCollection::new(100);
        let bracket = bracket(&collection, &config(25, 40)).await.unwrap();

        assert_eq!(bracket, Bracket::closed_at(25, false));
        assert_eq!(collection.probe_count(), 1);
    }

    #[tokio::test]
    async fn test_range_exceeded() {
        let collection = SimulatedCollection::new(1 << 39);
        let err = bracket(&collection, &config(25, 40)).await.unwrap_err();

        assert_eq!(
            err,
            EstimateError::RangeExceeded {
                max_power: 40,
                probes: 15
            }
        );
    }

    #[tokio::test]
    async fn test_rate_limit_aborts_immediately() {
        let limit = RateLimit {
            status: Some(403),
            ..RateLimit::default()
        };
        let collection =
            SimulatedCollection::new(5_234_987).with_fault(2, ProbeOutcome::RateLimited(limit.clone()));
        let err = bracket(&collection, &config(10, 40)).await.unwrap_err();

        assert_eq!(
            err,
            EstimateError::RateLimited {
                limit,
                checkpoint: Checkpoint {
                    state: SearchState::Bracketing { next_power: 12 },
                    probes: 3,
                },
            }
        );
        assert_eq!(collection.probe_count(), 3);
    }

    #[tokio::test]
    async fn test_transport_error_aborts() {
        let collection = SimulatedCollection::new(5_234_987)
            .with_fault(0, ProbeOutcome::TransportError("connection refused".into()));
        let err = bracket(&collection, &config(10, 40)).await.unwrap_err();

        assert!(matches!(err, EstimateError::Transport { ref detail, .. } if detail == "connection refused"));
        assert_eq!(collection.probe_count(), 1);
    }
}
