//! Geometric refinement inside a bracket.
//!
//! Each power from the top of the bracket down to the floor is tried exactly
//! once: an increment is kept if the collection is still non-empty beyond it.
//! This reconstructs the frontier bit by bit without backtracking, so the
//! probe count is fixed and the error is bounded by `2^floor_power`.

use frontier_types::{Bracket, Result, SearchState, pow2};

use crate::Probe;
use crate::probe::observe;

/// Refines a bracket down to `2^floor_power` resolution.
///
/// Starts from [`Bracket::initial_estimate`] and issues exactly
/// [`Bracket::refinement_probes`] probes.
///
/// # Errors
///
/// Returns an abort error on the first throttled or failed probe. The
/// partial estimate is only available through the error's checkpoint.
pub async fn refine<P: Probe + ?Sized>(probe: &P, bracket: Bracket, floor_power: u32) -> Result<u64> {
    let mut probes = 0;
    refine_from(
        probe,
        bracket,
        floor_power,
        bracket.initial_estimate(),
        bracket.first_refinement_power(floor_power),
        &mut probes,
    )
    .await
}

/// Refinement continuing from `estimate` with `2^next_power` as the next
/// increment; `None` means nothing is left to try.
pub(crate) async fn refine_from<P: Probe + ?Sized>(
    probe: &P,
    bracket: Bracket,
    floor_power: u32,
    mut estimate: u64,
    next_power: Option<u32>,
    probes: &mut u32,
) -> Result<u64> {
    let Some(top) = next_power else {
        return Ok(estimate);
    };

    for power in (floor_power..=top).rev() {
        let candidate = estimate.saturating_add(pow2(power));
        let state = SearchState::Refining {
            bracket,
            estimate,
            next_power: power,
        };
        if observe(probe, candidate, probes, state).await? {
            estimate = candidate;
        }
    }

    Ok(estimate)
}
