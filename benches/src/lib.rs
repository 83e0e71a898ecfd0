//! Benchmark utilities for frontier.
//!
//! Every case runs against a [`SimulatedCollection`], so results measure the
//! search itself and its probe cost, never the network.

use std::time::{Duration, Instant};

use frontier_lib::{EstimateError, FrontierEstimator, SearchConfig, SimulatedCollection};

/// A frontier to estimate under a given search configuration.
#[derive(Debug, Clone, Copy)]
pub struct BenchmarkCase {
    /// Short label used in reports.
    pub name: &'static str,
    /// Largest id present in the simulated collection.
    pub frontier: u64,
    /// Search bounds.
    pub config: SearchConfig,
}

/// Result of a single benchmark run.
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    /// Case label.
    pub name: &'static str,
    /// Largest id present.
    pub frontier: u64,
    /// Estimated frontier.
    pub estimate: u64,
    /// Probes issued.
    pub probes: u32,
    /// Worst-case probe count for the case's configuration.
    pub worst_case: u32,
    /// Wall time of the estimation.
    pub duration: Duration,
}

impl BenchmarkResult {
    /// Distance between the true frontier and the estimate.
    #[must_use]
    pub const fn error(&self) -> u64 {
        self.frontier - self.estimate
    }
}

/// Standard cases: sparse and dense collections under the default search,
/// plus a fine-grained search over the same frontier.
///
/// # Panics
///
/// Panics if a built-in configuration is invalid.
#[must_use]
pub fn benchmark_cases() -> Vec<BenchmarkCase> {
    let fine = SearchConfig::new(20, 40, 0).expect("valid fine-grained config");
    vec![
        BenchmarkCase {
            name: "users-2024",
            frontier: 160_000_000,
            config: SearchConfig::default(),
        },
        BenchmarkCase {
            name: "repos-2024",
            frontier: 850_000_000,
            config: SearchConfig::default(),
        },
        BenchmarkCase {
            name: "below-min-power",
            frontier: 5_234_987,
            config: SearchConfig::default(),
        },
        BenchmarkCase {
            name: "near-max-power",
            frontier: (1 << 39) - 1,
            config: SearchConfig::default(),
        },
        BenchmarkCase {
            name: "exact",
            frontier: 850_000_000,
            config: fine,
        },
    ]
}

/// Runs one case to completion on the current thread.
///
/// # Errors
///
/// Returns the estimator's error if the case's frontier is out of range.
pub fn run_case(case: &BenchmarkCase) -> Result<BenchmarkResult, EstimateError> {
    let collection = SimulatedCollection::new(case.frontier);
    let estimator = FrontierEstimator::new(&collection, case.config);

    let start = Instant::now();
    let found = futures::executor::block_on(estimator.estimate())?;

    Ok(BenchmarkResult {
        name: case.name,
        frontier: case.frontier,
        estimate: found.estimate,
        probes: found.probes,
        worst_case: case.config.max_probes(),
        duration: start.elapsed(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cases_run_within_budget() {
        for case in benchmark_cases() {
            let result = run_case(&case).unwrap();
            assert!(result.probes <= result.worst_case, "{}", case.name);
            assert!(result.error() < case.config.resolution(), "{}", case.name);
        }
    }

    #[test]
    fn test_fine_search_is_exact() {
        let case = benchmark_cases()
            .into_iter()
            .find(|c| c.name == "exact")
            .unwrap();
        assert_eq!(run_case(&case).unwrap().error(), 0);
    }
}
