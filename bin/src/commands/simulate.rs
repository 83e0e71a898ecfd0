//! Simulate command implementation.
//!
//! Runs the estimator against an in-memory collection so the search can be
//! inspected probe by probe without touching the network.

use anyhow::Result;
use frontier_lib::prelude::*;
use serde::Serialize;

use crate::display::{Format, format_thousands};

/// One issued probe.
#[derive(Serialize)]
struct TraceStep {
    test_id: u64,
    outcome: &'static str,
}

/// Simulation summary.
#[derive(Serialize)]
struct Report {
    frontier: u64,
    estimate: u64,
    error: u64,
    bracket: Bracket,
    probes: u32,
    worst_case_probes: u32,
    resolution: u64,
    resumes: u32,
}

/// Estimate the frontier of a simulated collection holding ids `0..=frontier`.
pub(crate) async fn simulate(
    frontier: u64,
    config: SearchConfig,
    rate_limit_at: Option<u32>,
    format: Format,
) -> Result<()> {
    let mut collection = SimulatedCollection::new(frontier);
    if let Some(at) = rate_limit_at {
        let limit = RateLimit {
            message: Some("simulated rate limit".to_string()),
            ..RateLimit::default()
        };
        collection = collection.with_rate_limit_at(at, limit);
    }

    let estimator = FrontierEstimator::new(&collection, config);
    let mut resumes = 0;
    let found = match estimator.estimate().await {
        Ok(found) => found,
        Err(EstimateError::RateLimited { limit, checkpoint }) => {
            if matches!(format, Format::Text) {
                println!(
                    "Rate limited after {} probes ({limit}), resuming",
                    checkpoint.probes
                );
            }
            resumes += 1;
            estimator.resume(checkpoint).await?
        }
        Err(e) => return Err(e.into()),
    };

    let trace: Vec<TraceStep> = collection
        .trace()
        .into_iter()
        .map(|(test_id, outcome)| TraceStep {
            test_id,
            outcome: outcome.as_str(),
        })
        .collect();
    let report = Report {
        frontier,
        estimate: found.estimate,
        error: frontier.saturating_sub(found.estimate),
        bracket: found.bracket,
        probes: found.probes,
        worst_case_probes: config.max_probes(),
        resolution: found.resolution,
        resumes,
    };

    match format {
        Format::Text => print_text(&trace, &report),
        Format::Json => {
            let value = serde_json::json!({ "trace": trace, "report": report });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        Format::Ndjson => {
            for step in &trace {
                println!("{}", serde_json::to_string(step)?);
            }
            println!("{}", serde_json::to_string(&report)?);
        }
    }
    Ok(())
}

fn print_text(trace: &[TraceStep], report: &Report) {
    println!("{:>4} {:>26} {:<16}", "#", "TEST ID", "OUTCOME");
    println!("{}", "-".repeat(48));
    for (i, step) in trace.iter().enumerate() {
        println!(
            "{:>4} {:>26} {:<16}",
            i + 1,
            format_thousands(step.test_id),
            step.outcome
        );
    }

    println!("\nFrontier:   {}", format_thousands(report.frontier));
    println!("Estimate:   {}", format_thousands(report.estimate));
    println!(
        "Error:      {} (resolution {})",
        format_thousands(report.error),
        format_thousands(report.resolution)
    );
    println!("Bracket:    {}", report.bracket);
    println!(
        "Probes:     {} (worst case {})",
        report.probes, report.worst_case_probes
    );
}
