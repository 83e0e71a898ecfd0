//! Estimate command implementation.
//!
//! Probes each endpoint over HTTP and prints one row per endpoint.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use frontier_lib::prelude::*;
use indicatif::MultiProgress;
use tracing::warn;

use crate::display::{EstimateRow, Format, format_thousands, print_rows};
use crate::progress::{ProgressProbe, multi_progress, spinner};

/// Endpoints estimated when none are named.
const DEFAULT_ENDPOINTS: [&str; 2] = ["github-users", "github-repos"];

/// Wait used when a throttling response carries no hint.
const FALLBACK_WAIT: Duration = Duration::from_secs(60);

/// How rate-limited estimations are resumed.
#[derive(Clone, Copy)]
pub(crate) struct ResumePolicy {
    pub(crate) max_resumes: u32,
    pub(crate) max_wait: Duration,
}

/// Settings for one `estimate` invocation.
pub(crate) struct EstimateOptions {
    pub(crate) config: SearchConfig,
    pub(crate) format: Format,
    pub(crate) token: Option<String>,
    pub(crate) timeout: u64,
    pub(crate) retries: u32,
    pub(crate) sequential: bool,
    /// `None` fails on the first rate limit.
    pub(crate) resume: Option<ResumePolicy>,
    pub(crate) quiet: bool,
}

/// Estimate the frontier of each requested endpoint.
pub(crate) async fn estimate(
    ids: &[String],
    url: Option<&str>,
    param: &str,
    options: &EstimateOptions,
) -> Result<()> {
    let endpoints = resolve_endpoints(ids, url, param)?;

    let client = ProbeClient::new(client_config(options))?;

    let multi = multi_progress(options.quiet);
    let runs = endpoints
        .iter()
        .map(|endpoint| estimate_endpoint(&client, endpoint, options, &multi));

    let results: Vec<Result<EstimateRow>> = if options.sequential {
        let mut results = Vec::with_capacity(endpoints.len());
        for run in runs {
            results.push(run.await);
        }
        results
    } else {
        futures::future::join_all(runs).await
    };

    let mut rows = Vec::new();
    let mut failures = Vec::new();
    for result in results {
        match result {
            Ok(row) => rows.push(row),
            Err(e) => failures.push(e),
        }
    }

    if !rows.is_empty() {
        print_rows(&rows, options.format)?;
    }

    match failures.len() {
        0 => Ok(()),
        1 => Err(failures.remove(0)),
        n => {
            for e in &failures {
                eprintln!("{e:#}");
            }
            bail!("{n} out of {} estimations failed", endpoints.len())
        }
    }
}

/// Builds the HTTP client settings from command options.
fn client_config(options: &EstimateOptions) -> ClientConfig {
    let mut config = ClientConfig {
        timeout: Duration::from_secs(options.timeout),
        max_retries: options.retries,
        ..ClientConfig::default()
    };
    if let Some(token) = &options.token {
        config = config.with_token(token.as_str());
    }
    config
}

/// Maps endpoint ids and an optional ad-hoc URL to endpoints.
fn resolve_endpoints(ids: &[String], url: Option<&str>, param: &str) -> Result<Vec<Endpoint>> {
    let registry = EndpointRegistry::global();

    let mut endpoints = ids
        .iter()
        .map(|id| {
            registry
                .get(id)
                .cloned()
                .with_context(|| format!("Unknown endpoint: {id}"))
        })
        .collect::<Result<Vec<_>>>()?;

    if let Some(url) = url {
        endpoints.push(Endpoint::from_url(url, param));
    }

    if endpoints.is_empty() {
        endpoints = DEFAULT_ENDPOINTS
            .iter()
            .filter_map(|id| registry.get(id).cloned())
            .collect();
    }

    Ok(endpoints)
}

/// Runs one estimation, waiting out rate limits when the policy allows.
async fn estimate_endpoint(
    client: &ProbeClient,
    endpoint: &Endpoint,
    options: &EstimateOptions,
    multi: &MultiProgress,
) -> Result<EstimateRow> {
    let bound = client.bind(endpoint.clone());
    let bar = spinner(multi, bound.endpoint().id());
    let probe = ProgressProbe::new(bound, bar);
    let estimator = FrontierEstimator::new(probe, options.config);

    let mut resumes = 0;
    let mut outcome = estimator.estimate().await;

    loop {
        let bar = estimator.probe().bar();
        match outcome {
            Ok(found) => {
                bar.finish_with_message(format!("~{}", format_thousands(found.estimate)));
                return Ok(EstimateRow::new(endpoint.id(), &found));
            }
            Err(EstimateError::RateLimited { limit, checkpoint })
                if options.resume.is_some_and(|policy| resumes < policy.max_resumes) =>
            {
                let max_wait = options.resume.map_or(Duration::ZERO, |policy| policy.max_wait);
                let wait = limit
                    .wait_hint(Utc::now())
                    .unwrap_or(FALLBACK_WAIT)
                    .min(max_wait);
                resumes += 1;

                warn!(endpoint = %endpoint, %limit, ?wait, resume = resumes, "rate limited, waiting to resume");
                bar.set_message(format!("rate limited, resuming in {}s", wait.as_secs()));
                tokio::time::sleep(wait).await;

                outcome = estimator.resume(checkpoint).await;
            }
            Err(e) => {
                bar.abandon_with_message("failed");
                return Err(e).with_context(|| format!("Estimating {endpoint} failed"));
            }
        }
    }
}
