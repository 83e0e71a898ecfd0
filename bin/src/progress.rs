//! Spinner that counts probes as they are issued.

use std::time::Duration;

use async_trait::async_trait;
use frontier_lib::prelude::*;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Returns the progress container; hidden in quiet mode.
pub(crate) fn multi_progress(quiet: bool) -> MultiProgress {
    if quiet {
        MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
    } else {
        MultiProgress::new()
    }
}

/// Adds a probe-count spinner labelled `label`.
pub(crate) fn spinner(multi: &MultiProgress, label: &str) -> ProgressBar {
    let pb = multi.add(ProgressBar::new_spinner());
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold} {pos} probes {msg}")
            .expect("Invalid progress template"),
    );
    pb.set_prefix(format!("{label:>16}"));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Wraps a probe so every issued probe advances a spinner.
pub(crate) struct ProgressProbe<P> {
    inner: P,
    bar: ProgressBar,
}

impl<P> ProgressProbe<P> {
    pub(crate) const fn new(inner: P, bar: ProgressBar) -> Self {
        Self { inner, bar }
    }

    pub(crate) const fn bar(&self) -> &ProgressBar {
        &self.bar
    }
}

#[async_trait]
impl<P: Probe> Probe for ProgressProbe<P> {
    async fn probe(&self, test_id: u64) -> ProbeOutcome {
        self.bar.set_message(format!("testing {test_id}"));
        let outcome = self.inner.probe(test_id).await;
        self.bar.inc(1);
        if outcome.is_failure() {
            self.bar.set_message(outcome.to_string());
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_counts_issued_probes() {
        let collection = SimulatedCollection::new(1_000);
        let probe = ProgressProbe::new(&collection, ProgressBar::hidden());

        assert_eq!(probe.probe(512).await, ProbeOutcome::NonEmpty);
        assert_eq!(probe.probe(2_048).await, ProbeOutcome::Empty);

        assert_eq!(probe.bar().position(), 2);
        assert_eq!(probe.bar().message(), "testing 2048");
    }

    #[tokio::test]
    async fn test_failure_shown_on_spinner() {
        let limit = RateLimit {
            status: Some(403),
            message: Some("API rate limit exceeded".to_string()),
            ..RateLimit::default()
        };
        let collection = SimulatedCollection::new(1_000).with_rate_limit_at(0, limit);
        let probe = ProgressProbe::new(&collection, ProgressBar::hidden());

        assert!(probe.probe(512).await.is_failure());

        assert_eq!(probe.bar().position(), 1);
        assert!(probe.bar().message().contains("403: API rate limit exceeded"));
    }
}
