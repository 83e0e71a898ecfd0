//! Display utilities and output formatting for the frontier CLI.

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use frontier_lib::prelude::*;
use serde::Serialize;

/// Output format for estimation results.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Format {
    Text,
    Json,
    Ndjson,
}

/// One estimation result, as printed.
#[derive(Debug, Serialize)]
pub(crate) struct EstimateRow {
    pub(crate) endpoint: String,
    pub(crate) measured_at: DateTime<Utc>,
    pub(crate) estimate: u64,
    pub(crate) bracket: Bracket,
    pub(crate) probes: u32,
    pub(crate) resolution: u64,
}

impl EstimateRow {
    /// Stamps an estimate with the current time.
    pub(crate) fn new(endpoint: &str, found: &FrontierEstimate) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            measured_at: Utc::now(),
            estimate: found.estimate,
            bracket: found.bracket,
            probes: found.probes,
            resolution: found.resolution,
        }
    }
}

/// Prints result rows to stdout in the requested format.
pub(crate) fn print_rows(rows: &[EstimateRow], format: Format) -> Result<()> {
    match format {
        Format::Text => {
            println!(
                "{:<20} {:<20} {:>16} {:<16} {:>6} {:>8}",
                "MEASURED", "ENDPOINT", "ESTIMATE", "BRACKET", "PROBES", "+/-"
            );
            println!("{}", "-".repeat(91));
            for row in rows {
                println!(
                    "{:<20} {:<20} {:>16} {:<16} {:>6} {:>8}",
                    row.measured_at.format("%Y-%m-%d %H:%M:%S"),
                    row.endpoint,
                    format_thousands(row.estimate),
                    row.bracket.to_string(),
                    row.probes,
                    row.resolution,
                );
            }
        }
        Format::Json => println!("{}", serde_json::to_string_pretty(rows)?),
        Format::Ndjson => {
            for row in rows {
                println!("{}", serde_json::to_string(row)?);
            }
        }
    }
    Ok(())
}

/// Groups digits in threes: `5234987` becomes `5,234,987`.
pub(crate) fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1_000), "1,000");
        assert_eq!(format_thousands(5_234_987), "5,234,987");
        assert_eq!(format_thousands(u64::MAX), "18,446,744,073,709,551,615");
    }

    #[test]
    fn test_row_serializes_bracket() {
        let found = FrontierEstimate {
            estimate: 5_234_176,
            bracket: Bracket::closed_at(23, true),
            probes: 16,
            resolution: 1024,
        };
        let row = EstimateRow::new("github-users", &found);
        let value = serde_json::to_value(&row).unwrap();

        assert_eq!(value["endpoint"], "github-users");
        assert_eq!(value["estimate"], 5_234_176);
        assert_eq!(value["bracket"]["low_power"], 22);
        assert_eq!(value["bracket"]["high_power"], 23);
        assert_eq!(value["probes"], 16);
    }
}
