//! Info command implementation.
//!
//! Shows an endpoint's details together with what a search over it costs.

use anyhow::{Context, Result};
use frontier_lib::prelude::*;
use frontier_lib::{pow2, probe_url};

use crate::display::format_thousands;

/// Show endpoint details and the probe budget of `config`.
pub(crate) fn show_info(endpoint_id: &str, config: SearchConfig) -> Result<()> {
    let registry = EndpointRegistry::global();
    let endpoint = registry
        .get(endpoint_id)
        .with_context(|| format!("Unknown endpoint: {endpoint_id}"))?;

    println!("Endpoint:    {}", endpoint.name());
    println!("ID:          {}", endpoint.id());
    println!("Description: {}", endpoint.description());
    println!("URL:         {}", endpoint.url());
    println!("First probe: {}", probe_url(endpoint, pow2(config.min_power())));

    println!("\nSearch:");
    println!(
        "  Bracketing:  2^{} .. 2^{} ({} .. {})",
        config.min_power(),
        config.max_power() - 1,
        format_thousands(pow2(config.min_power())),
        format_thousands(pow2(config.max_power() - 1)),
    );
    println!(
        "  Resolution:  2^{} ({})",
        config.floor_power(),
        format_thousands(config.resolution())
    );
    println!("  Worst case:  {} probes", config.max_probes());

    Ok(())
}
