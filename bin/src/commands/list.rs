//! List command implementation.

use anyhow::Result;
use frontier_lib::prelude::*;

/// List known endpoints, optionally filtered by a search pattern.
pub(crate) fn list_endpoints(search: Option<&str>) -> Result<()> {
    let registry = EndpointRegistry::global();

    let endpoints = match search {
        Some(pattern) => registry.search(pattern),
        None => registry.all(),
    };

    if endpoints.is_empty() {
        println!("No endpoints found.");
        return Ok(());
    }

    println!("{:<16} {:<24} {:<8} URL", "ID", "NAME", "PARAM");
    println!("{}", "-".repeat(90));

    for endpoint in &endpoints {
        println!(
            "{:<16} {:<24} {:<8} {}",
            endpoint.id(),
            endpoint.name(),
            endpoint.param(),
            endpoint.url()
        );
    }

    println!("\nTotal: {} endpoints", endpoints.len());
    Ok(())
}
