//! Estimate the largest allocated id behind a paginated listing API.
//!
//! This is a facade crate that re-exports functionality from the frontier
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```
//! use frontier_lib::prelude::*;
//!
//! # futures::executor::block_on(async {
//! let collection = SimulatedCollection::new(912_345_678);
//! let found = FrontierEstimator::with_defaults(&collection).estimate().await?;
//!
//! assert!(912_345_678 - found.estimate < found.resolution);
//! # Ok::<(), EstimateError>(())
//! # }).unwrap();
//! ```

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use frontier_types::*;

// Re-export endpoint registry
pub use frontier_endpoints::EndpointRegistry;

// Re-export the search
pub use frontier_estimate::{FrontierEstimator, Probe, SimulatedCollection, bracket, refine};

// Re-export HTTP probing
#[cfg(feature = "fetch")]
pub use frontier_fetch::{
    ClientConfig, ClientError, EndpointProbe, ProbeClient, classify_response, url::probe_url,
};

/// Prelude module for convenient imports.
///
/// ```
/// use frontier_lib::prelude::*;
/// ```
pub mod prelude {
    pub use frontier_types::{
        Bracket, Checkpoint, ConfigError, Endpoint, EstimateError, FrontierEstimate,
        ProbeOutcome, RateLimit, Result, SearchConfig,
    };

    pub use frontier_endpoints::EndpointRegistry;

    pub use frontier_estimate::{FrontierEstimator, Probe, SimulatedCollection};

    #[cfg(feature = "fetch")]
    pub use frontier_fetch::{ClientConfig, EndpointProbe, ProbeClient};
}
