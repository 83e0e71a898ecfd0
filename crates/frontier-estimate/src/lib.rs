//! Frontier estimation for monotonically numbered collections.
//!
//! This crate provides the search built on top of a single-query probe:
//!
//! - [`Probe`] - Asks whether any item exists at or beyond an identifier
//! - [`bracket`] - Exponential search for a power-of-two bracket
//! - [`refine`] - Greedy descending-power refinement inside the bracket
//! - [`FrontierEstimator`] - Runs both phases, resumable after an abort
//! - [`SimulatedCollection`] - In-memory probe with a known frontier

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod bracket;
mod estimator;
mod probe;
mod refine;
mod simulate;

pub use bracket::bracket;
pub use estimator::FrontierEstimator;
pub use probe::Probe;
pub use refine::refine;
pub use simulate::SimulatedCollection;
