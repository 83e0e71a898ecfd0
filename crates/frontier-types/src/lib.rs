//! Core types for the frontier identifier estimator.
//!
//! This crate provides the fundamental data structures used throughout frontier:
//!
//! - [`Endpoint`] - A listing endpoint addressed by a `since`-style identifier parameter
//! - [`ProbeOutcome`] - Classified result of a single probe
//! - [`RateLimit`] - Throttling hints returned by the server
//! - [`Bracket`] - Power-of-two interval known to contain the frontier
//! - [`SearchConfig`] - Validated search range and resolution floor
//! - [`Checkpoint`] - Resumable position of an aborted search
//! - [`FrontierEstimate`] - Final estimate with diagnostics

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod endpoint;
mod error;
mod outcome;
mod search;

pub use endpoint::{DEFAULT_PARAM, Endpoint};
pub use error::{ConfigError, EstimateError, Result};
pub use outcome::{ProbeOutcome, RateLimit};
pub use search::{Bracket, Checkpoint, FrontierEstimate, SearchConfig, SearchState, pow2};
