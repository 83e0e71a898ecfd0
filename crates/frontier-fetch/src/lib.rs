//! HTTP probe transport for the frontier identifier estimator.
//!
//! This crate provides the network side of a probe:
//!
//! - [`url::probe_url`] - Builds the "since id" listing URL
//! - [`ProbeClient`] - HTTP client with optional retries for server errors
//! - [`EndpointProbe`] - A client bound to one endpoint, usable as a [`frontier_estimate::Probe`]
//! - [`classify_response`] - Maps a status, headers and body to a probe outcome

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod classify;
mod client;
pub mod url;

pub use classify::classify_response;
pub use client::{ClientConfig, ClientError, EndpointProbe, ProbeClient};
