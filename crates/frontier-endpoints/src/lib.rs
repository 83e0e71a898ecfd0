//! Registry of known listing endpoints for the frontier estimator.
//!
//! # Example
//!
//! ```
//! use frontier_endpoints::EndpointRegistry;
//!
//! let registry = EndpointRegistry::global();
//!
//! if let Some(endpoint) = registry.get("github-users") {
//!     println!("{}: {}", endpoint.name(), endpoint.url());
//! }
//! ```

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use std::collections::HashMap;
use std::sync::OnceLock;

use frontier_types::Endpoint;

/// The endpoint metadata JSON embedded at compile time.
const ENDPOINTS_JSON: &str = include_str!("../data/endpoints.json");

/// Global endpoint registry instance.
static REGISTRY: OnceLock<EndpointRegistry> = OnceLock::new();

/// Registry of the listing endpoints frontier knows by name.
#[derive(Debug)]
pub struct EndpointRegistry {
    endpoints: HashMap<String, Endpoint>,
}

impl EndpointRegistry {
    /// Returns the global endpoint registry.
    ///
    /// The registry is initialized lazily on first access.
    #[must_use]
    pub fn global() -> &'static Self {
        REGISTRY.get_or_init(Self::load)
    }

    /// Loads endpoints from the embedded JSON data.
    fn load() -> Self {
        let endpoints: HashMap<String, Endpoint> =
            serde_json::from_str(ENDPOINTS_JSON).expect("Invalid endpoints.json");
        Self { endpoints }
    }

    /// Looks up an endpoint by ID (case-insensitive).
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Endpoint> {
        self.endpoints.get(&id.to_lowercase())
    }

    /// Returns all endpoints sorted by ID.
    pub fn all(&self) -> Vec<&Endpoint> {
        let mut endpoints: Vec<&Endpoint> = self.endpoints.values().collect();
        endpoints.sort_by(|a, b| a.id().cmp(b.id()));
        endpoints
    }

    /// Returns the total number of endpoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    /// Returns true if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Searches endpoints by name or ID pattern (case-insensitive).
    pub fn search(&self, pattern: &str) -> Vec<&Endpoint> {
        let pattern = pattern.to_lowercase();
        self.all()
            .into_iter()
            .filter(|e| {
                e.id().to_lowercase().contains(&pattern)
                    || e.name().to_lowercase().contains(&pattern)
            })
            .collect()
    }
}
