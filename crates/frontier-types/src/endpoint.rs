//! Listing endpoint definitions.

use serde::{Deserialize, Serialize};

/// Query parameter used by GitHub-style listings ("items created since id").
pub const DEFAULT_PARAM: &str = "since";

/// A paginated listing endpoint whose items carry increasing integer ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Unique identifier (e.g., "github-users").
    id: String,
    /// Human-readable name (e.g., "GitHub users").
    name: String,
    /// Description of the collection behind the endpoint.
    #[serde(default)]
    description: String,
    /// Listing URL, optionally carrying fixed query parameters.
    url: String,
    /// Name of the query parameter that takes the tested identifier.
    #[serde(default = "default_param")]
    param: String,
}

fn default_param() -> String {
    DEFAULT_PARAM.to_string()
}

impl Endpoint {
    /// Creates a new endpoint.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
        param: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            url: url.into(),
            param: param.into(),
        }
    }

    /// Creates an ad-hoc endpoint for a bare URL, named after the URL itself.
    #[must_use]
    pub fn from_url(url: impl Into<String>, param: impl Into<String>) -> Self {
        let url = url.into();
        Self::new(url.clone(), url.clone(), "", url, param)
    }

    /// Returns the endpoint identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the human-readable name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the listing URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the identifier query parameter name.
    #[must_use]
    pub fn param(&self) -> &str {
        &self.param
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_defaults_to_since() {
        let json = r#"{"id":"x","name":"X","url":"https://example.com/items"}"#;
        let endpoint: Endpoint = serde_json::from_str(json).unwrap();
        assert_eq!(endpoint.param(), "since");
        assert_eq!(endpoint.description(), "");
    }

    #[test]
    fn test_from_url() {
        let endpoint = Endpoint::from_url("https://example.com/items", "after");
        assert_eq!(endpoint.id(), "https://example.com/items");
        assert_eq!(endpoint.url(), "https://example.com/items");
        assert_eq!(endpoint.param(), "after");
        assert_eq!(endpoint.to_string(), "https://example.com/items");
    }
}
