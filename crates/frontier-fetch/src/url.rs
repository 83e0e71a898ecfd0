//! Probe URL construction.

use frontier_types::Endpoint;

/// Builds the listing URL asking for items after `test_id`.
///
/// URL format: `{url}?{param}={test_id}`, or `{url}&{param}={test_id}` when
/// the endpoint URL already carries a query string.
///
/// # Example
///
/// ```
/// use frontier_fetch::url::probe_url;
/// use frontier_types::Endpoint;
///
/// let endpoint = Endpoint::from_url("https://api.github.com/repositories", "since");
/// let url = probe_url(&endpoint, 33_554_432);
/// assert_eq!(url, "https://api.github.com/repositories?since=33554432");
/// ```
#[must_use]
pub fn probe_url(endpoint: &Endpoint, test_id: u64) -> String {
    let separator = if endpoint.url().contains('?') { '&' } else { '?' };
    format!(
        "{}{}{}={}",
        endpoint.url(),
        separator,
        endpoint.param(),
        test_id
    )
}
