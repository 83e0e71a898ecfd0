//! Response classification.

use std::time::Duration;

use chrono::{DateTime, Utc};
use frontier_types::{ProbeOutcome, RateLimit};
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use serde_json::Value;

/// Header carrying the epoch second at which a GitHub quota resets.
const RATE_LIMIT_RESET: &str = "x-ratelimit-reset";

/// Classifies one listing response.
///
/// - 2xx with a JSON array (or an object with an `items` array) is
///   [`ProbeOutcome::NonEmpty`] or [`ProbeOutcome::Empty`].
/// - 403 and 429 are [`ProbeOutcome::RateLimited`]. GitHub answers an
///   exhausted quota with 403, so every 403 is treated as throttling.
/// - Anything else, including a 2xx body of another shape, is a
///   [`ProbeOutcome::TransportError`].
#[must_use]
pub fn classify_response(status: StatusCode, headers: &HeaderMap, body: &[u8]) -> ProbeOutcome {
    if status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS {
        return ProbeOutcome::RateLimited(rate_limit(status, headers, body));
    }

    if !status.is_success() {
        return match server_message(body) {
            Some(message) => ProbeOutcome::TransportError(format!("unexpected status {status}: {message}")),
            None => ProbeOutcome::TransportError(format!("unexpected status {status}")),
        };
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Array(items)) => emptiness(&items),
        Ok(Value::Object(map)) => match map.get("items") {
            Some(Value::Array(items)) => emptiness(items),
            _ => ProbeOutcome::TransportError("unexpected response shape: object without items array".into()),
        },
        Ok(other) => ProbeOutcome::TransportError(format!(
            "unexpected response shape: {}",
            json_kind(&other)
        )),
        Err(e) => ProbeOutcome::TransportError(format!("malformed response body: {e}")),
    }
}

fn emptiness(items: &[Value]) -> ProbeOutcome {
    if items.is_empty() {
        ProbeOutcome::Empty
    } else {
        ProbeOutcome::NonEmpty
    }
}

fn rate_limit(status: StatusCode, headers: &HeaderMap, body: &[u8]) -> RateLimit {
    RateLimit {
        status: Some(status.as_u16()),
        message: server_message(body),
        retry_after: header_u64(headers, RETRY_AFTER.as_str()).map(Duration::from_secs),
        reset_at: header_u64(headers, RATE_LIMIT_RESET)
            .and_then(|secs| i64::try_from(secs).ok())
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0)),
    }
}

/// Extracts the `message` field of a JSON error body.
fn server_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value.get("message")?.as_str().map(str::to_string)
}

fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers.get(name)?.to_str().ok()?.trim().parse().ok()
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn classify(status: u16, body: &str) -> ProbeOutcome {
        let status = StatusCode::from_u16(status).unwrap();
        classify_response(status, &HeaderMap::new(), body.as_bytes())
    }

    #[test]
    fn test_array_bodies() {
        assert_eq!(classify(200, r#"[{"id": 1}]"#), ProbeOutcome::NonEmpty);
        assert_eq!(classify(200, "[]"), ProbeOutcome::Empty);
    }

    #[test]
    fn test_items_object_bodies() {
        assert_eq!(
            classify(200, r#"{"total_count": 3, "items": [{"id": 7}]}"#),
            ProbeOutcome::NonEmpty
        );
        assert_eq!(classify(200, r#"{"items": []}"#), ProbeOutcome::Empty);
    }

    #[test]
    fn test_unexpected_shapes() {
        assert!(matches!(
            classify(200, r#"{"id": 1}"#),
            ProbeOutcome::TransportError(detail) if detail.contains("without items")
        ));
        assert!(matches!(
            classify(200, "42"),
            ProbeOutcome::TransportError(detail) if detail.ends_with("number")
        ));
        assert!(matches!(
            classify(200, "<html>"),
            ProbeOutcome::TransportError(detail) if detail.starts_with("malformed")
        ));
    }

    #[test]
    fn test_github_rate_limit() {
        let mut headers = HeaderMap::new();
        headers.insert(RATE_LIMIT_RESET, HeaderValue::from_static("1704110400"));
        headers.insert("x-ratelimit-remaining", HeaderValue::from_static("0"));
        let body = br#"{"message": "API rate limit exceeded for 127.0.0.1.", "documentation_url": "https://docs.github.com"}"#;

        let outcome = classify_response(StatusCode::FORBIDDEN, &headers, body);

        let ProbeOutcome::RateLimited(limit) = outcome.clone() else {
            panic!("expected rate limit, got {outcome:?}");
        };
        assert_eq!(limit.status, Some(403));
        assert_eq!(
            limit.message.as_deref(),
            Some("API rate limit exceeded for 127.0.0.1.")
        );
        assert_eq!(limit.retry_after, None);
        assert_eq!(
            limit.reset_at,
            DateTime::<Utc>::from_timestamp(1_704_110_400, 0)
        );
    }

    #[test]
    fn test_too_many_requests_with_retry_after() {
        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, HeaderValue::from_static("60"));

        let outcome = classify_response(StatusCode::TOO_MANY_REQUESTS, &headers, b"");

        assert_eq!(
            outcome,
            ProbeOutcome::RateLimited(RateLimit {
                status: Some(429),
                message: None,
                retry_after: Some(Duration::from_secs(60)),
                reset_at: None,
            })
        );
    }

    #[test]
    fn test_other_statuses_are_transport_errors() {
        assert_eq!(
            classify(500, ""),
            ProbeOutcome::TransportError("unexpected status 500 Internal Server Error".into())
        );
        assert_eq!(
            classify(404, r#"{"message": "Not Found"}"#),
            ProbeOutcome::TransportError("unexpected status 404 Not Found: Not Found".into())
        );
    }
}
