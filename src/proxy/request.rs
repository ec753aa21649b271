//! Outbound request preparation.
//!
//! # Responsibilities
//! - Capture method, headers, body and query of one inbound request
//! - Strip headers that must not reach the backend
//! - Re-encode the query string with order and duplicates preserved

use axum::body::Bytes;
use axum::http::header::{HOST, TRANSFER_ENCODING};
use axum::http::{HeaderMap, Method};
use url::form_urlencoded;

/// One request to be forwarded to a backend.
#[derive(Debug, Clone)]
pub struct ProxyRequest {
    pub method: Method,
    /// Upstream URL without query string.
    pub url: String,
    pub headers: HeaderMap,
    pub body: Bytes,
    /// Query parameters in arrival order.
    pub query: Vec<(String, String)>,
}

impl ProxyRequest {
    /// Build a request for `url`, scrubbing the inbound headers.
    pub fn new(
        method: Method,
        url: impl Into<String>,
        mut headers: HeaderMap,
        body: Bytes,
        raw_query: Option<&str>,
    ) -> Self {
        scrub_headers(&mut headers);
        Self {
            method,
            url: url.into(),
            headers,
            body,
            query: raw_query.map(parse_query).unwrap_or_default(),
        }
    }

    /// Upstream URL including the re-encoded query string.
    pub fn uri(&self) -> String {
        if self.query.is_empty() {
            return self.url.clone();
        }
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.query)
            .finish();
        format!("{}?{}", self.url, encoded)
    }
}

/// Remove headers that describe the inbound hop.
///
/// The client sets `host` from the upstream URL, and the body is fully
/// buffered so the inbound transfer framing no longer applies.
pub fn scrub_headers(headers: &mut HeaderMap) {
    headers.remove(HOST);
    headers.remove(TRANSFER_ENCODING);
}

pub fn parse_query(raw: &str) -> Vec<(String, String)> {
    form_urlencoded::parse(raw.as_bytes()).into_owned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_host_is_stripped_other_headers_kept() {
        let mut headers = HeaderMap::new();
        headers.insert(HOST, HeaderValue::from_static("gateway.local:8000"));
        headers.insert("Authorization", HeaderValue::from_static("Bearer t"));
        headers.append("x-tag", HeaderValue::from_static("a"));
        headers.append("x-tag", HeaderValue::from_static("b"));

        let req = ProxyRequest::new(
            Method::GET,
            "http://localhost:8001/recetas",
            headers,
            Bytes::new(),
            None,
        );

        assert!(req.headers.get(HOST).is_none());
        assert!(req.headers.get("host").is_none());
        assert_eq!(req.headers.get("authorization").unwrap(), "Bearer t");
        assert_eq!(req.headers.get_all("x-tag").iter().count(), 2);
    }

    #[test]
    fn test_query_order_and_duplicates_preserved() {
        let req = ProxyRequest::new(
            Method::GET,
            "http://localhost:8001/recetas",
            HeaderMap::new(),
            Bytes::new(),
            Some("tag=b&tag=a&q=sopa+de+ajo&empty="),
        );

        assert_eq!(
            req.query,
            vec![
                ("tag".to_string(), "b".to_string()),
                ("tag".to_string(), "a".to_string()),
                ("q".to_string(), "sopa de ajo".to_string()),
                ("empty".to_string(), String::new()),
            ]
        );
        assert_eq!(
            req.uri(),
            "http://localhost:8001/recetas?tag=b&tag=a&q=sopa+de+ajo&empty="
        );
    }

    #[test]
    fn test_uri_without_query() {
        let req = ProxyRequest::new(
            Method::DELETE,
            "http://localhost:8001/recetas/3",
            HeaderMap::new(),
            Bytes::new(),
            Some(""),
        );
        assert_eq!(req.uri(), "http://localhost:8001/recetas/3");
    }
}
