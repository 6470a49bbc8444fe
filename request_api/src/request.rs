//! Per-call request description and URL resolution against the base URL.

use reqwest::Method;
use serde::Serialize;

/// Body attached to a request.
#[derive(Clone, Debug, PartialEq)]
pub enum Body {
    Json(serde_json::Value),
    Text(String),
}

/// Describes a single request: method, URL, headers, query pairs and body.
///
/// `url` is either relative to the client's base URL or absolute, in which
/// case the base URL is ignored. Header names and values are only checked
/// when the request is dispatched.
#[derive(Clone, Debug)]
pub struct RequestConfig {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub body: Option<Body>,
}

impl RequestConfig {
    /// Creates a request with no headers, query pairs or body.
    pub fn new(method: Method, url: &str) -> Self {
        Self {
            method,
            url: url.to_string(),
            headers: Vec::new(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Creates a GET request for `url`.
    pub fn get(url: &str) -> Self {
        Self::new(Method::GET, url)
    }

    /// Creates a POST request for `url`.
    pub fn post(url: &str) -> Self {
        Self::new(Method::POST, url)
    }

    /// Creates a PUT request for `url`.
    pub fn put(url: &str) -> Self {
        Self::new(Method::PUT, url)
    }

    /// Creates a PATCH request for `url`.
    pub fn patch(url: &str) -> Self {
        Self::new(Method::PATCH, url)
    }

    /// Creates a DELETE request for `url`.
    pub fn delete(url: &str) -> Self {
        Self::new(Method::DELETE, url)
    }

    /// Adds a header. Repeated names are all sent.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Appends a query pair.
    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Serializes `body` as the JSON request body.
    pub fn with_json<T: Serialize + ?Sized>(
        mut self,
        body: &T,
    ) -> Result<Self, serde_json::Error> {
        self.body = Some(Body::Json(serde_json::to_value(body)?));
        Ok(self)
    }

    /// Sets a plain-text body. Sent as `text/plain` unless a content type
    /// header is already set.
    pub fn with_text(mut self, body: &str) -> Self {
        self.body = Some(Body::Text(body.to_string()));
        self
    }

    /// Resolves `self.url` against `base_url`.
    pub fn resolve_url(&self, base_url: &str) -> String {
        combine_urls(base_url, &self.url)
    }
}

/// Returns true for `scheme://...` and protocol-relative `//...` URLs.
pub fn is_absolute_url(url: &str) -> bool {
    if url.starts_with("//") {
        return true;
    }
    match url.split_once("://") {
        Some((scheme, _)) => {
            let mut chars = scheme.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
                && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

/// Joins base URL and path with exactly one slash between them.
///
/// Absolute URLs and an empty path are returned without joining. A
/// protocol-relative URL (`//host/path`) takes the base URL's scheme.
pub fn combine_urls(base_url: &str, url: &str) -> String {
    if url.starts_with("//") {
        return match base_url.split_once(':') {
            Some((scheme, _)) => format!("{}:{}", scheme, url),
            None => url.to_string(),
        };
    }
    if is_absolute_url(url) {
        return url.to_string();
    }
    if url.is_empty() {
        return base_url.to_string();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        url.trim_start_matches('/')
    )
}
