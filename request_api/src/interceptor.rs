//! Hooks run on every outgoing request and every failed response.

use crate::{Error, RequestConfig};

/// Runs before a request is sent. Returning an error aborts the request
/// before it reaches the network.
pub trait RequestInterceptor: Send + Sync {
    fn on_request(&self, request: RequestConfig) -> Result<RequestConfig, Error>;
}

/// Observes failures before they are handed back to the caller.
/// Interceptors cannot recover from or rewrite the error.
pub trait ResponseInterceptor: Send + Sync {
    fn on_error(&self, error: &Error);
}

/// Forwards every request untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassThrough;

impl RequestInterceptor for PassThrough {
    fn on_request(&self, request: RequestConfig) -> Result<RequestConfig, Error> {
        tracing::debug!("{} {}", request.method, request.url);
        Ok(request)
    }
}

/// Logs a human-readable category message for every failure.
#[derive(Clone, Copy, Debug, Default)]
pub struct ErrorLogger;

impl ResponseInterceptor for ErrorLogger {
    fn on_error(&self, error: &Error) {
        let kind = error.kind();
        tracing::error!(kind = %kind, "{}", failure_message(error));
    }
}

/// Message for a server response with the given status.
pub fn status_message(status: u16) -> String {
    match status {
        400 => "Bad request parameters".to_string(),
        401 => "Unauthorized, please log in".to_string(),
        403 => "Access denied".to_string(),
        404 => "Requested resource not found".to_string(),
        500 => "Internal server error".to_string(),
        other => format!("Request error: {}", other),
    }
}

/// Message logged by [`ErrorLogger`] for `error`.
pub fn failure_message(error: &Error) -> String {
    match error {
        Error::HttpStatus { status, .. } => status_message(*status),
        Error::Network(_) => "Network error, please check your network connection".to_string(),
        Error::Config(message) => format!("Request configuration error: {}", message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listed_statuses_have_distinct_messages() {
        insta::assert_snapshot!(status_message(400), @"Bad request parameters");
        insta::assert_snapshot!(status_message(401), @"Unauthorized, please log in");
        insta::assert_snapshot!(status_message(403), @"Access denied");
        insta::assert_snapshot!(status_message(404), @"Requested resource not found");
        insta::assert_snapshot!(status_message(500), @"Internal server error");
    }

    #[test]
    fn unlisted_status_includes_code() {
        assert_eq!(status_message(418), "Request error: 418");
        assert_eq!(status_message(502), "Request error: 502");
    }

    #[test]
    fn config_message_carries_reason() {
        let err = Error::Config("invalid header name \"bad header\"".to_string());
        assert_eq!(
            failure_message(&err),
            "Request configuration error: invalid header name \"bad header\""
        );
    }

    #[test]
    fn server_message_follows_status() {
        let err = Error::HttpStatus {
            status: 403,
            body: "nope".to_string(),
        };
        assert_eq!(failure_message(&err), "Access denied");
    }

    #[test]
    fn pass_through_returns_request_unchanged() {
        let req = RequestConfig::get("/ping").with_header("Accept", "text/plain");
        let out = PassThrough.on_request(req.clone()).unwrap();
        assert_eq!(out.url, req.url);
        assert_eq!(out.headers, req.headers);
    }
}
