//! Request dispatcher configured once with a base URL, timeout and
//! credential policy.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use serde::Serialize;
use url::Url;

use crate::{
    interceptor::{ErrorLogger, PassThrough, RequestInterceptor, ResponseInterceptor},
    request::Body,
    ClientConfig, Error, Payload, RequestConfig,
};

/// HTTP client that applies a fixed [`ClientConfig`] to every request.
///
/// Requests run through the request interceptors (a pass-through by
/// default), are sent, and the body is returned on success. Failures are
/// shown to every response interceptor (the [`ErrorLogger`] by default) and
/// then returned to the caller unchanged. Nothing is retried.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    config: ClientConfig,
    request_interceptors: Vec<Arc<dyn RequestInterceptor>>,
    response_interceptors: Vec<Arc<dyn ResponseInterceptor>>,
}

impl Client {
    /// Builds the underlying `reqwest::Client` from `config`.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .cookie_store(config.sends_credentials())
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::Config(e.to_string())
            })?;
        Ok(Self {
            http,
            config,
            request_interceptors: vec![Arc::new(PassThrough)],
            response_interceptors: vec![Arc::new(ErrorLogger)],
        })
    }

    /// Creates a client for `base_url` with the default timeout. Used for
    /// testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        let config = ClientConfig::new(base_url, crate::config::DEFAULT_TIMEOUT)
            .map_err(|e| Error::Config(e.to_string()))?;
        Self::new(config)
    }

    /// Appends a request interceptor; interceptors run in insertion order.
    pub fn with_request_interceptor(mut self, interceptor: Arc<dyn RequestInterceptor>) -> Self {
        self.request_interceptors.push(interceptor);
        self
    }

    /// Appends a response interceptor; interceptors run in insertion order.
    pub fn with_response_interceptor(
        mut self,
        interceptor: Arc<dyn ResponseInterceptor>,
    ) -> Self {
        self.response_interceptors.push(interceptor);
        self
    }

    /// Returns the configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Sends `request` and returns the response body.
    pub async fn request(&self, request: RequestConfig) -> Result<Payload, Error> {
        match self.dispatch(request).await {
            Ok(payload) => Ok(payload),
            Err(err) => Err(self.report(err)),
        }
    }

    /// Sends a GET request to `url`.
    pub async fn get(&self, url: &str) -> Result<Payload, Error> {
        self.request(RequestConfig::get(url)).await
    }

    /// Sends a DELETE request to `url`.
    pub async fn delete(&self, url: &str) -> Result<Payload, Error> {
        self.request(RequestConfig::delete(url)).await
    }

    /// Sends a POST request with `body` serialized as JSON.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<Payload, Error> {
        self.send_json(RequestConfig::post(url), body).await
    }

    /// Sends a PUT request with `body` serialized as JSON.
    pub async fn put_json<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<Payload, Error> {
        self.send_json(RequestConfig::put(url), body).await
    }

    /// Sends a PATCH request with `body` serialized as JSON.
    pub async fn patch_json<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<Payload, Error> {
        self.send_json(RequestConfig::patch(url), body).await
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        request: RequestConfig,
        body: &B,
    ) -> Result<Payload, Error> {
        match request.with_json(body) {
            Ok(request) => self.request(request).await,
            Err(e) => Err(self.report(Error::Config(format!(
                "failed to serialize request body: {}",
                e
            )))),
        }
    }

    async fn dispatch(&self, request: RequestConfig) -> Result<Payload, Error> {
        let request = self.intercept(request)?;
        let builder = self.build(&request)?;

        let resp = builder.send().await.map_err(Error::from_transport)?;
        let status = resp.status();
        let body = resp.text().await.map_err(Error::Network)?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::debug!(
                "{} {} returned {}: {}",
                request.method,
                request.url,
                status,
                snippet
            );
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        Ok(Payload::from_body(body))
    }

    /// Runs the request interceptors. A rejection is logged here and turned
    /// into a config failure since the request never left the process.
    fn intercept(&self, mut request: RequestConfig) -> Result<RequestConfig, Error> {
        for interceptor in &self.request_interceptors {
            request = interceptor.on_request(request).map_err(|e| {
                tracing::error!("Request error: {}", e);
                match e {
                    Error::Config(message) => Error::Config(message),
                    other => Error::Config(other.to_string()),
                }
            })?;
        }
        Ok(request)
    }

    fn build(&self, request: &RequestConfig) -> Result<reqwest::RequestBuilder, Error> {
        let raw = request.resolve_url(self.config.base_url());
        let url = Url::parse(&raw)
            .map_err(|e| Error::Config(format!("invalid URL {:?}: {}", raw, e)))?;

        let mut headers = HeaderMap::new();
        for (name, value) in &request.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| Error::Config(format!("invalid header name {:?}", name)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| Error::Config(format!("invalid value for header {}", name)))?;
            headers.append(name, value);
        }

        let has_content_type = headers.contains_key(CONTENT_TYPE);
        let mut builder = self.http.request(request.method.clone(), url).headers(headers);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        builder = match &request.body {
            Some(Body::Json(value)) => builder.json(value),
            Some(Body::Text(text)) if has_content_type => builder.body(text.clone()),
            Some(Body::Text(text)) => builder
                .header(CONTENT_TYPE, "text/plain;charset=utf-8")
                .body(text.clone()),
            None => builder,
        };
        Ok(builder)
    }

    fn report(&self, err: Error) -> Error {
        for interceptor in &self.response_interceptors {
            interceptor.on_error(&err);
        }
        err
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
