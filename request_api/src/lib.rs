//! Pre-configured HTTP request dispatcher.
//!
//! A [`Client`] is built once from a [`ClientConfig`] (base URL, timeout,
//! credential policy). Each call runs the request interceptors, sends the
//! request and hands back the response body as a [`Payload`]. Failures are
//! classified as a server, network or config error, logged with a readable
//! message and returned unchanged.

mod client;
pub mod config;
mod errors;
pub mod interceptor;
mod payload;
pub mod request;
pub use self::client::Client;
pub use self::config::ClientConfig;
pub use self::errors::{ConfigError, Error, FailureKind};
pub use self::interceptor::{ErrorLogger, PassThrough, RequestInterceptor, ResponseInterceptor};
pub use self::payload::Payload;
pub use self::request::{Body, RequestConfig};
pub use reqwest::Method;
