//! Error types for the request dispatcher.

use std::fmt;

/// Errors that can occur when dispatching a request.
///
/// Every variant maps to exactly one [`FailureKind`], see [`Error::kind`].
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The server answered with a non-success status. `body` holds at most
    /// the first 2000 bytes of the response body.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The request was sent but no usable response came back
    /// (timeout, connection refused, body cut off).
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),
    /// The request was never sent because of a local setup problem.
    #[error("Request configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Classifies this failure into one of the three failure categories.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::HttpStatus { status, .. } => FailureKind::Server { status: *status },
            Self::Network(_) => FailureKind::Network,
            Self::Config(_) => FailureKind::Config,
        }
    }

    /// Returns the HTTP status when the server responded.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Maps a transport error into the matching variant.
    ///
    /// Builder errors come from a request that could not be assembled, so they
    /// never reached the network.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::Config(err.to_string())
        } else {
            Self::Network(err)
        }
    }
}

/// Which side of the exchange a failure happened on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    /// The server responded with an error status.
    Server { status: u16 },
    /// The request went out but no response was received.
    Network,
    /// The request never left the process.
    Config,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Server { status } => write!(f, "server error ({})", status),
            Self::Network => write!(f, "network error"),
            Self::Config => write!(f, "config error"),
        }
    }
}

/// Errors raised while building a [`crate::ClientConfig`].
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("Timeout must be greater than zero")]
    ZeroTimeout,
    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}
