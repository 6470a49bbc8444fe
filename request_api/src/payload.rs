//! Unwrapped response body.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Response body handed back on success.
///
/// Bodies that parse as JSON become [`Payload::Json`]; anything else,
/// including an empty body, is kept as text.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    Json(Value),
    Text(String),
}

impl Payload {
    pub fn from_body(body: String) -> Self {
        if body.trim().is_empty() {
            return Self::Text(body);
        }
        match serde_json::from_str::<Value>(&body) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(body),
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Json(_) => None,
        }
    }

    /// Deserializes the payload into `T`. A text payload is treated as a
    /// JSON string.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, serde_json::Error> {
        match self {
            Self::Json(value) => serde_json::from_value(value),
            Self::Text(text) => serde_json::from_value(Value::String(text)),
        }
    }

    /// Converts the payload back into a JSON value.
    pub fn into_value(self) -> Value {
        match self {
            Self::Json(value) => value,
            Self::Text(text) => Value::String(text),
        }
    }
}
