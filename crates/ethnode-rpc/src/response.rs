//! Response envelope decoding
//!
//! Responses are decoded in two phases. The body is first parsed into a
//! [`ResponseEnvelope`] that keeps `result` as untyped JSON; only when no
//! `error` member is present is `result` decoded into the caller's type.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{ProtocolError, Result, RpcError};

/// The untyped shape shared by every response
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseEnvelope {
    /// Any JSON value; nodes differ on id types
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub version: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<RpcError>,
}

/// A successfully decoded response
#[derive(Debug, Clone, PartialEq)]
pub struct Response<T> {
    pub id: Option<Value>,
    pub result: T,
}

impl ResponseEnvelope {
    pub fn parse(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// Decode the typed result.
    ///
    /// The outer `Result` fails when the envelope is malformed; the inner one
    /// carries the error object the node reported. An `error` member always
    /// wins over `result`.
    pub fn decode<T: DeserializeOwned>(self) -> Result<std::result::Result<Response<T>, RpcError>> {
        if let Some(error) = self.error {
            return Ok(Err(error));
        }

        let result = self.result.ok_or(ProtocolError::MissingResult)?;
        let result = serde_json::from_value(result)?;

        Ok(Ok(Response {
            id: self.id,
            result,
        }))
    }
}

/// Distinguishes `"result": null` (present, null) from a missing member.
fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
