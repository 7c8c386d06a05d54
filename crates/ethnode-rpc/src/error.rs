//! Error types for ethnode-rpc

use jsonrpsee::types::ErrorCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A hex quantity string could not be decoded
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Empty hex string")]
    Empty,

    #[error("Invalid hex digit in {0:?}")]
    InvalidDigit(String),

    #[error("Hex value out of range: {0}")]
    Overflow(String),
}

/// Error object reported by the remote node
///
/// The node executed the call and refused it (unknown method, bad params,
/// execution failure). Carried verbatim from the `error` member of the
/// response envelope.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("RPC error {code}: {message}")]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl RpcError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Classify the code against the JSON-RPC reserved ranges
    pub fn kind(&self) -> ErrorCode {
        ErrorCode::from(self.code)
    }

    pub fn is_method_not_found(&self) -> bool {
        matches!(self.kind(), ErrorCode::MethodNotFound)
    }
}

/// The response envelope did not have the expected shape
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Malformed response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Response has neither result nor error")]
    MissingResult,
}

pub type Result<T> = std::result::Result<T, ProtocolError>;
