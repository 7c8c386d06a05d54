//! Error types for ethnode-client

use std::time::Duration;

use ethnode_rpc::{FormatError, ProtocolError, RpcError};
use thiserror::Error;

/// Failure at the transport boundary
///
/// Transports never report a failed exchange as an empty body; every
/// failure ends up here.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Transport has no address configured")]
    NotConfigured,

    #[error("Invalid address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Response frame exceeds {0} bytes")]
    FrameTooLarge(u64),

    #[error("Connection closed before a response was received")]
    ConnectionClosed,

    #[error("{0} transport is not supported on this platform")]
    Unsupported(&'static str),
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The node executed the call and reported an error
    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error("Decode error: {0}")]
    Decode(#[from] ProtocolError),

    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ClientError>;
