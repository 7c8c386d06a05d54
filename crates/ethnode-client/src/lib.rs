//! ethnode Client - Client library for Ethereum-style JSON-RPC nodes
//!
//! This crate provides:
//! - HTTP and IPC transports behind a common `Transport` trait
//! - `RpcClient`, the request dispatcher
//! - `NodeClient`, typed wrappers for individual node methods

pub mod client;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod transport;

pub use client::*;
pub use config::*;
pub use dispatcher::*;
pub use error::*;
pub use transport::{create_transport, HttpTransport, IpcTransport, Transport};
