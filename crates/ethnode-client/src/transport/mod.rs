//! Transports carrying serialized requests to the node
//!
//! A transport moves one opaque request body to the endpoint and hands back
//! the raw response body. It knows nothing about envelopes, ids or result
//! types; decoding belongs to the dispatcher.

mod http;
mod ipc;

#[cfg(test)]
pub(crate) mod stub;

use std::time::Duration;

use async_trait::async_trait;

use crate::config::{ConnectionDescriptor, ConnectionKind};
use crate::error::TransportError;

pub use http::HttpTransport;
pub use ipc::IpcTransport;

#[async_trait]
pub trait Transport: Send + Sync {
    /// Which kind of endpoint this transport talks to
    fn kind(&self) -> ConnectionKind;

    /// The bound endpoint, if any
    fn address(&self) -> Option<&str>;

    /// Bind the transport to an endpoint. Must happen before `send`.
    fn configure(&mut self, address: &str) -> Result<(), TransportError>;

    /// Send `payload` as the full request body and return the full response
    /// body.
    ///
    /// `id` is the id of the request inside `payload`. HTTP and IPC
    /// exchanges are one request per round trip, so they only use it for
    /// logging.
    async fn send(&self, payload: &str, id: u64) -> Result<String, TransportError>;
}

/// Create the transport selected by `descriptor`, bound to its address
pub fn create_transport(
    descriptor: &ConnectionDescriptor,
    timeout: Duration,
) -> Result<Box<dyn Transport>, TransportError> {
    let mut transport: Box<dyn Transport> = match descriptor.kind {
        ConnectionKind::Http => Box::new(HttpTransport::new(timeout)?),
        ConnectionKind::Ipc => Box::new(IpcTransport::new(timeout)),
    };

    transport.configure(&descriptor.address)?;
    Ok(transport)
}
