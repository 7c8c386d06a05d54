//! IPC transport over a local Unix domain socket
//!
//! Frames are newline-delimited JSON: the request is written followed by
//! `\n` and the response is read up to the next `\n`, at most
//! `max_frame` bytes. Each call opens its own connection, so concurrent
//! sends never interleave on one stream.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::Transport;
use crate::config::ConnectionKind;
use crate::error::TransportError;

/// Default upper bound on a single response frame
pub const DEFAULT_MAX_FRAME: u64 = 16 * 1024 * 1024;

pub struct IpcTransport {
    path: Option<PathBuf>,
    address: Option<String>,
    timeout: Duration,
    max_frame: u64,
}

impl IpcTransport {
    /// Create an unbound transport
    pub fn new(timeout: Duration) -> Self {
        Self {
            path: None,
            address: None,
            timeout,
            max_frame: DEFAULT_MAX_FRAME,
        }
    }

    /// Limit the size of a response frame, excluding the trailing newline
    pub fn with_max_frame(mut self, bytes: u64) -> Self {
        self.max_frame = bytes;
        self
    }

    /// Create a transport bound to the socket at `path`
    pub fn with_address(path: &str, timeout: Duration) -> Result<Self, TransportError> {
        let mut transport = Self::new(timeout);
        transport.configure(path)?;
        Ok(transport)
    }

    #[cfg(unix)]
    async fn exchange(
        path: &std::path::Path,
        payload: &str,
        max_frame: u64,
    ) -> Result<String, TransportError> {
        use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
        use tokio::net::UnixStream;

        let stream = UnixStream::connect(path).await?;
        let (read, mut write) = stream.into_split();

        write.write_all(payload.as_bytes()).await?;
        write.write_all(b"\n").await?;
        write.flush().await?;

        // One extra byte leaves room for the newline of a maximal frame
        let mut reader = BufReader::new(read.take(max_frame + 1));
        let mut line = String::new();
        let bytes_read = reader.read_line(&mut line).await?;
        if bytes_read == 0 {
            return Err(TransportError::ConnectionClosed);
        }
        if bytes_read as u64 > max_frame && !line.ends_with('\n') {
            return Err(TransportError::FrameTooLarge(max_frame));
        }

        Ok(line.trim_end().to_string())
    }

    #[cfg(not(unix))]
    async fn exchange(
        _path: &std::path::Path,
        _payload: &str,
        _max_frame: u64,
    ) -> Result<String, TransportError> {
        Err(TransportError::Unsupported("IPC"))
    }
}

#[async_trait]
impl Transport for IpcTransport {
    fn kind(&self) -> ConnectionKind {
        ConnectionKind::Ipc
    }

    fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    fn configure(&mut self, address: &str) -> Result<(), TransportError> {
        if address.trim().is_empty() {
            return Err(TransportError::InvalidAddress {
                address: address.to_string(),
                reason: "empty socket path".to_string(),
            });
        }

        self.path = Some(PathBuf::from(address));
        self.address = Some(address.to_string());
        Ok(())
    }

    async fn send(&self, payload: &str, id: u64) -> Result<String, TransportError> {
        let path = self.path.as_ref().ok_or(TransportError::NotConfigured)?;

        debug!("IPC request {} to {}", id, path.display());

        let exchange = Self::exchange(path, payload, self.max_frame);
        match tokio::time::timeout(self.timeout, exchange).await {
            Ok(result) => result,
            Err(_) => {
                warn!("IPC request {} timed out after {:?}", id, self.timeout);
                Err(TransportError::Timeout(self.timeout))
            }
        }
    }
}
