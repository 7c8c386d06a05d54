//! Connection configuration

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};

pub const DEFAULT_ADDRESS: &str = "http://127.0.0.1:8545";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const ENV_CONNECTION: &str = "ETHNODE_CONNECTION";
pub const ENV_ADDRESS: &str = "ETHNODE_ADDRESS";
pub const ENV_TIMEOUT_SECS: &str = "ETHNODE_TIMEOUT_SECS";

/// Which transport carries requests to the node
///
/// Serializes as `"HTTP"` / `"IPC"`; accepts any casing when parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConnectionKind {
    Http,
    Ipc,
}

impl fmt::Display for ConnectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionKind::Http => f.write_str("HTTP"),
            ConnectionKind::Ipc => f.write_str("IPC"),
        }
    }
}

impl FromStr for ConnectionKind {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("http") {
            Ok(ConnectionKind::Http)
        } else if s.eq_ignore_ascii_case("ipc") {
            Ok(ConnectionKind::Ipc)
        } else {
            Err(ClientError::Config(format!(
                "Unknown connection type {s:?}, expected HTTP or IPC"
            )))
        }
    }
}

impl<'de> Deserialize<'de> for ConnectionKind {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Transport kind plus the endpoint it binds to (URL or socket path)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionDescriptor {
    pub kind: ConnectionKind,
    pub address: String,
}

impl ConnectionDescriptor {
    pub fn new(kind: ConnectionKind, address: impl Into<String>) -> Self {
        Self {
            kind,
            address: address.into(),
        }
    }

    pub fn http(url: impl Into<String>) -> Self {
        Self::new(ConnectionKind::Http, url)
    }

    pub fn ipc(path: impl Into<String>) -> Self {
        Self::new(ConnectionKind::Ipc, path)
    }
}

/// Configuration for a node client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub connection: ConnectionDescriptor,

    /// Upper bound on a single request/response exchange
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            connection: ConnectionDescriptor::http(DEFAULT_ADDRESS),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn new(connection: ConnectionDescriptor) -> Self {
        Self {
            connection,
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build a config from `ETHNODE_CONNECTION`, `ETHNODE_ADDRESS` and
    /// `ETHNODE_TIMEOUT_SECS`, falling back to defaults for unset variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(kind) = lookup(ENV_CONNECTION) {
            config.connection.kind = kind.parse()?;
        }

        match lookup(ENV_ADDRESS) {
            Some(address) => config.connection.address = address,
            None if config.connection.kind == ConnectionKind::Ipc => {
                return Err(ClientError::Config(format!(
                    "{ENV_ADDRESS} must be set for IPC connections"
                )));
            }
            None => {}
        }

        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs.parse().map_err(|_| {
                ClientError::Config(format!("{ENV_TIMEOUT_SECS} is not a number: {secs:?}"))
            })?;
            if secs == 0 {
                return Err(ClientError::Config(format!(
                    "{ENV_TIMEOUT_SECS} must be greater than zero"
                )));
            }
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}
