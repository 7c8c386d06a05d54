//! Request envelope and id allocation

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use serde_json::Value;

/// Protocol version stamped on every request
pub const PROTOCOL_VERSION: f64 = 2.0;

/// A JSON-RPC request as sent on the wire
///
/// Serializes as `{"id": .., "version": 2.0, "method": .., "params": [..]}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Request {
    id: u64,
    version: f64,
    method: String,
    params: Vec<Value>,
}

impl Request {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn version(&self) -> f64 {
        self.version
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Monotonic request id source
///
/// Starts at 0 and pre-increments, so the first id handed out is 1.
/// Allocation is atomic: concurrent callers always get distinct ids.
#[derive(Debug, Default)]
pub struct RequestIdAllocator {
    last: AtomicU64,
}

impl RequestIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> u64 {
        self.last.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// The most recently allocated id (0 before the first allocation)
    pub fn last_id(&self) -> u64 {
        self.last.load(Ordering::Relaxed)
    }
}

/// Builds request envelopes, stamping each with a fresh id
#[derive(Debug, Default)]
pub struct RequestBuilder {
    ids: RequestIdAllocator,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a request for `method`. Method and params are stored verbatim;
    /// an empty params list is a zero-argument call.
    pub fn build(&self, method: impl Into<String>, params: Vec<Value>) -> Request {
        Request {
            id: self.ids.next_id(),
            version: PROTOCOL_VERSION,
            method: method.into(),
            params,
        }
    }

    pub fn last_id(&self) -> u64 {
        self.ids.last_id()
    }
}
