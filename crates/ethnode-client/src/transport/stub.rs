//! In-process transport for dispatcher and facade tests

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::Transport;
use crate::config::ConnectionKind;
use crate::error::TransportError;

type Responder = Box<dyn Fn(&Value) -> Result<String, TransportError> + Send + Sync>;

/// Answers every request through `responder` and records what was sent
pub(crate) struct StubTransport {
    responder: Responder,
    sent: Arc<Mutex<Vec<(Value, u64)>>>,
    delay: Option<Duration>,
}

impl StubTransport {
    pub fn new(
        responder: impl Fn(&Value) -> Result<String, TransportError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            responder: Box::new(responder),
            sent: Arc::new(Mutex::new(Vec::new())),
            delay: None,
        }
    }

    /// Always answer with `body`
    pub fn replying(body: &str) -> Self {
        let body = body.to_string();
        Self::new(move |_| Ok(body.clone()))
    }

    /// Answer each request with its own id as the result
    pub fn echoing_ids() -> Self {
        Self::new(|request| {
            let id = &request["id"];
            Ok(json!({ "id": id, "version": 2.0, "result": id }).to_string())
        })
    }

    /// Sleep before answering so concurrent calls overlap
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Handle to the (request, id) pairs passed to `send`
    pub fn sent(&self) -> Arc<Mutex<Vec<(Value, u64)>>> {
        Arc::clone(&self.sent)
    }
}

#[async_trait]
impl Transport for StubTransport {
    fn kind(&self) -> ConnectionKind {
        ConnectionKind::Http
    }

    fn address(&self) -> Option<&str> {
        Some("stub://")
    }

    fn configure(&mut self, _address: &str) -> Result<(), TransportError> {
        Ok(())
    }

    async fn send(&self, payload: &str, id: u64) -> Result<String, TransportError> {
        let request: Value = serde_json::from_str(payload).expect("request should be valid JSON");
        self.sent.lock().unwrap().push((request.clone(), id));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        (self.responder)(&request)
    }
}
