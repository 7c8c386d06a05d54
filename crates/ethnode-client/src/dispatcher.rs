//! Request dispatch
//!
//! `RpcClient` turns a method name and parameters into one round trip:
//! build the envelope, send it over the bound transport, then decode either
//! the typed result or the node's error object. There is no retrying,
//! caching or batching; every `invoke` is a single independent exchange.

use ethnode_rpc::{RequestBuilder, ResponseEnvelope};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::transport::{create_transport, Transport};

pub struct RpcClient {
    requests: RequestBuilder,
    transport: Box<dyn Transport>,
}

impl RpcClient {
    /// Wrap an already bound transport
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self {
            requests: RequestBuilder::new(),
            transport,
        }
    }

    /// Create the transport described by `config` and wrap it
    pub fn connect(config: &ClientConfig) -> Result<Self> {
        let transport = create_transport(&config.connection, config.timeout)?;

        debug!(
            "Using {} transport at {}",
            config.connection.kind, config.connection.address
        );

        Ok(Self::new(transport))
    }

    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// Id of the most recent request (0 before the first call)
    pub fn last_request_id(&self) -> u64 {
        self.requests.last_id()
    }

    /// Call `method` and decode its result into `T`.
    ///
    /// Every call consumes a request id, whether or not it succeeds. Hex
    /// quantities are decoded only where `T` asks for it (see
    /// [`ethnode_rpc::Quantity`]).
    pub async fn invoke<T: DeserializeOwned>(&self, method: &str, params: Vec<Value>) -> Result<T> {
        let request = self.requests.build(method, params);
        let id = request.id();
        let payload = request.to_json()?;

        debug!("Invoking {} (id {})", method, id);

        let body = self.transport.send(&payload, id).await?;
        let envelope = ResponseEnvelope::parse(&body)?;

        if let Some(response_id) = &envelope.id {
            if response_id.as_u64() != Some(id) {
                warn!(
                    "Response id {} does not match request id {} for {}",
                    response_id, id, method
                );
            }
        }

        match envelope.decode::<T>()? {
            Ok(response) => Ok(response.result),
            Err(error) => {
                debug!("{} (id {}) failed: {}", method, id, error);
                Err(ClientError::Rpc(error))
            }
        }
    }

    /// Call `method` and return its result as untyped JSON
    pub async fn invoke_raw(&self, method: &str, params: Vec<Value>) -> Result<Value> {
        self.invoke(method, params).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::time::Duration;

    use ethnode_rpc::{ProtocolError, Quantity};
    use futures::future::join_all;
    use serde_json::json;

    use super::*;
    use crate::error::TransportError;
    use crate::transport::stub::StubTransport;

    #[tokio::test]
    async fn test_string_result() {
        let stub = StubTransport::replying(r#"{"id":1,"version":2.0,"result":"Geth/v1.0"}"#);
        let sent = stub.sent();
        let client = RpcClient::new(Box::new(stub));

        let version: String = client.invoke("web3_clientVersion", vec![]).await.unwrap();
        assert_eq!(version, "Geth/v1.0");

        let sent = sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0].0,
            json!({"id": 1, "version": 2.0, "method": "web3_clientVersion", "params": []})
        );
        assert_eq!(sent[0].1, 1);
    }

    #[tokio::test]
    async fn test_hex_result() {
        let client = RpcClient::new(Box::new(StubTransport::replying(r#"{"result":"0x1a"}"#)));

        let balance: Quantity = client
            .invoke("eth_getBalance", vec![json!("0xabc"), json!("latest")])
            .await
            .unwrap();
        assert_eq!(balance.value(), 26);
    }

    #[tokio::test]
    async fn test_rpc_error() {
        let client = RpcClient::new(Box::new(StubTransport::replying(
            r#"{"error":{"code":-32601,"message":"Method not found"}}"#,
        )));

        let err = client.invoke::<String>("eth_nope", vec![]).await.unwrap_err();
        match err {
            ClientError::Rpc(error) => {
                assert_eq!(error.code, -32601);
                assert_eq!(error.message, "Method not found");
            }
            other => panic!("expected RPC error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_wins_over_result() {
        let client = RpcClient::new(Box::new(StubTransport::replying(
            r#"{"id":1,"result":"0x1","error":{"code":-32602,"message":"invalid params"}}"#,
        )));

        let err = client.invoke::<Quantity>("eth_getBalance", vec![]).await.unwrap_err();
        assert!(matches!(err, ClientError::Rpc(e) if e.code == -32602));
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let client = RpcClient::new(Box::new(StubTransport::new(|_| {
            Err(TransportError::ConnectionClosed)
        })));

        let err = client.invoke::<u64>("eth_blockNumber", vec![]).await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::Transport(TransportError::ConnectionClosed)
        ));
        // The failed call still consumed its id
        assert_eq!(client.last_request_id(), 1);
    }

    #[tokio::test]
    async fn test_empty_body_is_decode_error() {
        let client = RpcClient::new(Box::new(StubTransport::replying("")));

        let err = client.invoke::<String>("net_version", vec![]).await.unwrap_err();
        assert!(matches!(err, ClientError::Decode(ProtocolError::Json(_))));
    }

    #[tokio::test]
    async fn test_decode_errors() {
        let client = RpcClient::new(Box::new(StubTransport::replying(r#"{"id":1,"version":2.0}"#)));
        let err = client.invoke::<String>("net_version", vec![]).await.unwrap_err();
        assert!(matches!(err, ClientError::Decode(ProtocolError::MissingResult)));

        let client = RpcClient::new(Box::new(StubTransport::replying(r#"{"result":"yes"}"#)));
        let err = client.invoke::<bool>("net_listening", vec![]).await.unwrap_err();
        assert!(matches!(err, ClientError::Decode(ProtocolError::Json(_))));

        let client = RpcClient::new(Box::new(StubTransport::replying(r#"{"result":"0xzz"}"#)));
        let err = client.invoke::<Quantity>("net_peerCount", vec![]).await.unwrap_err();
        assert!(matches!(err, ClientError::Decode(ProtocolError::Json(_))));
    }

    #[tokio::test]
    async fn test_sequential_ids_increase_from_one() {
        let client = RpcClient::new(Box::new(StubTransport::echoing_ids()));

        for expected in 1..=5u64 {
            let id: u64 = client.invoke("net_version", vec![]).await.unwrap();
            assert_eq!(id, expected);
        }
        assert_eq!(client.last_request_id(), 5);
    }

    #[tokio::test]
    async fn test_concurrent_ids_distinct() {
        let stub = StubTransport::echoing_ids().with_delay(Duration::from_millis(10));
        let client = RpcClient::new(Box::new(stub));

        let calls = (0..2).map(|_| client.invoke::<u64>("net_version", vec![]));
        let ids: HashSet<u64> = join_all(calls)
            .await
            .into_iter()
            .map(|r| r.unwrap())
            .collect();

        assert_eq!(ids, HashSet::from([1, 2]));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_ids_across_tasks() {
        let stub = StubTransport::echoing_ids().with_delay(Duration::from_millis(1));
        let sent = stub.sent();
        let client = Arc::new(RpcClient::new(Box::new(stub)));

        let handles: Vec<_> = (0..64)
            .map(|_| {
                let client = Arc::clone(&client);
                tokio::spawn(async move { client.invoke::<u64>("net_version", vec![]).await })
            })
            .collect();

        let mut ids = HashSet::new();
        for handle in handles {
            ids.insert(handle.await.unwrap().unwrap());
        }

        assert_eq!(ids.len(), 64);
        assert_eq!(ids, (1..=64).collect::<HashSet<u64>>());

        // The id handed to the transport matches the one inside the payload
        for (request, id) in sent.lock().unwrap().iter() {
            assert_eq!(request["id"], json!(id));
        }
    }

    #[tokio::test]
    async fn test_mismatched_response_id_still_returns() {
        let client = RpcClient::new(Box::new(StubTransport::replying(
            r#"{"id":42,"version":2.0,"result":"1"}"#,
        )));

        let version: String = client.invoke("net_version", vec![]).await.unwrap();
        assert_eq!(version, "1");
    }

    #[tokio::test]
    async fn test_odd_response_ids_on_error_branch() {
        for body in [
            r#"{"id":"1","error":{"code":-32601,"message":"Method not found"}}"#,
            r#"{"id":-1,"error":{"code":-32601,"message":"Method not found"}}"#,
        ] {
            let client = RpcClient::new(Box::new(StubTransport::replying(body)));
            let err = client.invoke::<String>("eth_nope", vec![]).await.unwrap_err();
            assert!(matches!(err, ClientError::Rpc(e) if e.message == "Method not found"));
        }
    }

    #[tokio::test]
    async fn test_odd_response_ids_on_success_branch() {
        for body in [
            r#"{"id":"1","result":"Geth/v1.0"}"#,
            r#"{"id":-1,"result":"Geth/v1.0"}"#,
            r#"{"id":1.5,"result":"Geth/v1.0"}"#,
        ] {
            let client = RpcClient::new(Box::new(StubTransport::replying(body)));
            let version: String = client.invoke("web3_clientVersion", vec![]).await.unwrap();
            assert_eq!(version, "Geth/v1.0");
        }
    }

    #[tokio::test]
    async fn test_invoke_raw() {
        let client = RpcClient::new(Box::new(StubTransport::replying(
            r#"{"id":1,"result":{"startingBlock":"0x0"}}"#,
        )));

        let value = client.invoke_raw("eth_syncing", vec![]).await.unwrap();
        assert_eq!(value, json!({"startingBlock": "0x0"}));
    }
}
