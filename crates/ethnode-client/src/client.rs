//! Typed node API

use ethnode_rpc::methods::*;
use ethnode_rpc::{BlockTag, Quantity, SyncStatus, Transaction};
use serde_json::json;

use crate::config::ClientConfig;
use crate::dispatcher::RpcClient;
use crate::error::Result;

/// Client for an Ethereum-style node
///
/// One method per remote call; each delegates to [`RpcClient::invoke`].
pub struct NodeClient {
    rpc: RpcClient,
}

impl NodeClient {
    pub fn new(rpc: RpcClient) -> Self {
        Self { rpc }
    }

    /// Connect using the transport described by `config`
    pub fn connect(config: &ClientConfig) -> Result<Self> {
        Ok(Self::new(RpcClient::connect(config)?))
    }

    /// The underlying dispatcher, for methods without a typed wrapper
    pub fn rpc(&self) -> &RpcClient {
        &self.rpc
    }

    // ========================================================================
    // web3
    // ========================================================================

    /// Current client version
    pub async fn client_version(&self) -> Result<String> {
        self.rpc.invoke(WEB3_CLIENT_VERSION, vec![]).await
    }

    /// Keccak-256 (not the standardized SHA3-256) of `data`
    pub async fn sha3(&self, data: &str) -> Result<String> {
        self.rpc.invoke(WEB3_SHA3, vec![json!(data)]).await
    }

    // ========================================================================
    // net
    // ========================================================================

    /// Current network id
    pub async fn net_version(&self) -> Result<String> {
        self.rpc.invoke(NET_VERSION, vec![]).await
    }

    /// Whether the client is listening for network connections
    pub async fn net_listening(&self) -> Result<bool> {
        self.rpc.invoke(NET_LISTENING, vec![]).await
    }

    /// Number of peers currently connected
    pub async fn net_peer_count(&self) -> Result<u128> {
        let count: Quantity = self.rpc.invoke(NET_PEER_COUNT, vec![]).await?;
        Ok(count.value())
    }

    // ========================================================================
    // eth
    // ========================================================================

    /// Addresses owned by the client
    pub async fn accounts(&self) -> Result<Vec<String>> {
        self.rpc.invoke(ETH_ACCOUNTS, vec![]).await
    }

    /// Number of the most recent block
    pub async fn block_number(&self) -> Result<u128> {
        let number: Quantity = self.rpc.invoke(ETH_BLOCK_NUMBER, vec![]).await?;
        Ok(number.value())
    }

    /// Balance of `address` in wei
    pub async fn get_balance(&self, address: &str, block: BlockTag) -> Result<u128> {
        let balance: Quantity = self
            .rpc
            .invoke(ETH_GET_BALANCE, vec![json!(address), json!(block)])
            .await?;
        Ok(balance.value())
    }

    /// Balance of `address` at a block given as text (`latest`, `0x1b4`, ...)
    pub async fn get_balance_at(&self, address: &str, block: &str) -> Result<u128> {
        let block: BlockTag = block.parse()?;
        self.get_balance(address, block).await
    }

    /// Sync progress, or `NotSyncing`
    pub async fn syncing(&self) -> Result<SyncStatus> {
        self.rpc.invoke(ETH_SYNCING, vec![]).await
    }

    /// Submit a transaction, returning its hash
    pub async fn send_transaction(&self, transaction: &Transaction) -> Result<String> {
        let transaction = serde_json::to_value(transaction)?;
        self.rpc.invoke(ETH_SEND_TRANSACTION, vec![transaction]).await
    }
}
