//! Remote method names

// ============================================================================
// web3
// ============================================================================

/// Current client version
pub const WEB3_CLIENT_VERSION: &str = "web3_clientVersion";

/// Keccak-256 of the given data
pub const WEB3_SHA3: &str = "web3_sha3";

// ============================================================================
// net
// ============================================================================

/// Current network id
pub const NET_VERSION: &str = "net_version";

/// Whether the client is listening for network connections
pub const NET_LISTENING: &str = "net_listening";

/// Number of connected peers
pub const NET_PEER_COUNT: &str = "net_peerCount";

// ============================================================================
// eth
// ============================================================================

/// Addresses owned by the client
pub const ETH_ACCOUNTS: &str = "eth_accounts";

/// Number of the most recent block
pub const ETH_BLOCK_NUMBER: &str = "eth_blockNumber";

/// Balance of an address at a given block
pub const ETH_GET_BALANCE: &str = "eth_getBalance";

/// Sync progress, or `false` when not syncing
pub const ETH_SYNCING: &str = "eth_syncing";

/// Create a message call or contract creation transaction
pub const ETH_SEND_TRANSACTION: &str = "eth_sendTransaction";
