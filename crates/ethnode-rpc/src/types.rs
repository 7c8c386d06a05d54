//! Wire models returned by or passed to the node

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::FormatError;
use crate::hex;

// ============================================================================
// Sync status
// ============================================================================

/// Progress of an ongoing chain sync
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Syncing {
    /// Block at which the import started
    #[serde(with = "hex::serde_quantity")]
    pub starting_block: u128,

    /// Current block, same as `eth_blockNumber`
    #[serde(with = "hex::serde_quantity")]
    pub current_block: u128,

    /// Estimated highest block
    #[serde(with = "hex::serde_quantity")]
    pub highest_block: u128,
}

/// Result of `eth_syncing`: either `false` or a progress object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SyncStatus {
    Syncing(Syncing),
    NotSyncing(bool),
}

impl SyncStatus {
    pub fn is_syncing(&self) -> bool {
        matches!(self, SyncStatus::Syncing(_))
    }

    pub fn progress(&self) -> Option<&Syncing> {
        match self {
            SyncStatus::Syncing(s) => Some(s),
            SyncStatus::NotSyncing(_) => None,
        }
    }
}

// ============================================================================
// Transactions
// ============================================================================

/// Transaction call object for `eth_sendTransaction`
///
/// Optional fields are left out of the request so the node applies its
/// own defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// 20 bytes, sender address
    pub from: String,

    /// 20 bytes, recipient (absent when creating a contract)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,

    /// Gas provided for execution
    #[serde(default, skip_serializing_if = "Option::is_none", with = "hex::serde_quantity_opt")]
    pub gas: Option<u128>,

    /// Price paid per unit of gas
    #[serde(default, skip_serializing_if = "Option::is_none", with = "hex::serde_quantity_opt")]
    pub gas_price: Option<u128>,

    /// Value sent with the transaction
    #[serde(default, skip_serializing_if = "Option::is_none", with = "hex::serde_quantity_opt")]
    pub value: Option<u128>,

    /// Compiled contract code, or method signature hash and encoded params
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,

    /// Overrides a pending transaction with the same nonce
    #[serde(default, skip_serializing_if = "Option::is_none", with = "hex::serde_quantity_opt")]
    pub nonce: Option<u128>,
}

// ============================================================================
// Block parameter
// ============================================================================

/// Default block parameter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BlockTag {
    #[default]
    Latest,
    Earliest,
    Pending,
    Number(u128),
}

impl fmt::Display for BlockTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockTag::Latest => f.write_str("latest"),
            BlockTag::Earliest => f.write_str("earliest"),
            BlockTag::Pending => f.write_str("pending"),
            BlockTag::Number(n) => f.write_str(&hex::encode(*n)),
        }
    }
}

impl FromStr for BlockTag {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest" => Ok(BlockTag::Latest),
            "earliest" => Ok(BlockTag::Earliest),
            "pending" => Ok(BlockTag::Pending),
            other => hex::decode(other).map(BlockTag::Number),
        }
    }
}

impl Serialize for BlockTag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}
