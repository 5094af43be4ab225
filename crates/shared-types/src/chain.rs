//! Minimal chain primitives shared by all monitors.

use serde::{Deserialize, Serialize};

/// 32-byte hash (block hash, report hash, event topic)
pub type Hash = [u8; 32];

/// 20-byte account address
pub type Address = [u8; 20];

/// Reference to the block an evaluation cycle runs against.
///
/// Carried into finding metadata so every threshold reading is reproducible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRef {
    /// Block number
    pub number: u64,
    /// Block timestamp (unix seconds)
    pub timestamp: u64,
    /// Block hash
    pub hash: Hash,
}

impl BlockRef {
    /// Create a block reference with a zero hash (tests, synthetic cycles).
    pub fn at(number: u64, timestamp: u64) -> Self {
        Self {
            number,
            timestamp,
            hash: [0u8; 32],
        }
    }
}

/// A decoded event log as delivered by the hosting feed or fetched from
/// history. Payload decoding beyond the topic is the caller's concern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEvent {
    /// Emitting contract
    pub address: Address,
    /// Block the log was included in
    pub block_number: u64,
    /// Event signature topic
    pub topic: Hash,
    /// Raw ABI-encoded payload
    pub data: Vec<u8>,
}

/// Format the leading bytes of an address as `0x1234abcd…`.
pub fn short_hex(address: &Address) -> String {
    format!(
        "0x{:02x}{:02x}{:02x}{:02x}…",
        address[0], address[1], address[2], address[3]
    )
}

/// Format the leading bytes of a hash as `0x1234abcd…`.
pub fn short_hash(hash: &Hash) -> String {
    format!(
        "0x{:02x}{:02x}{:02x}{:02x}…",
        hash[0], hash[1], hash[2], hash[3]
    )
}
