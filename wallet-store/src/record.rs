//! The persisted wallet record.

use serde::{Deserialize, Serialize};

/// Connection state of the single tracked wallet.
///
/// The default value (`address` empty, `connected` false) stands for
/// "no wallet connected". A connected record always carries a non-empty
/// address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletRecord {
    /// Opaque wallet address.
    #[serde(rename = "wallet_address")]
    pub address: String,
    /// Whether the wallet is connected.
    pub connected: bool,
}

impl WalletRecord {
    /// A connected record for `address`.
    pub fn connected(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            connected: true,
        }
    }

    /// Check the record invariant.
    pub fn is_valid(&self) -> bool {
        !self.connected || !self.address.is_empty()
    }
}
