//! JSON-serializable API request and response types.

use serde::{Deserialize, Serialize};
use wallet_store::WalletRecord;

/// Body of `POST /api/connect-wallet`.
#[derive(Debug, Deserialize)]
pub struct ConnectRequest {
    pub address: String,
}

/// Body of `POST /api/redirect-to-next`.
#[derive(Debug, Deserialize)]
pub struct RedirectRequest {
    pub url: String,
}

/// Liveness response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Acknowledgment for state-changing calls.
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub status: &'static str,
    pub message: &'static str,
}

impl ActionResponse {
    pub fn success(message: &'static str) -> Self {
        Self {
            status: "success",
            message,
        }
    }
}

/// Wallet status response.
#[derive(Debug, Serialize)]
pub struct WalletStatus {
    pub wallet_address: String,
    pub connected: bool,
}

impl From<WalletRecord> for WalletStatus {
    fn from(r: WalletRecord) -> Self {
        Self {
            wallet_address: r.address,
            connected: r.connected,
        }
    }
}
