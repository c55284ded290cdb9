//! Application state management.

use crate::config::Config;
use std::sync::Arc;
use wallet_store::StateStore;

/// Shared application state.
pub struct AppState {
    /// The only handle to the wallet record file.
    pub store: StateStore,
    /// Application configuration.
    pub config: Config,
}

impl AppState {
    /// Create new application state and open the wallet store.
    pub async fn new(config: Config) -> Result<Arc<Self>, Box<dyn std::error::Error>> {
        let store = StateStore::open(&config.state_file).await?;

        tracing::info!("Wallet state file: {}", store.path().display());

        Ok(Arc::new(Self { store, config }))
    }
}
