//! Durable single-record store for a wallet connection state.
//!
//! The store keeps exactly one [`WalletRecord`] (an address and a connected
//! flag) in a JSON file. Every write is an atomic replace, so readers in this
//! or any other process see either the previous record or the new one.
//!
//! # Quick Start
//!
//! ```no_run
//! use wallet_store::{StateStore, WalletRecord};
//!
//! # async fn run() -> wallet_store::Result<()> {
//! let store = StateStore::open("wallet_address.json").await?;
//!
//! store.set("0xABC").await?;
//! assert_eq!(store.get().await?, WalletRecord::connected("0xABC"));
//!
//! store.clear().await?;
//! assert!(!store.get().await?.connected);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod error;
mod record;
mod store;

pub use error::{Result, StoreError};
pub use record::WalletRecord;
pub use store::StateStore;
