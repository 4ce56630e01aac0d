//! Wallet session state behind an injected key-value store

pub mod session;
pub mod store;

pub use session::{WalletKind, WalletSession, WALLET_KEY, WALLET_TYPE_KEY};
pub use store::{FileStore, KeyValueStore, MemoryStore};
