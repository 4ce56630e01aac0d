// Ranking core: passport records in, leaderboard out
pub mod core;

// Collaborators: snapshot source, mint and oracle services
pub mod client;

// Wallet session over an injected key-value store
pub mod wallet;

// Dashboard view derivation and polling
pub mod handlers;

pub mod config;
pub mod util;

// Re-export commonly used types for convenience
pub use crate::core::*;
pub use util::format::{derive_short_token_id, truncate_address};
