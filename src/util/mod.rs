//! Formatting and terminal display helpers

pub mod display;
pub mod format;

pub use format::{derive_short_token_id, display_token_id, token_id_hex_prefix, truncate_address, TOKEN_ID_PLACEHOLDER};
