/// Error types for the passport board
///
/// Library layers return these typed errors; the binary and the dashboard
/// orchestration wrap them with `anyhow` context.

use thiserror::Error;

/// Token id could not be turned into a display value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("token id hex string is empty")]
    EmptyHex,

    #[error("token id contains non-hex characters: {0}")]
    InvalidHex(String),

    #[error("token id byte out of range: {0}")]
    ByteOutOfRange(i64),

    #[error("unsupported token id shape: {0}")]
    UnsupportedShape(String),
}

/// Failures while loading a passport snapshot
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("passport query failed: {0}")]
    GraphQl(String),

    #[error("snapshot has no allPassports data")]
    MissingData,
}

/// Failures talking to the mint or oracle services
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("no wallet owner supplied")]
    MissingOwner,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("unexpected service response: {0}")]
    Decode(String),
}

/// Failures of the wallet key-value store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("wallet store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("wallet store is corrupt: {0}")]
    Json(#[from] serde_json::Error),

    #[error("wallet address must not be empty")]
    EmptyAddress,
}

/// Configuration loading and validation failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
