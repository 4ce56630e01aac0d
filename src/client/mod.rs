//! Collaborators around the ranking core: passport snapshots and the
//! off-chain mint/oracle services

pub(crate) mod http;
pub mod mint;
pub mod oracle;
pub mod snapshot;

pub use mint::{HttpMintClient, MintReceipt, MintService};
pub use oracle::{HttpOracleClient, OracleService, ScoreReport, ScoredAchievement};
pub use snapshot::{decode_snapshot, FileSnapshotSource, PassportSource, StaticSource};
