/// Passport snapshot sources
///
/// A source hands back the complete passport collection on every call. The
/// file source expects the JSON body of an `allPassports` query response; how
/// that file is kept current is up to the deployment.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::core::error::SourceError;
use crate::core::types::{PassportRecord, PassportSnapshot, RawPassport};

#[async_trait]
pub trait PassportSource: Send + Sync {
    async fn fetch_snapshot(&self) -> Result<PassportSnapshot, SourceError>;
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<AllPassportsData>,
    #[serde(default)]
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct AllPassportsData {
    #[serde(rename = "allPassports")]
    all_passports: Option<Vec<RawPassport>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

/// Decode a query response (or a bare passport array) into a snapshot
pub fn decode_snapshot(body: &str) -> Result<PassportSnapshot, SourceError> {
    let value: serde_json::Value = serde_json::from_str(body)?;

    let raw: Vec<RawPassport> = if value.is_array() {
        serde_json::from_value(value)?
    } else {
        let response: GraphQlResponse = serde_json::from_value(value)?;

        if let Some(errors) = response.errors.filter(|e| !e.is_empty()) {
            let messages = errors
                .into_iter()
                .map(|err| err.message)
                .collect::<Vec<_>>()
                .join(", ");
            return Err(SourceError::GraphQl(messages));
        }

        response
            .data
            .and_then(|d| d.all_passports)
            .ok_or(SourceError::MissingData)?
    };

    let records = raw.into_iter().map(PassportRecord::from_raw).collect();
    Ok(PassportSnapshot::new(records))
}

/// Reads the snapshot file again on every fetch
#[derive(Debug, Clone)]
pub struct FileSnapshotSource {
    path: PathBuf,
}

impl FileSnapshotSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PassportSource for FileSnapshotSource {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn fetch_snapshot(&self) -> Result<PassportSnapshot, SourceError> {
        let body = tokio::fs::read_to_string(&self.path).await?;
        let snapshot = decode_snapshot(&body)?;
        debug!(count = snapshot.records.len(), "Loaded passport snapshot");
        Ok(snapshot)
    }
}

/// Fixed record list
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    records: Vec<PassportRecord>,
}

impl StaticSource {
    pub fn new(records: Vec<PassportRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl PassportSource for StaticSource {
    async fn fetch_snapshot(&self) -> Result<PassportSnapshot, SourceError> {
        Ok(PassportSnapshot::new(self.records.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::TokenId;
    use std::io::Write;

    const RESPONSE: &str = r#"{
        "data": {
            "allPassports": [
                {
                    "tokenId": { "id": [171, 1, 2] },
                    "owner": "0xaaa",
                    "ownerChain": "chain-1",
                    "score": 70,
                    "achievements": ["EARLY_ADOPTER", "APP_CREATOR"]
                },
                {
                    "tokenId": { "id": "00ff" },
                    "owner": "0xbbb",
                    "ownerChain": "chain-2",
                    "score": null,
                    "achievements": null
                }
            ]
        }
    }"#;

    #[test]
    fn test_decode_query_response() {
        let snapshot = decode_snapshot(RESPONSE).unwrap();
        assert_eq!(snapshot.records.len(), 2);

        let first = &snapshot.records[0];
        assert_eq!(first.owner, "0xaaa");
        assert_eq!(first.effective_score(), 70);
        assert_eq!(first.achievements().len(), 2);
        assert_eq!(first.token_id, Some(TokenId::Bytes(vec![171, 1, 2])));

        let second = &snapshot.records[1];
        assert_eq!(second.effective_score(), 0);
        assert!(second.achievements().is_empty());
        assert_eq!(second.token_id, Some(TokenId::Hex("00ff".into())));
    }

    #[test]
    fn test_decode_bare_array() {
        let snapshot = decode_snapshot(r#"[{"tokenId":{"id":[1]},"owner":"0x1","score":3}]"#).unwrap();
        assert_eq!(snapshot.records.len(), 1);
        assert_eq!(snapshot.records[0].effective_score(), 3);
    }

    #[test]
    fn test_decode_query_errors() {
        let body = r#"{"data": null, "errors": [{"message": "boom"}, {"message": "again"}]}"#;
        match decode_snapshot(body) {
            Err(SourceError::GraphQl(msg)) => assert_eq!(msg, "boom, again"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_decode_missing_data() {
        assert!(matches!(decode_snapshot(r#"{"data": {}}"#), Err(SourceError::MissingData)));
        assert!(matches!(decode_snapshot(r#"{"errors": []}"#), Err(SourceError::MissingData)));
        assert!(matches!(decode_snapshot("not json"), Err(SourceError::Json(_))));
    }

    #[tokio::test]
    async fn test_file_source_rereads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", RESPONSE).unwrap();
        file.flush().unwrap();

        let source = FileSnapshotSource::new(file.path());
        let snapshot = source.fetch_snapshot().await.unwrap();
        assert_eq!(snapshot.records.len(), 2);

        std::fs::write(file.path(), "[]").unwrap();
        let snapshot = source.fetch_snapshot().await.unwrap();
        assert!(snapshot.records.is_empty());
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSnapshotSource::new(dir.path().join("absent.json"));
        assert!(matches!(source.fetch_snapshot().await, Err(SourceError::Io(_))));
    }
}
