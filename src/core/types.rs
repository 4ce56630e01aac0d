use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::error::FormatError;

/// Passport as delivered by the `allPassports` query.
///
/// Nullable fields stay nullable here; `PassportRecord::from_raw` is the only
/// place they are resolved.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawPassport {
    #[serde(alias = "tokenId", default)]
    pub token_id: RawTokenId,

    pub owner: String,

    #[serde(alias = "ownerChain", default)]
    pub owner_chain: Option<String>,

    #[serde(default)]
    pub score: Option<i64>,

    #[serde(default)]
    pub achievements: Option<Vec<String>>,
}

/// `tokenId { id }` wrapper; `id` is a byte array or a hex string
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawTokenId {
    #[serde(default)]
    pub id: Value,
}

/// Opaque passport token identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenId {
    Bytes(Vec<u8>),
    Hex(String),
}

impl TryFrom<&Value> for TokenId {
    type Error = FormatError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Array(items) => {
                let mut bytes = Vec::with_capacity(items.len());
                for item in items {
                    let n = item
                        .as_i64()
                        .ok_or_else(|| FormatError::UnsupportedShape(item.to_string()))?;
                    let byte = u8::try_from(n).map_err(|_| FormatError::ByteOutOfRange(n))?;
                    bytes.push(byte);
                }
                Ok(TokenId::Bytes(bytes))
            }
            Value::String(s) => Ok(TokenId::Hex(s.clone())),
            other => Err(FormatError::UnsupportedShape(shape_name(other).to_string())),
        }
    }
}

fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// One passport in a snapshot, with nullable fields resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassportRecord {
    pub owner: String,
    pub owner_chain: String,
    /// `None` when the token id had an unrecognised shape
    pub token_id: Option<TokenId>,
    score: Option<i64>,
    achievements: Option<Vec<String>>,
}

impl PassportRecord {
    pub fn new(owner: impl Into<String>, score: Option<i64>) -> Self {
        Self {
            owner: owner.into(),
            owner_chain: String::new(),
            token_id: None,
            score,
            achievements: None,
        }
    }

    pub fn with_token_id(mut self, token_id: TokenId) -> Self {
        self.token_id = Some(token_id);
        self
    }

    pub fn with_achievements(mut self, achievements: Vec<String>) -> Self {
        self.achievements = Some(achievements);
        self
    }

    pub fn with_owner_chain(mut self, chain: impl Into<String>) -> Self {
        self.owner_chain = chain.into();
        self
    }

    pub fn from_raw(raw: RawPassport) -> Self {
        let token_id = match TokenId::try_from(&raw.token_id.id) {
            Ok(id) => Some(id),
            Err(e) => {
                warn!(owner = %raw.owner, error = %e, "Unrecognised token id, using placeholder");
                None
            }
        };

        Self {
            owner: raw.owner,
            owner_chain: raw.owner_chain.unwrap_or_default(),
            token_id,
            score: raw.score,
            achievements: raw.achievements,
        }
    }

    /// Score with null/absent treated as zero
    pub fn effective_score(&self) -> i64 {
        self.score.unwrap_or(0)
    }

    pub fn achievements(&self) -> &[String] {
        self.achievements.as_deref().unwrap_or(&[])
    }

    pub fn is_owned_by(&self, address: &str) -> bool {
        self.owner.eq_ignore_ascii_case(address)
    }
}

/// A ranked row of the leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub address: String,
    pub score: i64,
}

/// Where the connected wallet stands on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CallerSummary {
    pub rank: usize,
    pub score: i64,
    pub passport_found: bool,
}

/// One complete delivery of the passport collection
#[derive(Debug, Clone)]
pub struct PassportSnapshot {
    pub records: Vec<PassportRecord>,
    pub fetched_at: DateTime<Utc>,
}

impl PassportSnapshot {
    pub fn new(records: Vec<PassportRecord>) -> Self {
        Self {
            records,
            fetched_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_fields_default_at_boundary() {
        let raw: RawPassport = serde_json::from_value(json!({
            "tokenId": { "id": [1, 2] },
            "owner": "0xabc",
            "ownerChain": "e476",
            "score": null,
            "achievements": null
        }))
        .unwrap();

        let record = PassportRecord::from_raw(raw);
        assert_eq!(record.effective_score(), 0);
        assert!(record.achievements().is_empty());
        assert_eq!(record.token_id, Some(TokenId::Bytes(vec![1, 2])));
        assert_eq!(record.owner_chain, "e476");
    }

    #[test]
    fn test_missing_fields_default_at_boundary() {
        let raw: RawPassport = serde_json::from_value(json!({
            "tokenId": { "id": "deadbeef" },
            "owner": "0xabc"
        }))
        .unwrap();

        let record = PassportRecord::from_raw(raw);
        assert_eq!(record.effective_score(), 0);
        assert_eq!(record.token_id, Some(TokenId::Hex("deadbeef".to_string())));
        assert_eq!(record.owner_chain, "");
    }

    #[test]
    fn test_bad_token_id_keeps_record() {
        let raw: RawPassport = serde_json::from_value(json!({
            "tokenId": { "id": { "nested": true } },
            "owner": "0xabc",
            "score": 12
        }))
        .unwrap();

        let record = PassportRecord::from_raw(raw);
        assert_eq!(record.token_id, None);
        assert_eq!(record.effective_score(), 12);
    }

    #[test]
    fn test_token_id_byte_range() {
        assert_eq!(
            TokenId::try_from(&json!([1, 300])),
            Err(FormatError::ByteOutOfRange(300))
        );
        assert_eq!(
            TokenId::try_from(&json!([-1])),
            Err(FormatError::ByteOutOfRange(-1))
        );
        assert!(matches!(
            TokenId::try_from(&json!(["a"])),
            Err(FormatError::UnsupportedShape(_))
        ));
        assert_eq!(
            TokenId::try_from(&json!(42)),
            Err(FormatError::UnsupportedShape("number".to_string()))
        );
    }

    #[test]
    fn test_owner_match_ignores_case() {
        let record = PassportRecord::new("0xAbCd", Some(1));
        assert!(record.is_owned_by("0xabcd"));
        assert!(record.is_owned_by("0XABCD"));
        assert!(!record.is_owned_by("0xabc"));
    }
}
