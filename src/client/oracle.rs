/// Oracle client: asks the scoring agent to re-evaluate an owner

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::http::{build_client, post_json};
use crate::core::error::ServiceError;

#[async_trait]
pub trait OracleService: Send + Sync {
    async fn request_score(&self, owner: &str) -> Result<ScoreReport, ServiceError>;
}

#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    chain_id: &'a str,
    application_id: &'a str,
    owner: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ScoredAchievement {
    pub code: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub points: Option<u64>,
}

/// What the oracle reports back. Every field is optional on the wire.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ScoreReport {
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub score: Option<u64>,
    #[serde(default)]
    pub achievements: Vec<ScoredAchievement>,
    #[serde(default)]
    pub method: Option<String>,
}

pub struct HttpOracleClient {
    client: Client,
    url: String,
    chain_id: String,
    application_id: String,
}

impl HttpOracleClient {
    pub fn new(
        url: impl Into<String>,
        chain_id: impl Into<String>,
        application_id: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ServiceError> {
        Ok(Self {
            client: build_client(timeout)?,
            url: url.into(),
            chain_id: chain_id.into(),
            application_id: application_id.into(),
        })
    }
}

#[async_trait]
impl OracleService for HttpOracleClient {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn request_score(&self, owner: &str) -> Result<ScoreReport, ServiceError> {
        if owner.trim().is_empty() {
            return Err(ServiceError::MissingOwner);
        }

        let request = AnalyzeRequest {
            chain_id: &self.chain_id,
            application_id: &self.application_id,
            owner,
        };
        let report: ScoreReport = post_json(&self.client, &self.url, &request).await?;

        info!(
            owner,
            score = ?report.score,
            achievements = report.achievements.len(),
            "🔮 Oracle analysis returned"
        );
        Ok(report)
    }
}
