/// Mint API client
///
/// The mint service signs and submits the mint operation itself; this side only
/// names the owner and reports back what the service minted.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::http::{build_client, post_json};
use crate::core::error::ServiceError;

#[async_trait]
pub trait MintService: Send + Sync {
    async fn mint(&self, owner: &str) -> Result<MintReceipt, ServiceError>;
}

#[derive(Debug, Serialize)]
struct MintRequest<'a> {
    owner: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct MintReceipt {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub token_id: Vec<u8>,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub metadata_uri: String,
    #[serde(default)]
    pub image_uri: String,
    #[serde(default)]
    pub content_hash: String,
}

pub struct HttpMintClient {
    client: Client,
    url: String,
}

impl HttpMintClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ServiceError> {
        Ok(Self {
            client: build_client(timeout)?,
            url: url.into(),
        })
    }
}

#[async_trait]
impl MintService for HttpMintClient {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn mint(&self, owner: &str) -> Result<MintReceipt, ServiceError> {
        if owner.trim().is_empty() {
            return Err(ServiceError::MissingOwner);
        }

        let receipt: MintReceipt = post_json(&self.client, &self.url, &MintRequest { owner }).await?;
        if !receipt.success {
            return Err(ServiceError::Rejected {
                status: 200,
                message: "mint service reported failure".to_string(),
            });
        }

        info!(owner, token_id = %hex::encode(&receipt.token_id), "🎫 Passport minted");
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[tokio::test]
    async fn test_mint_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/mint"))
            .and(body_json(json!({ "owner": "0xabc" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "token_id": [1, 2, 3],
                "owner": "0xabc",
                "metadata_uri": "ipfs://m",
                "image_uri": "ipfs://i",
                "content_hash": "0x00"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpMintClient::new(format!("{}/mint", server.uri()), TIMEOUT).unwrap();
        let receipt = client.mint("0xabc").await.unwrap();

        assert_eq!(receipt.token_id, vec![1, 2, 3]);
        assert_eq!(receipt.metadata_uri, "ipfs://m");
    }

    #[tokio::test]
    async fn test_mint_rejected_with_details() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/mint"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "error": "Mint failed",
                "details": "chain unavailable"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpMintClient::new(format!("{}/mint", server.uri()), TIMEOUT).unwrap();
        let err = client.mint("0xabc").await.unwrap_err();

        match err {
            ServiceError::Rejected { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Mint failed: chain unavailable");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_mint_reported_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": false })))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpMintClient::new(server.uri(), TIMEOUT).unwrap();
        assert!(matches!(
            client.mint("0xabc").await,
            Err(ServiceError::Rejected { status: 200, .. })
        ));
    }

    #[tokio::test]
    async fn test_mint_requires_owner() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = HttpMintClient::new(server.uri(), TIMEOUT).unwrap();
        assert!(matches!(client.mint("  ").await, Err(ServiceError::MissingOwner)));
    }
}
