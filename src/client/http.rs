/// Shared JSON-over-HTTP plumbing for the mint and oracle clients

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::error::ServiceError;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    details: Option<String>,
}

pub(crate) fn build_client(timeout: Duration) -> Result<Client, ServiceError> {
    Ok(Client::builder().timeout(timeout).build()?)
}

/// POST `body` as JSON and decode a JSON reply. One attempt only.
pub(crate) async fn post_json<B, R>(client: &Client, url: &str, body: &B) -> Result<R, ServiceError>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    let response = client.post(url).json(body).send().await?;
    let status = response.status();
    debug!(url, status = status.as_u16(), "Service responded");

    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let message = rejection_message(status, &text);
        warn!(url, status = status.as_u16(), message = %message, "Service rejected request");
        return Err(ServiceError::Rejected {
            status: status.as_u16(),
            message,
        });
    }

    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| ServiceError::Decode(e.to_string()))
}

/// Human-readable reason from an error body, falling back to the status text
fn rejection_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        match (parsed.error, parsed.details) {
            (Some(error), Some(details)) => return format!("{}: {}", error, details),
            (Some(error), None) => return error,
            (None, Some(details)) => return details,
            (None, None) => {}
        }
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() && !trimmed.starts_with('{') {
        return trimmed.to_string();
    }

    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string()
}
