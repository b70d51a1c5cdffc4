//! Friendbot: best-effort test-network funding.
//!
//! Funding is not part of the protocol's correctness. Callers invoke
//! [`Friendbot::fund`] per account, log the outcome, and explicitly discard
//! the result — a failed funding call must never propagate into protocol
//! logic.

use crate::ClientError;
use std::time::Duration;
use tessera_types::AccountId;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for a test-network funding faucet: `GET {url}?addr={account}`.
pub struct Friendbot {
    url: String,
    http_client: reqwest::Client,
}

impl Friendbot {
    pub fn new(url: impl Into<String>) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            url: url.into(),
            http_client,
        }
    }

    /// Request starting native balance for `account`.
    pub async fn fund(&self, account: &AccountId) -> Result<(), ClientError> {
        let response = self
            .http_client
            .get(&self.url)
            .query(&[("addr", account.as_str())])
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        if response.status().is_success() {
            tracing::info!(account = %account, "friendbot funded account");
            Ok(())
        } else {
            Err(ClientError::InvalidResponse(format!(
                "friendbot HTTP status {}",
                response.status()
            )))
        }
    }
}
