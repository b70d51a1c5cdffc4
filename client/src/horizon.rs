//! HTTP implementation of [`LedgerClient`] against a Horizon-style REST API.

use crate::ledger::{AccountRecord, LedgerClient, OfferRecord, SubmitResult};
use crate::{ClientError, RejectReason};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tessera_tx::TransactionEnvelope;
use tessera_types::AccountId;

/// Default timeout for ledger requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connection timeout.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for a Horizon-style ledger REST endpoint.
///
/// - `GET  /accounts/{id}`         → account record
/// - `GET  /accounts/{id}/offers`  → open offers
/// - `POST /transactions`          → submit hex envelope
pub struct HorizonClient {
    base_url: String,
    http_client: reqwest::Client,
}

#[derive(Serialize)]
struct SubmitRequest<'a> {
    envelope: &'a str,
}

/// Error body returned by the ledger on a rejected transaction.
#[derive(Deserialize)]
struct RejectResponse {
    reason: RejectReason,
}

#[derive(Deserialize)]
struct OffersResponse {
    records: Vec<OfferRecord>,
}

impl HorizonClient {
    /// Create a client with default timeout settings.
    pub fn new(base_url: impl Into<String>) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            base_url: trim_base(base_url.into()),
            http_client,
        }
    }

    /// Create a client with a custom request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            base_url: trim_base(base_url.into()),
            http_client,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self
            .http_client
            .get(self.url(path))
            .send()
            .await
            .map_err(map_transport)?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::Rejected(RejectReason::AccountNotFound));
        }
        if !response.status().is_success() {
            return Err(ClientError::InvalidResponse(format!(
                "HTTP status {}",
                response.status()
            )));
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::InvalidResponse(format!("failed to parse response: {e}")))
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

fn map_transport(e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::Transport(format!("request timed out: {e}"))
    } else if e.is_connect() {
        ClientError::Transport(format!("connection failed: {e}"))
    } else {
        ClientError::Transport(e.to_string())
    }
}

#[async_trait]
impl LedgerClient for HorizonClient {
    async fn load_account(&self, id: &AccountId) -> Result<AccountRecord, ClientError> {
        self.get_json(&format!("accounts/{}", id.as_str())).await
    }

    async fn submit(&self, envelope: &TransactionEnvelope) -> Result<SubmitResult, ClientError> {
        let encoded = envelope
            .to_hex()
            .map_err(|e| ClientError::Encode(e.to_string()))?;

        let response = self
            .http_client
            .post(self.url("transactions"))
            .json(&SubmitRequest { envelope: &encoded })
            .send()
            .await
            .map_err(map_transport)?;

        let status = response.status();
        if status.is_success() {
            return response.json::<SubmitResult>().await.map_err(|e| {
                ClientError::InvalidResponse(format!("failed to parse submit result: {e}"))
            });
        }

        // Rejections come back as a structured reason body.
        match response.json::<RejectResponse>().await {
            Ok(reject) => Err(ClientError::Rejected(reject.reason)),
            Err(e) => Err(ClientError::InvalidResponse(format!(
                "HTTP status {status}, unparseable rejection: {e}"
            ))),
        }
    }

    async fn offers(&self, id: &AccountId) -> Result<Vec<OfferRecord>, ClientError> {
        let response: OffersResponse = self
            .get_json(&format!("accounts/{}/offers", id.as_str()))
            .await?;
        Ok(response.records)
    }
}
