//! Persistence Gateway — HTTP JSON client for record create/update/fetch.
//!
//! The gateway is the only network seam in the crate. It speaks a small
//! JSON API: POST a payload to create a record, PUT to update one by id,
//! GET to fetch the record stored for a username. Requests carry an
//! explicit optional bearer token and a configured timeout; there is no
//! automatic retry — a failed submit surfaces the error and the caller
//! keeps the in-memory document, so the user retries deliberately.
//!
//! [`RecordGateway`] is the trait the session works against; tests swap in
//! an in-memory implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use crate::document::{DocumentKind, RawFields};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("gateway request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("gateway rejected the request ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("no record stored for '{0}'")]
    NotFound(String),
}

/// The record as the gateway accepts it: which kind of document, whose it
/// is, the chosen template, and the document's raw field map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordPayload {
    pub kind: DocumentKind,
    pub username: String,
    pub template_id: String,
    pub fields: RawFields,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedRecord {
    pub id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchedRecord {
    pub id: Uuid,
    pub kind: DocumentKind,
    pub username: String,
    pub template_id: String,
    pub fields: RawFields,
}

/// Error body the gateway sends on failures; only the message survives
/// into [`GatewayError::Api`].
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Async persistence operations the session depends on.
#[async_trait]
pub trait RecordGateway: Send + Sync {
    async fn create_record(&self, payload: &RecordPayload) -> Result<CreatedRecord, GatewayError>;

    async fn update_record(&self, id: Uuid, payload: &RecordPayload) -> Result<(), GatewayError>;

    async fn fetch_record(&self, username: &str) -> Result<FetchedRecord, GatewayError>;
}

/// Production gateway: JSON over HTTP with an optional bearer token.
pub struct HttpGateway {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpGateway {
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(HttpGateway {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    fn records_url(&self) -> String {
        format!("{}/api/v1/records", self.base_url)
    }

    fn record_url(&self, id: Uuid) -> String {
        format!("{}/api/v1/records/{id}", self.base_url)
    }

    fn user_record_url(&self, username: &str) -> String {
        format!("{}/api/v1/users/{username}/record", self.base_url)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl RecordGateway for HttpGateway {
    async fn create_record(&self, payload: &RecordPayload) -> Result<CreatedRecord, GatewayError> {
        let response = self
            .authorize(self.client.post(self.records_url()))
            .json(payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }
        let created: CreatedRecord = response.json().await?;
        info!(
            "created {} record {} for '{}'",
            payload.kind, created.id, payload.username
        );
        Ok(created)
    }

    async fn update_record(&self, id: Uuid, payload: &RecordPayload) -> Result<(), GatewayError> {
        let response = self
            .authorize(self.client.put(self.record_url(id)))
            .json(payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }
        info!(
            "updated {} record {} for '{}'",
            payload.kind, id, payload.username
        );
        Ok(())
    }

    async fn fetch_record(&self, username: &str) -> Result<FetchedRecord, GatewayError> {
        let response = self
            .authorize(self.client.get(self.user_record_url(username)))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(GatewayError::NotFound(username.to_string()));
        }
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }
        let fetched: FetchedRecord = response.json().await?;
        info!("fetched {} record {} for '{username}'", fetched.kind, fetched.id);
        Ok(fetched)
    }
}

/// Turns a non-success response into [`GatewayError::Api`], preferring the
/// gateway's own error envelope over the raw body.
async fn api_error(response: Response) -> GatewayError {
    let status = response.status().as_u16();
    let message = match response.text().await {
        Ok(body) => match serde_json::from_str::<ErrorEnvelope>(&body) {
            Ok(envelope) => envelope.error.message,
            Err(_) => {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    "gateway returned no error detail".to_string()
                } else {
                    trimmed.to_string()
                }
            }
        },
        Err(_) => "gateway error body could not be read".to_string(),
    };
    error!("gateway error ({status}): {message}");
    GatewayError::Api { status, message }
}
