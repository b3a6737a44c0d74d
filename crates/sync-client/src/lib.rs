//! Remote sync client for mirroring rows into a spreadsheet-style service.
//!
//! This crate provides a Rust client for the remote collaborator that
//! favorites are mirrored to. It handles:
//! - Probing the service and tracking whether it is initialized
//! - Converting rows to the JSON the service expects
//! - Appending rows to a named sheet
//! - Error handling with enough context to log
//!
//! ## Wire format
//! - `GET  {endpoint}/health` answers 2xx when the service is usable
//! - `POST {endpoint}/sheets/{sheet}/append` with `{"values": [[...], ...]}`
//!   answers 2xx, optionally with `{"updatedRows": n}`

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info};

/// One flat row of cells
pub type SheetRow = Vec<serde_json::Value>;

/// Bound on every request made by `SheetSyncClient`
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur when interacting with the sync service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncClientError {
    #[error("Sync service has not been initialized")]
    NotInitialized,

    #[error("Invalid sync service address {addr}: {reason}")]
    InvalidAddress { addr: String, reason: String },

    #[error("Request to sync service failed: {0}")]
    Request(String),

    #[error("Sync service answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response from sync service: {0}")]
    InvalidResponse(String),
}

/// What the service reported after an append
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendReceipt {
    pub sheet: String,
    pub updated_rows: usize,
}

/// A remote collaborator that rows can be mirrored to.
///
/// Callers check `is_initialized` first and treat the append result as
/// informational.
#[async_trait]
pub trait RemoteSync: Send + Sync {
    /// Whether the collaborator is ready to accept appends
    fn is_initialized(&self) -> bool;

    /// Append `rows` to the sheet called `sheet`
    async fn append(&self, sheet: &str, rows: Vec<SheetRow>) -> Result<AppendReceipt, SyncClientError>;
}

#[derive(Serialize)]
struct AppendRequest<'a> {
    values: &'a [SheetRow],
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct AppendResponse {
    updated_rows: Option<usize>,
}

/// HTTP client for the sheet sync service.
///
/// Construction does no I/O. The client only accepts appends after
/// `initialize` has succeeded once.
pub struct SheetSyncClient {
    client: reqwest::Client,
    service_addr: String,
    initialized: AtomicBool,
}

impl SheetSyncClient {
    /// Build a client for the service at `addr` (e.g. "http://localhost:8080").
    pub fn new(addr: impl Into<String>) -> Result<Self, SyncClientError> {
        let service_addr = addr.into().trim_end_matches('/').to_string();
        reqwest::Url::parse(&service_addr).map_err(|e| SyncClientError::InvalidAddress {
            addr: service_addr.clone(),
            reason: e.to_string(),
        })?;

        let client = reqwest::Client::builder()
            .timeout(DEFAULT_REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SyncClientError::Request(e.to_string()))?;

        Ok(Self {
            client,
            service_addr,
            initialized: AtomicBool::new(false),
        })
    }

    /// Build a client and initialize it in one step.
    pub async fn connect(addr: impl Into<String>) -> Result<Self, SyncClientError> {
        let client = Self::new(addr)?;
        client.initialize().await?;
        Ok(client)
    }

    /// Probe the service and mark the client initialized on success.
    pub async fn initialize(&self) -> Result<(), SyncClientError> {
        let url = self.url(&["health"])?;
        info!("Connecting to sync service at {}", self.service_addr);

        let response = self.client.get(url).send().await.map_err(|e| {
            error!("Sync service health check failed: {}", e);
            SyncClientError::Request(e.to_string())
        })?;
        check_status(response).await?;

        self.initialized.store(true, Ordering::SeqCst);
        info!("Sync service ready at {}", self.service_addr);
        Ok(())
    }

    /// Get the address of the service this client talks to.
    pub fn service_address(&self) -> &str {
        &self.service_addr
    }

    fn url(&self, segments: &[&str]) -> Result<reqwest::Url, SyncClientError> {
        let invalid = |reason: String| SyncClientError::InvalidAddress {
            addr: self.service_addr.clone(),
            reason,
        };

        let mut url = reqwest::Url::parse(&self.service_addr).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("address cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl RemoteSync for SheetSyncClient {
    fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    async fn append(&self, sheet: &str, rows: Vec<SheetRow>) -> Result<AppendReceipt, SyncClientError> {
        if !self.is_initialized() {
            return Err(SyncClientError::NotInitialized);
        }

        let url = self.url(&["sheets", sheet, "append"])?;
        debug!("Appending {} rows to sheet {}", rows.len(), sheet);

        let response = self
            .client
            .post(url)
            .json(&AppendRequest { values: &rows })
            .send()
            .await
            .map_err(|e| {
                error!("Sync append to {} failed: {}", sheet, e);
                SyncClientError::Request(e.to_string())
            })?;
        let body = check_status(response).await?;

        let parsed: AppendResponse = if body.trim().is_empty() {
            AppendResponse::default()
        } else {
            serde_json::from_str(&body)
                .map_err(|e| SyncClientError::InvalidResponse(e.to_string()))?
        };

        Ok(AppendReceipt {
            sheet: sheet.to_string(),
            updated_rows: parsed.updated_rows.unwrap_or(rows.len()),
        })
    }
}

/// Turn a non-2xx answer into an error, otherwise return the body
async fn check_status(response: reqwest::Response) -> Result<String, SyncClientError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| SyncClientError::Request(e.to_string()))?;

    if !status.is_success() {
        error!("Sync service answered {}: {}", status, body);
        return Err(SyncClientError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(body)
}
