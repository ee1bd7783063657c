//! HTTP client for querying and pruning the Sonarr download queue

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use super::models::{QueueItem, QueuePage, SystemStatus};

const API_KEY_HEADER: &str = "X-Api-Key";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum SonarrError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    #[error("Connection timeout")]
    Timeout,

    #[error("Unexpected response from {endpoint}: HTTP {status}")]
    BadStatus { endpoint: String, status: u16 },

    #[error("Malformed response body from {endpoint}: {message}")]
    BadBody { endpoint: String, message: String },
}

pub type Result<T> = std::result::Result<T, SonarrError>;

/// Client over the controller's v3 REST API, authenticated via a shared-secret
/// header on every call
pub struct SonarrClient {
    client: Client,
    api_root: String,
    api_key: String,
}

impl SonarrClient {
    /// Create a new client. `host` may be a bare host name (TLS assumed) or a
    /// full base URL with an explicit scheme.
    pub fn new(host: &str, api_key: &str, request_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(request_timeout)
            .user_agent(concat!("stallsweep/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SonarrError::RequestFailed(e.to_string()))?;

        Ok(Self {
            client,
            api_root: api_root(host),
            api_key: api_key.trim().to_string(),
        })
    }

    /// Controller status; used for the warm-up check
    pub async fn system_status(&self) -> Result<SystemStatus> {
        let url = format!("{}/system/status", self.api_root);
        self.get_json(&url).await
    }

    /// Fetch the whole queue, oldest grabs first, following pages until the
    /// reported total is satisfied
    pub async fn queue(&self, page_size: u32) -> Result<Vec<QueueItem>> {
        let mut records: Vec<QueueItem> = Vec::new();
        let mut page = 1u32;

        loop {
            let url = format!(
                "{}/queue?sortDirection=ascending&sortKey=added&includeUnknownSeriesItems=false&pageSize={}&page={}",
                self.api_root, page_size, page
            );
            let body: QueuePage = self.get_json(&url).await?;

            let fetched = body.records.len();
            records.extend(body.records);

            if fetched == 0 || records.len() as u64 >= body.total_records {
                break;
            }
            page += 1;
        }

        debug!(total = records.len(), "Queue fetched");
        Ok(records)
    }

    /// Remove a queue item, blocking re-acquisition of the same release and
    /// deleting it from the download client. A 404 means the item is already
    /// gone and is not treated as an error.
    pub async fn blocklist(&self, id: i64) -> Result<()> {
        let url = format!(
            "{}/queue/{}?blocklist=true&removeFromClient=true",
            self.api_root, id
        );

        let response = self
            .client
            .delete(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(id, "Queue item already gone");
            return Ok(());
        }
        if !status.is_success() {
            return Err(SonarrError::BadStatus {
                endpoint: format!("/queue/{id}"),
                status: status.as_u16(),
            });
        }

        Ok(())
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SonarrError::BadStatus {
                endpoint: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.json().await.map_err(|e| SonarrError::BadBody {
            endpoint: url.to_string(),
            message: e.to_string(),
        })
    }
}

fn map_transport_error(e: reqwest::Error) -> SonarrError {
    if e.is_timeout() {
        SonarrError::Timeout
    } else {
        SonarrError::RequestFailed(e.to_string())
    }
}

/// Derive the API root from the configured host. Bare host names get `https`
/// forced; an explicit scheme is honoured.
fn api_root(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.contains("://") {
        format!("{}/api/v3", host)
    } else {
        format!("https://{}/api/v3", host)
    }
}
