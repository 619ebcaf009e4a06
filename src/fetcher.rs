//! Retrieval of raw app records from the Gamalytic API.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;

use crate::app_id::AppId;
use crate::config;
use crate::error::{GamalyticError, Result};
use crate::models::RawRecord;

/// Source of raw app records.
///
/// Implementations make a single attempt per call; there is no retry.
pub trait Fetcher: Send {
    fn fetch(&self, app_id: AppId) -> Result<RawRecord>;
}

/// Fetches records from the public Gamalytic API over HTTP.
pub struct HttpFetcher {
    client: Client,
    base: String,
}

impl HttpFetcher {
    /// Build a fetcher for the public API whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_base(timeout, config::API_BASE)
    }

    /// Build a fetcher against another API root; records are read from
    /// `<base>/<app id>`.
    pub fn with_base(timeout: Duration, base: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        let base = base.into().trim_end_matches('/').to_string();
        Ok(Self { client, base })
    }

    /// URL the record for `app_id` is fetched from.
    pub fn url_for(&self, app_id: AppId) -> String {
        format!("{}/{}", self.base, app_id)
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, app_id: AppId) -> Result<RawRecord> {
        let url = self.url_for(app_id);
        log::info!("Fetching {}", url);

        let resp = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(GamalyticError::Unavailable(format!(
                "HTTP {}",
                status.as_u16()
            )));
        }
        let data: serde_json::Value = resp.json()?;
        Ok(RawRecord::new(data))
    }
}
