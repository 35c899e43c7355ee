//! Release server HTTP client
//!
//! All endpoints live under `{base}/api`. One client is built per publish
//! run and shared by authentication, release resolution, and asset upload.

pub mod auth;
pub mod releases;

pub use releases::{ReleaseAsset, ReleaseInfo, find_release};

use crate::error::{PublishError, Result};
use crate::output::OutputManager;
use reqwest::Client;
use std::time::Duration;

pub struct ServerClient {
    client: Client,
    address: String,
    output: OutputManager,
}

impl ServerClient {
    pub fn new(base_url: &str, output: OutputManager) -> Result<Self> {
        // Long read timeout: chunk POSTs of up to chunkSizeInMb may ride on
        // slow links. reqwest's pool handles transport-level resilience.
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(60))
            .read_timeout(Duration::from_secs(3600))
            .pool_idle_timeout(Duration::from_secs(300))
            .user_agent("release-asset-pusher/0.1")
            .build()
            .map_err(|e| PublishError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            address: base_url.trim_end_matches('/').to_string(),
            output,
        })
    }

    pub fn http_client(&self) -> &Client {
        &self.client
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub(crate) fn output(&self) -> &OutputManager {
        &self.output
    }

    /// Format a URL for an endpoint path under the `/api` base path.
    pub(crate) fn api_url(&self, path: &str) -> String {
        format!("{}/api/{}", self.address, path)
    }
}
