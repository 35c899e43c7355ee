//! Publisher configuration consumed from the host build tool

use crate::channel::ReleaseChannel;
use crate::error::{PublishError, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Default upload chunk size in MiB.
pub const DEFAULT_CHUNK_SIZE_MB: u64 = 10;

fn default_chunk_size() -> u64 {
    DEFAULT_CHUNK_SIZE_MB
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublisherConfig {
    /// Release server root URL.
    pub base_url: String,
    pub username: String,
    pub password: String,
    /// Overrides the channel derived from the version string.
    #[serde(default)]
    pub channel: Option<ReleaseChannel>,
    #[serde(default = "default_chunk_size")]
    pub chunk_size_in_mb: u64,
}

impl PublisherConfig {
    /// Validate required fields before any network call is attempted.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(PublishError::Config(
                "baseUrl is required and cannot be empty".to_string(),
            ));
        }

        Url::parse(&self.base_url).map_err(|e| {
            PublishError::Config(format!("baseUrl '{}' is not a valid URL: {}", self.base_url, e))
        })?;

        if self.username.trim().is_empty() {
            return Err(PublishError::Config(
                "username is required and cannot be empty".to_string(),
            ));
        }

        if self.password.trim().is_empty() {
            return Err(PublishError::Config(
                "password is required and cannot be empty".to_string(),
            ));
        }

        if self.chunk_size_in_mb == 0 {
            return Err(PublishError::Config(
                "chunkSizeInMb must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn chunk_size_bytes(&self) -> u64 {
        self.chunk_size_in_mb * 1024 * 1024
    }
}
