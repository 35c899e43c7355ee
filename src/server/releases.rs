//! Release records and the list/create operations against the server
//!
//! The client only ever reads release records: it lists them to decide
//! whether to create one and to detect already-uploaded assets. Records are
//! never mutated locally.

use crate::channel::ReleaseChannel;
use crate::error::handlers::{HttpErrorHandler, NetworkErrorHandler};
use crate::error::Result;
use crate::server::ServerClient;
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};

/// Change-log used when this tool creates a release record.
pub const DEFAULT_CHANGE_LOG: &str = "Release created by release-asset-pusher";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseAsset {
    pub name: String,
    pub platform: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseInfo {
    pub version: String,
    pub channel: ReleaseChannel,
    #[serde(default)]
    pub change_log: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

impl ReleaseInfo {
    /// Idempotence key: an asset is "already uploaded" iff both its name
    /// and its platform match an entry on the release.
    pub fn has_asset(&self, name: &str, platform: &str) -> bool {
        self.assets
            .iter()
            .any(|asset| asset.name == name && asset.platform == platform)
    }
}

/// Linear scan for the first release matching both version and channel.
pub fn find_release<'a>(
    releases: &'a [ReleaseInfo],
    version: &str,
    channel: ReleaseChannel,
) -> Option<&'a ReleaseInfo> {
    releases
        .iter()
        .find(|release| release.version == version && release.channel == channel)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateReleaseRequest<'a> {
    version: &'a str,
    channel: ReleaseChannel,
    change_log: &'a str,
}

impl ServerClient {
    /// Fetch every release record known to the server.
    pub async fn list_releases(&self) -> Result<Vec<ReleaseInfo>> {
        let url = self.api_url("releases");
        self.output().verbose(&format!("Listing releases from {}", url));

        let response = self
            .http_client()
            .get(&url)
            .send()
            .await
            .map_err(|e| NetworkErrorHandler::handle_network_error(&e, "release listing"))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());
            return Err(HttpErrorHandler::handle_release_error(
                status,
                &error_text,
                "release listing",
            ));
        }

        let releases: Vec<ReleaseInfo> = response
            .json()
            .await
            .map_err(|e| NetworkErrorHandler::handle_network_error(&e, "release listing"))?;

        self.output()
            .detail(&format!("Server reports {} releases", releases.len()));
        Ok(releases)
    }

    /// Create a release record for {version, channel} with the fixed
    /// change-log message.
    pub async fn create_release(
        &self,
        version: &str,
        channel: ReleaseChannel,
        token: &str,
    ) -> Result<()> {
        let url = self.api_url("releases");
        self.output()
            .info(&format!("Creating release {}/{}", channel, version));

        let body = CreateReleaseRequest {
            version,
            channel,
            change_log: DEFAULT_CHANGE_LOG,
        };

        let response = self
            .http_client()
            .post(&url)
            .header(AUTHORIZATION, token)
            .json(&body)
            .send()
            .await
            .map_err(|e| NetworkErrorHandler::handle_network_error(&e, "release creation"))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());
            return Err(HttpErrorHandler::handle_release_error(
                status,
                &error_text,
                "release creation",
            ));
        }

        self.output()
            .success(&format!("Release {}/{} created", channel, version));
        Ok(())
    }
}
