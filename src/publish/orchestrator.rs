//! Publish orchestration across make-results and their artifacts
//!
//! Authentication happens once per run. Make-results are worked strictly
//! one after another; only the artifacts inside a single make-result run
//! concurrently. One artifact failing never cancels its siblings.

use crate::channel::{normalize_version, ReleaseChannel};
use crate::config::PublisherConfig;
use crate::error::Result;
use crate::output::OutputManager;
use crate::publish::progress::ProgressTracker;
use crate::publish::{is_reserved_artifact, MakeResult, PublishContext, PublishOutcome, Publisher};
use crate::server::{find_release, ReleaseInfo, ServerClient};
use crate::upload::ChunkedUploader;
use async_trait::async_trait;
use futures::future::join_all;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArtifactStatus {
    Uploaded,
    Skipped,
    Failed,
}

pub struct ReleaseServerPublisher {
    config: PublisherConfig,
    output: OutputManager,
}

impl ReleaseServerPublisher {
    pub fn new(config: PublisherConfig, output: OutputManager) -> Self {
        Self { config, output }
    }

    /// Find the release record for {version, channel}, creating one when it
    /// is absent. Best-effort: listing or creation failures are logged and
    /// swallowed, and the upload proceeds against a release we could not
    /// observe (`None` means no asset list to skip against).
    async fn resolve_release(
        &self,
        server: &ServerClient,
        version: &str,
        channel: ReleaseChannel,
        token: &str,
    ) -> Option<ReleaseInfo> {
        let releases = match server.list_releases().await {
            Ok(releases) => releases,
            Err(e) => {
                self.output.warning(&format!("Could not list releases: {}", e));
                Vec::new()
            }
        };

        if let Some(found) = find_release(&releases, version, channel) {
            self.output.info(&format!(
                "Release {}/{} exists with {} assets",
                channel,
                version,
                found.assets.len()
            ));
            return Some(found.clone());
        }

        if let Err(e) = server.create_release(version, channel, token).await {
            self.output.warning(&format!(
                "Could not create release {}/{}: {}",
                channel, version, e
            ));
        }

        None
    }

    async fn publish_make_result(
        &self,
        server: &ServerClient,
        uploader: &ChunkedUploader,
        token: &str,
        make_result: &MakeResult,
    ) -> PublishOutcome {
        let raw_version = &make_result.package_json.version;
        let channel = ReleaseChannel::derive(raw_version, self.config.channel);
        let version = normalize_version(raw_version, channel);

        self.output.section(&format!(
            "Publishing {} artifacts for {}/{}",
            make_result.platform, channel, version
        ));

        let release = self.resolve_release(server, &version, channel, token).await;

        let artifacts: Vec<&Path> = make_result
            .artifacts
            .iter()
            .map(|p| p.as_path())
            .filter(|path| {
                if is_reserved_artifact(path) {
                    self.output
                        .detail(&format!("Ignoring packaging manifest {}", path.display()));
                    false
                } else {
                    true
                }
            })
            .collect();

        let total = artifacts.len();
        let progress = Arc::new(Mutex::new(ProgressTracker::new(total, self.output.clone())));

        let uploads = artifacts.into_iter().map(|artifact| {
            self.publish_artifact(
                uploader,
                token,
                &version,
                channel,
                &make_result.platform,
                artifact,
                release.as_ref(),
                Arc::clone(&progress),
            )
        });

        let statuses = join_all(uploads).await;

        let mut outcome = PublishOutcome::default();
        for status in statuses {
            match status {
                ArtifactStatus::Uploaded => outcome.uploaded += 1,
                ArtifactStatus::Skipped => outcome.skipped += 1,
                ArtifactStatus::Failed => outcome.failed += 1,
            }
        }
        outcome
    }

    #[allow(clippy::too_many_arguments)]
    async fn publish_artifact(
        &self,
        uploader: &ChunkedUploader,
        token: &str,
        version: &str,
        channel: ReleaseChannel,
        platform: &str,
        artifact: &Path,
        release: Option<&ReleaseInfo>,
        progress: Arc<Mutex<ProgressTracker>>,
    ) -> ArtifactStatus {
        let file_name = artifact
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| artifact.display().to_string());

        let already_uploaded = release
            .map(|release| release.has_asset(&file_name, platform))
            .unwrap_or(false);

        let status = if already_uploaded {
            self.output.info(&format!(
                "{} already on the server for {}, skipping",
                file_name, platform
            ));
            ArtifactStatus::Skipped
        } else {
            match uploader
                .upload(artifact, &file_name, version, channel, platform, token)
                .await
            {
                Ok(()) => ArtifactStatus::Uploaded,
                Err(e) => {
                    self.output
                        .error(&format!("Upload of {} failed: {}", file_name, e));
                    ArtifactStatus::Failed
                }
            }
        };

        // Increment and report under one lock so concurrent artifacts
        // cannot lose or interleave counts.
        progress.lock().await.settle();

        status
    }
}

#[async_trait]
impl Publisher for ReleaseServerPublisher {
    fn name(&self) -> &str {
        "release-server"
    }

    async fn publish(&self, ctx: &PublishContext) -> Result<PublishOutcome> {
        self.config.validate()?;

        let server = ServerClient::new(&self.config.base_url, self.output.clone())?;
        let token = server
            .login(&self.config.username, &self.config.password)
            .await?;

        let uploader = ChunkedUploader::new(
            server.http_client().clone(),
            server.address().to_string(),
            self.config.chunk_size_bytes(),
            self.output.clone(),
        );

        let mut outcome = PublishOutcome::default();
        for make_result in &ctx.make_results {
            let partial = self
                .publish_make_result(&server, &uploader, &token, make_result)
                .await;
            outcome.absorb(partial);
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PublishError;

    fn config(base_url: &str, username: &str, password: &str) -> PublisherConfig {
        PublisherConfig {
            base_url: base_url.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            channel: None,
            chunk_size_in_mb: 10,
        }
    }

    #[test]
    fn test_publisher_name() {
        let publisher = ReleaseServerPublisher::new(
            config("https://releases.example.com", "u", "p"),
            OutputManager::new_quiet(),
        );
        assert_eq!(publisher.name(), "release-server");
    }

    #[tokio::test]
    async fn test_publish_rejects_missing_config_before_any_network_call() {
        // An unroutable base URL proves validation short-circuits: a network
        // attempt would not produce a Config error.
        let publisher = ReleaseServerPublisher::new(
            config("https://releases.invalid", "", "p"),
            OutputManager::new_quiet(),
        );
        let ctx = PublishContext { make_results: vec![] };

        let err = publisher.publish(&ctx).await.unwrap_err();
        assert!(matches!(err, PublishError::Config(msg) if msg.contains("username")));
    }
}
