//! Publish capability and host-facing input types
//!
//! The host build tool hands over make-results (one per packaged target
//! platform) and consumes a single capability interface: a named publisher
//! with one `publish` operation.

pub mod orchestrator;
pub mod progress;

pub use orchestrator::ReleaseServerPublisher;
pub use progress::ProgressTracker;

use crate::error::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Base file name of the packaging step's internal manifest. It rides along
/// in the artifact list but must never be uploaded as a distributable asset.
pub const RESERVED_MANIFEST_NAME: &str = "manifest-releases";

#[derive(Debug, Clone, Deserialize)]
pub struct PackageMetadata {
    pub version: String,
}

/// One packaging output for a single target platform. The publisher only
/// consumes these; it never constructs them.
#[derive(Debug, Clone, Deserialize)]
pub struct MakeResult {
    #[serde(rename = "packageJSON")]
    pub package_json: PackageMetadata,
    pub artifacts: Vec<PathBuf>,
    pub platform: String,
}

/// Everything the host supplies for one publish invocation.
#[derive(Debug, Clone)]
pub struct PublishContext {
    pub make_results: Vec<MakeResult>,
}

/// Aggregate result of a publish run. Individual artifact failures are
/// logged where they happen and only counted here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishOutcome {
    pub uploaded: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl PublishOutcome {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    pub fn absorb(&mut self, other: PublishOutcome) {
        self.uploaded += other.uploaded;
        self.skipped += other.skipped;
        self.failed += other.failed;
    }
}

/// Fixed capability interface consumed by the host tool.
#[async_trait]
pub trait Publisher: Send + Sync {
    fn name(&self) -> &str;

    async fn publish(&self, ctx: &PublishContext) -> Result<PublishOutcome>;
}

/// True when the artifact's base file name is the reserved packaging
/// manifest, compared case-insensitively.
pub fn is_reserved_artifact(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.eq_ignore_ascii_case(RESERVED_MANIFEST_NAME))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_artifact_matches_case_insensitive() {
        assert!(is_reserved_artifact(Path::new("out/make/manifest-releases")));
        assert!(is_reserved_artifact(Path::new("MANIFEST-RELEASES")));
        assert!(!is_reserved_artifact(Path::new("out/make/app.zip")));
        assert!(!is_reserved_artifact(Path::new("manifest-releases.zip")));
    }

    #[test]
    fn test_make_result_deserializes_host_manifest() {
        let json = r#"{
            "packageJSON": {"version": "1.0.0-beta"},
            "artifacts": ["out/make/app.zip", "out/make/manifest-releases"],
            "platform": "darwin"
        }"#;

        let make_result: MakeResult = serde_json::from_str(json).unwrap();
        assert_eq!(make_result.package_json.version, "1.0.0-beta");
        assert_eq!(make_result.artifacts.len(), 2);
        assert_eq!(make_result.platform, "darwin");
    }

    #[test]
    fn test_outcome_absorb_and_success() {
        let mut total = PublishOutcome::default();
        total.absorb(PublishOutcome { uploaded: 2, skipped: 1, failed: 0 });
        total.absorb(PublishOutcome { uploaded: 0, skipped: 0, failed: 1 });
        assert_eq!(total, PublishOutcome { uploaded: 2, skipped: 1, failed: 1 });
        assert!(!total.is_success());
        assert!(PublishOutcome::default().is_success());
    }
}
