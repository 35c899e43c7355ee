//! Wires parsed arguments into a publish run

use crate::channel::ReleaseChannel;
use crate::cli::args::Args;
use crate::config::PublisherConfig;
use crate::error::{PublishError, Result};
use crate::output::OutputManager;
use crate::publish::{MakeResult, PublishContext, PublishOutcome, Publisher, ReleaseServerPublisher};
use std::time::Instant;

pub struct Runner {
    args: Args,
    output: OutputManager,
}

impl Runner {
    pub fn new(args: Args) -> Self {
        let output = if args.quiet {
            OutputManager::new_quiet()
        } else {
            OutputManager::new(args.verbose)
        };

        Self { args, output }
    }

    pub async fn run(&self) -> Result<PublishOutcome> {
        let start_time = Instant::now();

        self.output.section("Release Asset Pusher");

        let config = self.build_config()?;
        let make_results = self.load_make_results()?;

        self.output.info(&format!(
            "Publishing {} make-results to {}",
            make_results.len(),
            config.base_url
        ));

        let publisher = ReleaseServerPublisher::new(config, self.output.clone());
        let ctx = PublishContext { make_results };
        let outcome = publisher.publish(&ctx).await?;

        let elapsed = start_time.elapsed();
        self.output.summary(
            "Publish summary",
            &[
                ("Uploaded", outcome.uploaded.to_string()),
                ("Skipped", outcome.skipped.to_string()),
                ("Failed", outcome.failed.to_string()),
                ("Elapsed", self.output.format_duration(elapsed)),
            ],
        );

        if outcome.is_success() {
            self.output.success("All artifacts settled successfully");
        } else {
            self.output
                .warning(&format!("{} artifacts failed to upload", outcome.failed));
        }

        Ok(outcome)
    }

    fn build_config(&self) -> Result<PublisherConfig> {
        let channel = match &self.args.channel {
            Some(raw) => Some(raw.parse::<ReleaseChannel>().map_err(PublishError::Config)?),
            None => None,
        };

        Ok(PublisherConfig {
            base_url: self.args.base_url.clone(),
            username: self.args.username.clone().unwrap_or_default(),
            password: self.args.password.clone().unwrap_or_default(),
            channel,
            chunk_size_in_mb: self.args.chunk_size_in_mb,
        })
    }

    fn load_make_results(&self) -> Result<Vec<MakeResult>> {
        let content = std::fs::read_to_string(&self.args.make_results).map_err(|e| {
            PublishError::Io(format!(
                "Failed to read make-results manifest {}: {}",
                self.args.make_results, e
            ))
        })?;

        let make_results: Vec<MakeResult> = serde_json::from_str(&content).map_err(|e| {
            PublishError::Parse(format!(
                "Invalid make-results manifest {}: {}",
                self.args.make_results, e
            ))
        })?;

        Ok(make_results)
    }
}
