//! Command-line argument parsing

use clap::Parser;

#[derive(Parser)]
#[command(name = "release-asset-pusher")]
#[command(about = "Publishes desktop build artifacts to a release server with chunked upload")]
#[command(version, author)]
pub struct Args {
    /// Release server root URL
    #[arg(
        long = "base-url",
        short = 'b',
        help = "Release server root URL, e.g. https://releases.example.com"
    )]
    pub base_url: String,

    /// Username for server authentication
    #[arg(
        long = "username",
        short = 'u',
        help = "Username for release server authentication"
    )]
    pub username: Option<String>,

    /// Password for server authentication
    #[arg(
        long = "password",
        short = 'p',
        help = "Password for release server authentication"
    )]
    pub password: Option<String>,

    /// Channel override (derived from the version when omitted)
    #[arg(
        long = "channel",
        short = 'c',
        help = "Release channel override: stable, beta, alpha, rc"
    )]
    pub channel: Option<String>,

    /// Upload chunk size in MiB
    #[arg(
        long = "chunk-size-mb",
        default_value = "10",
        help = "Upload chunk size in MiB"
    )]
    pub chunk_size_in_mb: u64,

    /// Path to the make-results JSON manifest produced by the build tool
    #[arg(
        long = "make-results",
        short = 'm',
        help = "Path to the make-results JSON manifest"
    )]
    pub make_results: String,

    /// Verbose output
    #[arg(long = "verbose", short = 'v', help = "Enable verbose output")]
    pub verbose: bool,

    /// Quiet output
    #[arg(long = "quiet", short = 'q', help = "Suppress non-error output")]
    pub quiet: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Args::parse()
    }

    /// Validate arguments
    pub fn validate(&self) -> Result<(), String> {
        if !std::path::Path::new(&self.make_results).exists() {
            return Err(format!("Make-results file does not exist: {}", self.make_results));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("Base URL must start with http:// or https://".to_string());
        }

        if self.chunk_size_in_mb == 0 {
            return Err("Chunk size must be greater than 0".to_string());
        }

        if let Some(channel) = &self.channel {
            match channel.to_ascii_lowercase().as_str() {
                "stable" | "beta" | "alpha" | "rc" => {}
                _ => return Err("Channel must be one of: stable, beta, alpha, rc".to_string()),
            }
        }

        Ok(())
    }

    /// Load configuration from environment variables
    pub fn from_env(mut self) -> Self {
        if self.username.is_none() {
            self.username = std::env::var("RELEASE_PUSHER_USERNAME").ok();
        }

        if self.password.is_none() {
            self.password = std::env::var("RELEASE_PUSHER_PASSWORD").ok();
        }

        if let Ok(chunk_size) = std::env::var("RELEASE_PUSHER_CHUNK_SIZE_MB") {
            if let Ok(c) = chunk_size.parse() {
                self.chunk_size_in_mb = c;
            }
        }

        if std::env::var("RELEASE_PUSHER_VERBOSE").is_ok() {
            self.verbose = true;
        }

        self
    }
}
