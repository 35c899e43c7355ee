//! Release Asset Pusher Library
//!
//! This file serves as the library root for the release-asset-pusher crate,
//! organizing and exposing the modules that make up the application.

pub mod channel;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod publish;
pub mod server;
pub mod upload;

pub use channel::ReleaseChannel;
pub use config::PublisherConfig;
pub use error::{PublishError, Result};
pub use output::OutputManager;
pub use publish::{PublishContext, PublishOutcome, Publisher};
