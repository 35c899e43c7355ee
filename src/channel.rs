//! Release channel classification and version normalization
//!
//! A channel is derived from the raw package version by substring match
//! unless the publisher configuration pins one explicitly.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseChannel {
    Stable,
    Beta,
    Alpha,
    Rc,
}

impl ReleaseChannel {
    /// Scan order for substring matching. "stable" is checked first even
    /// though it is also the default: when a version string contains more
    /// than one channel name, the earliest entry here wins.
    pub const SCAN_ORDER: [ReleaseChannel; 4] = [
        ReleaseChannel::Stable,
        ReleaseChannel::Beta,
        ReleaseChannel::Alpha,
        ReleaseChannel::Rc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseChannel::Stable => "stable",
            ReleaseChannel::Beta => "beta",
            ReleaseChannel::Alpha => "alpha",
            ReleaseChannel::Rc => "rc",
        }
    }

    /// Derive the channel for a version string. A configured override wins;
    /// otherwise the first channel name found as a substring of the version
    /// is used, defaulting to stable when none matches.
    pub fn derive(version: &str, configured: Option<ReleaseChannel>) -> ReleaseChannel {
        if let Some(channel) = configured {
            return channel;
        }

        Self::SCAN_ORDER
            .iter()
            .copied()
            .find(|channel| version.contains(channel.as_str()))
            .unwrap_or(ReleaseChannel::Stable)
    }
}

impl fmt::Display for ReleaseChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReleaseChannel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stable" => Ok(ReleaseChannel::Stable),
            "beta" => Ok(ReleaseChannel::Beta),
            "alpha" => Ok(ReleaseChannel::Alpha),
            "rc" => Ok(ReleaseChannel::Rc),
            other => Err(format!(
                "Unknown channel '{}'. Expected one of: stable, beta, alpha, rc",
                other
            )),
        }
    }
}

/// Strip a single `-<channel>` suffix occurrence from the version string.
/// Stable versions never carry a suffix, so they pass through untouched.
pub fn normalize_version(version: &str, channel: ReleaseChannel) -> String {
    if channel == ReleaseChannel::Stable {
        return version.to_string();
    }

    version.replacen(&format!("-{}", channel.as_str()), "", 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_channel_from_version() {
        assert_eq!(ReleaseChannel::derive("1.2.3-beta", None), ReleaseChannel::Beta);
        assert_eq!(ReleaseChannel::derive("1.2.3-alpha", None), ReleaseChannel::Alpha);
        assert_eq!(ReleaseChannel::derive("1.2.3-rc", None), ReleaseChannel::Rc);
        assert_eq!(ReleaseChannel::derive("1.2.3", None), ReleaseChannel::Stable);
    }

    #[test]
    fn test_configured_channel_wins() {
        assert_eq!(
            ReleaseChannel::derive("1.2.3-beta", Some(ReleaseChannel::Alpha)),
            ReleaseChannel::Alpha
        );
    }

    #[test]
    fn test_scan_order_decides_pathological_versions() {
        // "stable" outranks the other channel names when both appear.
        assert_eq!(ReleaseChannel::derive("1.0.0-stable-rc", None), ReleaseChannel::Stable);
        // Beta is scanned before rc.
        assert_eq!(ReleaseChannel::derive("1.0.0-rc-beta", None), ReleaseChannel::Beta);
    }

    #[test]
    fn test_normalize_version_strips_suffix() {
        assert_eq!(normalize_version("1.2.3-beta", ReleaseChannel::Beta), "1.2.3");
        assert_eq!(normalize_version("1.2.3-rc", ReleaseChannel::Rc), "1.2.3");
    }

    #[test]
    fn test_normalize_version_stable_untouched() {
        assert_eq!(normalize_version("1.2.3", ReleaseChannel::Stable), "1.2.3");
        // A stable version pathologically containing "-stable" keeps it.
        assert_eq!(normalize_version("1.2.3-stable", ReleaseChannel::Stable), "1.2.3-stable");
    }

    #[test]
    fn test_normalize_version_strips_single_occurrence() {
        assert_eq!(
            normalize_version("1.2.3-beta-beta", ReleaseChannel::Beta),
            "1.2.3-beta"
        );
    }

    #[test]
    fn test_channel_from_str() {
        assert_eq!("beta".parse::<ReleaseChannel>().unwrap(), ReleaseChannel::Beta);
        assert_eq!("Stable".parse::<ReleaseChannel>().unwrap(), ReleaseChannel::Stable);
        assert!("nightly".parse::<ReleaseChannel>().is_err());
    }

    #[test]
    fn test_channel_display_is_lowercase() {
        assert_eq!(ReleaseChannel::Rc.to_string(), "rc");
        assert_eq!(ReleaseChannel::Stable.to_string(), "stable");
    }
}
