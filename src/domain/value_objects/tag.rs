//! Release tag value objects
//!
//! Tags look like `3.3.1.bcr.2`: an upstream OpenSSL version followed by an
//! optional registry iteration.

use std::fmt;
use std::str::FromStr;

use crate::error::BcrError;

/// Upstream `major.minor.patch` version
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UpstreamVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl UpstreamVersion {
    /// Bazel compatibility level: `3.3.1` becomes `3030100`
    pub fn compatibility_level(&self) -> u64 {
        u64::from(self.major) * 1_000_000 + u64::from(self.minor) * 10_000 + u64::from(self.patch) * 100
    }
}

impl FromStr for UpstreamVersion {
    type Err = BcrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| BcrError::InvalidTag {
            tag: s.to_string(),
            reason: reason.to_string(),
        };

        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() != 3 {
            return Err(invalid("expected major.minor.patch"));
        }
        let number = |p: &str| p.parse::<u32>().map_err(|_| invalid("version components must be numeric"));

        Ok(Self {
            major: number(parts[0])?,
            minor: number(parts[1])?,
            patch: number(parts[2])?,
        })
    }
}

impl fmt::Display for UpstreamVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// A release tag of the registry module
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReleaseTag {
    raw: String,
}

impl ReleaseTag {
    pub fn new(raw: impl Into<String>) -> Result<Self, BcrError> {
        let raw = raw.into();
        if raw.is_empty() || raw.contains(['/', '\\']) || raw == "." || raw == ".." {
            return Err(BcrError::InvalidTag {
                tag: raw,
                reason: "tag must be a non-empty single path component".to_string(),
            });
        }
        Ok(Self { raw })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Upstream version prefix (`3.3.1` of `3.3.1.bcr.2`), if the tag has one
    pub fn upstream(&self) -> Option<UpstreamVersion> {
        let parts: Vec<&str> = self.raw.split('.').collect();
        if parts.len() < 3 {
            return None;
        }
        parts[..3].join(".").parse().ok()
    }

    /// Registry iteration (`2` of `3.3.1.bcr.2`)
    pub fn bcr_iteration(&self) -> Option<u32> {
        let parts: Vec<&str> = self.raw.split('.').collect();
        if parts.len() < 2 || parts[parts.len() - 2] != "bcr" {
            return None;
        }
        parts[parts.len() - 1].parse().ok()
    }

    /// The tag released immediately before this one, if any
    pub fn previous(&self) -> Option<ReleaseTag> {
        let iteration = self.bcr_iteration()?;
        if iteration < 1 {
            return None;
        }
        let (stem, _) = self.raw.rsplit_once('.')?;
        Some(ReleaseTag {
            raw: format!("{}.{}", stem, iteration - 1),
        })
    }
}

impl FromStr for ReleaseTag {
    type Err = BcrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for ReleaseTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
