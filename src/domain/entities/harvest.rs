//! Harvest bundle - everything one host collected from the native builds
//!
//! Hosts that build different slices of the platform matrix each write a
//! bundle; packaging merges them back into a single content map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::content_map::GeneratedContentMap;
use crate::domain::value_objects::Platform;
use crate::error::{BcrError, BcrResult};

pub const BUNDLE_FORMAT_VERSION: u32 = 1;

/// Where the upstream source archive came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInfo {
    pub url: String,
    pub integrity: String,
    pub strip_prefix: String,
}

/// Source listing printed by the extraction script for one platform
///
/// The text is Starlark assignments (`LIBCRYPTO_SRCS = [...]` and friends)
/// and is embedded in the platform's constants file as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceListing {
    Extracted(String),
    /// Platform was not built on any host
    Empty,
}

/// Variables every listing defines, with their empty values
pub const LISTING_VARIABLES: [(&str, &str); 9] = [
    ("LIBCRYPTO_DEFINES", "[]"),
    ("LIBCRYPTO_SRCS", "[]"),
    ("LIBSSL_DEFINES", "[]"),
    ("LIBSSL_SRCS", "[]"),
    ("OPENSSL_APP_SRCS", "[]"),
    ("OPENSSL_DEFINES", "[]"),
    ("PERLASM_GEN", "''"),
    ("PERLASM_OUTS", "[]"),
    ("PERLASM_TOOLS", "[]"),
];

impl SourceListing {
    /// Starlark text for `platform`'s constants file
    ///
    /// Windows listings carry paths with backslashes, which Starlark would
    /// read as escape sequences; they are doubled.
    pub fn render(&self, platform: Platform) -> String {
        match self {
            SourceListing::Extracted(text) if platform.is_windows() => {
                text.trim_end().replace('\\', "\\\\")
            }
            SourceListing::Extracted(text) => text.trim_end().to_string(),
            SourceListing::Empty => LISTING_VARIABLES
                .iter()
                .map(|(name, empty)| format!("{} = {}", name, empty))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// One platform's harvest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformHarvest {
    /// Generated path -> file content
    pub generated: BTreeMap<String, String>,
    /// Raw extraction script output
    pub listing: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarvestBundle {
    pub format_version: u32,
    pub openssl_version: String,
    pub source: SourceInfo,
    #[serde(default)]
    pub platforms: BTreeMap<Platform, PlatformHarvest>,
}

impl HarvestBundle {
    pub fn new(openssl_version: impl Into<String>, source: SourceInfo) -> Self {
        Self {
            format_version: BUNDLE_FORMAT_VERSION,
            openssl_version: openssl_version.into(),
            source,
            platforms: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, platform: Platform, harvest: PlatformHarvest) -> BcrResult<()> {
        if self.platforms.contains_key(&platform) {
            return Err(BcrError::BundleConflict {
                message: format!("platform {} harvested twice", platform),
            });
        }
        self.platforms.insert(platform, harvest);
        Ok(())
    }

    /// Fold another host's bundle into this one
    ///
    /// Both must describe the same upstream source; a platform may only be
    /// harvested by one host.
    pub fn merge(&mut self, other: HarvestBundle) -> BcrResult<()> {
        if other.format_version != self.format_version {
            return Err(BcrError::BundleConflict {
                message: format!(
                    "format version {} does not match {}",
                    other.format_version, self.format_version
                ),
            });
        }
        if other.openssl_version != self.openssl_version {
            return Err(BcrError::BundleConflict {
                message: format!(
                    "OpenSSL version {} does not match {}",
                    other.openssl_version, self.openssl_version
                ),
            });
        }
        if other.source != self.source {
            return Err(BcrError::BundleConflict {
                message: format!(
                    "source archive {} ({}) does not match {} ({})",
                    other.source.url, other.source.integrity, self.source.url, self.source.integrity
                ),
            });
        }
        for (platform, harvest) in other.platforms {
            self.insert(platform, harvest)?;
        }
        Ok(())
    }

    pub fn built_platforms(&self) -> Vec<Platform> {
        self.platforms.keys().copied().collect()
    }

    pub fn content_map(&self) -> BcrResult<GeneratedContentMap> {
        let mut map = GeneratedContentMap::new();
        for (platform, harvest) in &self.platforms {
            for (path, content) in &harvest.generated {
                map.record(*platform, path.clone(), content.clone())?;
            }
        }
        Ok(map)
    }

    /// Listing for `platform`, empty when no host built it
    pub fn listing(&self, platform: Platform) -> SourceListing {
        match self.platforms.get(&platform) {
            Some(harvest) if !harvest.listing.trim().is_empty() => {
                SourceListing::Extracted(harvest.listing.clone())
            }
            _ => SourceListing::Empty,
        }
    }
}
