//! Generated content map - what each platform's build produced
//!
//! Filled during collection (one writer per platform, append only) and read
//! by the partitioner afterwards.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::value_objects::Platform;
use crate::error::{BcrError, BcrResult};

/// `path -> platform -> content` for every harvested generated file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedContentMap {
    files: BTreeMap<String, BTreeMap<Platform, String>>,
}

impl GeneratedContentMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one platform's content for `path`
    ///
    /// Recording the same path twice for one platform is rejected; the map
    /// never overwrites collected content.
    pub fn record(
        &mut self,
        platform: Platform,
        path: impl Into<String>,
        content: impl Into<String>,
    ) -> BcrResult<()> {
        let path = path.into();
        let per_platform = self.files.entry(path.clone()).or_default();
        if per_platform.contains_key(&platform) {
            return Err(BcrError::DuplicateContent { platform, path });
        }
        per_platform.insert(platform, content.into());
        Ok(())
    }

    /// All platform contents recorded for `path`
    pub fn contents(&self, path: &str) -> Option<&BTreeMap<Platform, String>> {
        self.files.get(path)
    }

    pub fn content(&self, path: &str, platform: Platform) -> Option<&str> {
        self.files
            .get(path)
            .and_then(|m| m.get(&platform))
            .map(String::as_str)
    }

    /// Canonical copy of `path`: the lexicographically-first platform's content
    pub fn canonical(&self, path: &str) -> Option<(Platform, &str)> {
        self.files
            .get(path)?
            .iter()
            .next()
            .map(|(platform, content)| (*platform, content.as_str()))
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = (&str, &BTreeMap<Platform, String>)> {
        self.files.iter().map(|(path, m)| (path.as_str(), m))
    }

    /// Every platform that contributed at least one file
    pub fn platforms(&self) -> BTreeSet<Platform> {
        self.files.values().flat_map(|m| m.keys().copied()).collect()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Check that every expected path, and every path any platform recorded,
    /// has content for every built platform
    pub fn validate<S: AsRef<str>>(&self, expected: &[S], built: &[Platform]) -> BcrResult<()> {
        let paths: BTreeSet<&str> = expected
            .iter()
            .map(AsRef::as_ref)
            .chain(self.paths())
            .collect();
        for platform in built {
            for path in &paths {
                if self.content(path, *platform).is_none() {
                    return Err(BcrError::MissingGeneratedFile {
                        platform: *platform,
                        path: path.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}
