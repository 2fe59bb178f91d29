//! Partitioner - splits generated files into platform-independent and
//! platform-specific sets by comparing their bytes across platforms.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::domain::entities::GeneratedContentMap;
use crate::domain::value_objects::Platform;

/// Outcome of partitioning one content map; immutable once computed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionResult {
    independent: BTreeSet<String>,
    specific: BTreeSet<String>,
}

impl PartitionResult {
    /// Paths whose content is identical on every observed platform
    pub fn independent(&self) -> &BTreeSet<String> {
        &self.independent
    }

    /// Paths whose content differs between at least two platforms
    pub fn specific(&self) -> &BTreeSet<String> {
        &self.specific
    }

    pub fn is_independent(&self, path: &str) -> bool {
        self.independent.contains(path)
    }

    pub fn is_specific(&self, path: &str) -> bool {
        self.specific.contains(path)
    }

    /// Platform-specific contents for one platform's constants file
    ///
    /// A path that was never generated for `platform` maps to an empty
    /// string rather than being an error.
    pub fn specific_contents_for(
        &self,
        map: &GeneratedContentMap,
        platform: Platform,
    ) -> BTreeMap<String, String> {
        self.specific
            .iter()
            .map(|path| {
                let content = map.content(path, platform).unwrap_or_default();
                (path.clone(), content.to_string())
            })
            .collect()
    }
}

/// Partition every path of `map`
///
/// Paths without any platform content are left out of both sets.
pub fn partition(map: &GeneratedContentMap) -> PartitionResult {
    let mut result = PartitionResult::default();

    for (path, per_platform) in map.entries() {
        let distinct: HashSet<&str> = per_platform.values().map(String::as_str).collect();
        match distinct.len() {
            0 => {}
            1 => {
                result.independent.insert(path.to_string());
            }
            _ => {
                result.specific.insert(path.to_string());
            }
        }
    }

    result
}
