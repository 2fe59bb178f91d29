//! Source fetcher port - obtains and unpacks the upstream release archive

use std::path::{Path, PathBuf};

use crate::domain::entities::SourceInfo;
use crate::error::BcrResult;

/// A downloaded upstream archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedSource {
    pub archive: PathBuf,
    pub info: SourceInfo,
}

pub trait SourceFetcher {
    /// Download the release `version` into `staging`
    fn fetch(&self, version: &str, staging: &Path) -> BcrResult<FetchedSource>;

    /// Unpack a pristine copy into `dest`; returns the source root
    /// (`dest/<strip_prefix>`)
    fn unpack(&self, source: &FetchedSource, dest: &Path) -> BcrResult<PathBuf>;
}
