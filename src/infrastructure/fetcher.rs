//! Upstream source download via curl, unpacking via tar

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::domain::entities::SourceInfo;
use crate::domain::ports::{FetchedSource, SourceFetcher};
use crate::domain::value_objects::IntegrityHash;
use crate::error::{BcrError, BcrResult};
use crate::infrastructure::process::CommandSpec;

pub const DEFAULT_URL_TEMPLATE: &str =
    "https://github.com/openssl/openssl/releases/download/openssl-{version}/openssl-{version}.tar.gz";

#[derive(Debug, Clone)]
pub struct CurlFetcher {
    pub curl: String,
    pub tar: String,
    /// `{version}` is substituted
    pub url_template: String,
    /// When set, the download must hash to exactly this value
    pub pinned_integrity: Option<IntegrityHash>,
}

impl CurlFetcher {
    pub fn url_for(&self, version: &str) -> String {
        self.url_template.replace("{version}", version)
    }

    pub fn strip_prefix_for(version: &str) -> String {
        format!("openssl-{}", version)
    }
}

impl SourceFetcher for CurlFetcher {
    fn fetch(&self, version: &str, staging: &Path) -> BcrResult<FetchedSource> {
        fs::create_dir_all(staging)?;
        let url = self.url_for(version);
        let archive = staging.join(format!("openssl-{}.tar.gz", version));

        CommandSpec::new(&self.curl)
            .args(["--fail", "-L", "-o"])
            .arg(&archive)
            .arg(&url)
            .run()?;

        let integrity = IntegrityHash::of_file(&archive)?;
        if let Some(expected) = &self.pinned_integrity {
            if expected != &integrity {
                return Err(BcrError::IntegrityMismatch {
                    path: archive,
                    expected: expected.to_string(),
                    actual: integrity.to_string(),
                });
            }
        }

        Ok(FetchedSource {
            archive,
            info: SourceInfo {
                url,
                integrity: integrity.to_string(),
                strip_prefix: Self::strip_prefix_for(version),
            },
        })
    }

    fn unpack(&self, source: &FetchedSource, dest: &Path) -> BcrResult<PathBuf> {
        fs::create_dir_all(dest)?;
        CommandSpec::new(&self.tar)
            .arg("xzf")
            .arg(&source.archive)
            .arg("-C")
            .arg(dest)
            .run()?;

        let root = dest.join(&source.info.strip_prefix);
        if !root.is_dir() {
            return Err(BcrError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!(
                    "archive {} did not contain {}",
                    source.archive.display(),
                    source.info.strip_prefix
                ),
            )));
        }
        Ok(root)
    }
}
