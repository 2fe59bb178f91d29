//! Deterministic tar archiver

use std::path::Path;

use chrono::DateTime;

use crate::domain::ports::Archiver;
use crate::error::{BcrError, BcrResult};
use crate::infrastructure::process::CommandSpec;

/// Owner/group/mtime applied to every archive member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveNormalization {
    pub owner: String,
    pub group: String,
    /// Unix timestamp stamped on every member
    pub mtime_epoch: i64,
}

impl ArchiveNormalization {
    /// `--owner root --group wheel --mtime=1980-01-01 00:00:00 UTC` style options
    pub fn tar_options(&self) -> BcrResult<Vec<String>> {
        let mtime = DateTime::from_timestamp(self.mtime_epoch, 0).ok_or_else(|| BcrError::Config {
            file: "archive.mtime_epoch".into(),
            message: format!("{} is not a valid timestamp", self.mtime_epoch),
        })?;
        Ok(vec![
            "--owner".to_string(),
            self.owner.clone(),
            "--group".to_string(),
            self.group.clone(),
            format!("--mtime={}", mtime.format("%Y-%m-%d %H:%M:%S UTC")),
        ])
    }
}

/// Host tar binary; GNU tar is `gtar` on macOS
pub fn default_tar_program() -> &'static str {
    if cfg!(target_os = "macos") {
        "gtar"
    } else {
        "tar"
    }
}

#[derive(Debug, Clone)]
pub struct TarArchiver {
    pub tar: String,
    /// `None` on hosts whose tar lacks the GNU options
    pub normalization: Option<ArchiveNormalization>,
}

impl TarArchiver {
    /// Archive exactly `files`, in the given order
    ///
    /// Directories are not descended into, so nested members must be listed.
    pub fn archive_command(&self, dir: &Path, files: &[String], output: &Path) -> BcrResult<CommandSpec> {
        let output = std::path::absolute(output)?;
        let mut spec = CommandSpec::new(&self.tar);
        if let Some(normalization) = &self.normalization {
            spec = spec.args(normalization.tar_options()?);
        }
        Ok(spec
            .arg("--no-recursion")
            .arg("-czf")
            .arg(output)
            .args(files)
            .current_dir(dir))
    }
}

impl Archiver for TarArchiver {
    fn archive(&self, dir: &Path, files: &[String], output: &Path) -> BcrResult<()> {
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        self.archive_command(dir, files, output)?.run()
    }
}
