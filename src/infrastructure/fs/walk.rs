//! Deterministic tree walking and relative path arithmetic

use std::io;
use std::path::{Component, Path, PathBuf};

use ignore::WalkBuilder;

use crate::error::BcrResult;

/// A non-directory entry of a walked tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    /// Path relative to the walk root
    pub relative: PathBuf,
    /// Full path
    pub path: PathBuf,
    pub is_symlink: bool,
}

impl TreeEntry {
    /// Relative path with `/` separators
    pub fn relative_slash(&self) -> String {
        to_slash(&self.relative)
    }
}

/// Every file and symlink under `root`, sorted by path
///
/// No ignore files or hidden-file filters apply, and symlinks are reported
/// rather than followed.
pub fn walk_tree(root: &Path) -> BcrResult<Vec<TreeEntry>> {
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut entries = Vec::new();
    for entry in walker {
        let entry = entry.map_err(walk_error)?;
        let Some(file_type) = entry.file_type() else {
            continue;
        };
        if file_type.is_dir() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(root)
            .map_err(|e| io::Error::other(e.to_string()))?
            .to_path_buf();
        entries.push(TreeEntry {
            relative,
            path: entry.path().to_path_buf(),
            is_symlink: file_type.is_symlink(),
        });
    }
    Ok(entries)
}

fn walk_error(err: ignore::Error) -> io::Error {
    let message = err.to_string();
    err.into_io_error()
        .unwrap_or_else(|| io::Error::other(message))
}

/// Path that reaches `target` from the directory `base_dir`
///
/// Both paths are made absolute and normalised lexically; symlinks are not
/// resolved.
pub fn relative_path(target: &Path, base_dir: &Path) -> BcrResult<PathBuf> {
    let target = normalize(&std::path::absolute(target)?);
    let base = normalize(&std::path::absolute(base_dir)?);

    let target_parts: Vec<Component> = target.components().collect();
    let base_parts: Vec<Component> = base.components().collect();
    let common = target_parts
        .iter()
        .zip(base_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut rel = PathBuf::new();
    for _ in common..base_parts.len() {
        rel.push("..");
    }
    for part in &target_parts[common..] {
        rel.push(part.as_os_str());
    }
    if rel.as_os_str().is_empty() {
        rel.push(".");
    }
    Ok(rel)
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Render a relative path with `/` separators
pub fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
