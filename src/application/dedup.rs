//! Deduplicator
//!
//! Replaces files of a freshly packaged release tree that are byte-identical
//! to the previous tag's copy with relative symlinks into the previous tree.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::ports::{ReleaseEvent, ReleaseEventSink};
use crate::domain::value_objects::{IntegrityHash, ReleaseTag};
use crate::error::{BcrError, BcrResult};
use crate::infrastructure::fs::{relative_path, symlink_file, walk_tree};

/// What one deduplication pass did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DedupReport {
    /// Links created, relative to the current tree root
    pub linked: Vec<PathBuf>,
    /// Regular files left in place
    pub kept: Vec<PathBuf>,
}

/// Directory of the tag preceding `tag` inside `module_dir`, if it exists
pub fn previous_tag_dir(module_dir: &Path, tag: &ReleaseTag) -> Option<PathBuf> {
    let previous = tag.previous()?;
    let dir = module_dir.join(previous.as_str());
    dir.is_dir().then_some(dir)
}

/// Link every regular file of `current` whose counterpart in `previous` has
/// the same fingerprint
///
/// Entries of `current` that already are symlinks are left alone, as are
/// files with no counterpart. `previous` is only read; roots that are the
/// same tree or nested in one another are rejected.
pub fn deduplicate(
    previous: &Path,
    current: &Path,
    events: &dyn ReleaseEventSink,
) -> BcrResult<DedupReport> {
    let mut report = DedupReport::default();
    if !previous.is_dir() {
        return Ok(report);
    }
    ensure_disjoint(previous, current)?;

    for entry in walk_tree(current)? {
        if entry.is_symlink {
            continue;
        }

        let old_path = previous.join(&entry.relative);
        if !old_path.is_file() {
            report.kept.push(entry.relative);
            continue;
        }

        let old_hash = IntegrityHash::of_file(&old_path)?;
        let new_hash = IntegrityHash::of_file(&entry.path)?;
        if old_hash != new_hash {
            report.kept.push(entry.relative);
            continue;
        }

        let link_dir = entry.path.parent().unwrap_or(current);
        let target = relative_path(&old_path, link_dir)?;
        fs::remove_file(&entry.path)?;
        symlink_file(&target, &entry.path)?;

        if events.wants_detailed_events() {
            events.on_event(ReleaseEvent::FileLinked {
                path: entry.relative.clone(),
                target,
            });
        }
        report.linked.push(entry.relative);
    }

    Ok(report)
}

fn ensure_disjoint(previous: &Path, current: &Path) -> BcrResult<()> {
    let old_root = fs::canonicalize(previous)?;
    let new_root = fs::canonicalize(current)?;
    if old_root.starts_with(&new_root) || new_root.starts_with(&old_root) {
        return Err(BcrError::OverlappingTrees {
            previous: previous.to_path_buf(),
            current: current.to_path_buf(),
        });
    }
    Ok(())
}
