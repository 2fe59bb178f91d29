//! Local File System Helpers
//!
//! Atomic writes, template copies and symlinks for release trees.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::BcrResult;

/// Write `content` to `path` atomically, creating parent directories
///
/// Uses a temp file in the destination directory plus rename, so readers
/// never see a half-written manifest. The result is world-readable (0644 on
/// unix) rather than keeping the temp file's owner-only mode.
pub fn write_atomic(path: &Path, content: &[u8]) -> BcrResult<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))?;
    }
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Copy `src` to `dst`, creating parent directories
pub fn copy_file(src: &Path, dst: &Path, executable: bool) -> BcrResult<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(src, dst)?;
    if executable {
        make_executable(dst)?;
    }
    Ok(())
}

#[cfg(unix)]
pub fn make_executable(path: &Path) -> BcrResult<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)?;
    Ok(())
}

#[cfg(not(unix))]
pub fn make_executable(_path: &Path) -> BcrResult<()> {
    Ok(())
}

/// Create a symlink at `link` pointing to the file `target`
///
/// `target` is stored verbatim, so relative targets resolve against the
/// link's own directory.
pub fn symlink_file(target: &Path, link: &Path) -> BcrResult<()> {
    #[cfg(unix)]
    std::os::unix::fs::symlink(target, link)?;
    #[cfg(windows)]
    std::os::windows::fs::symlink_file(target, link)?;
    Ok(())
}
