//! Registry metadata update
//!
//! Appends a released tag to `<module_dir>/metadata.json`.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde_json::Value;

use crate::domain::services::to_json_indented;
use crate::error::{BcrError, BcrResult};

pub const METADATA_FILE: &str = "metadata.json";

/// Add `tag` to the `versions` list of the module's metadata
///
/// The file must already exist. A tag that is already listed is not added
/// again. Output uses sorted keys and a two-space indent. The file stays
/// exclusively locked for the whole read-modify-write.
pub fn add_version(module_dir: &Path, tag: &str) -> BcrResult<PathBuf> {
    let path = module_dir.join(METADATA_FILE);
    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .open(&path)
        .map_err(|e| metadata_error(&path, e.to_string()))?;

    file.lock_exclusive()?;
    let result = update_locked(&mut file, &path, tag);
    let _ = file.unlock();
    result.map(|()| path)
}

fn update_locked(file: &mut File, path: &Path, tag: &str) -> BcrResult<()> {
    let mut content = String::new();
    file.read_to_string(&mut content)?;

    let mut doc: Value =
        serde_json::from_str(&content).map_err(|e| metadata_error(path, e.to_string()))?;
    let versions = doc
        .get_mut("versions")
        .and_then(Value::as_array_mut)
        .ok_or_else(|| metadata_error(path, "missing \"versions\" array".to_string()))?;

    if !versions.iter().any(|v| v.as_str() == Some(tag)) {
        versions.push(Value::String(tag.to_string()));
    }

    let rendered = format!("{}\n", to_json_indented(&doc, 2)?);
    file.seek(SeekFrom::Start(0))?;
    file.set_len(0)?;
    file.write_all(rendered.as_bytes())?;
    file.flush()?;
    Ok(())
}

fn metadata_error(path: &Path, message: String) -> BcrError {
    BcrError::Metadata {
        path: path.to_path_buf(),
        message,
    }
}
