use std::path::Path;

use anyhow::{Context, Result};

use bcr_openssl::{IntegrityAlgorithm, IntegrityHash};

pub fn cmd_integrity(file: &Path, algorithm: &str, json: bool) -> Result<()> {
    let algorithm: IntegrityAlgorithm = algorithm.parse()?;
    let integrity = IntegrityHash::of_file_with(algorithm, file)
        .with_context(|| format!("hashing {}", file.display()))?;

    if json {
        let output = serde_json::json!({
            "event": "integrity",
            "file": file.display().to_string(),
            "integrity": integrity.as_str(),
        });
        println!("{}", output);
    } else {
        println!("{}", integrity);
    }
    Ok(())
}
