//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BcrError, BcrResult};

use super::types::{Config, Verbosity};

/// File looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "bcr-openssl.toml";

/// Overrides the user configuration directory (test isolation)
pub const CONFIG_HOME_VAR: &str = "BCR_OPENSSL_CONFIG_HOME";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> BcrResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| BcrError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load from project config, user config, or defaults, then apply env overrides
///
/// A config file that exists but does not parse is an error.
pub fn load_or_default(project_root: Option<&Path>) -> BcrResult<(Config, Vec<ConfigWarning>)> {
    let candidates = project_root
        .map(|root| root.join(PROJECT_CONFIG_FILE))
        .into_iter()
        .chain(user_config_dir().map(|dir| dir.join("bcr-openssl/config.toml")));

    for candidate in candidates {
        if candidate.is_file() {
            let (config, warnings) = load_with_warnings(&candidate)?;
            return Ok((with_env_overrides(config)?, warnings));
        }
    }

    Ok((with_env_overrides(Config::default())?, Vec::new()))
}

/// Apply environment variable overrides (BCR_OPENSSL_* prefix)
pub fn with_env_overrides(config: Config) -> BcrResult<Config> {
    apply_env_overrides(config, |key| std::env::var(key).ok())
}

pub(crate) fn apply_env_overrides(
    mut config: Config,
    get_env: impl Fn(&str) -> Option<String>,
) -> BcrResult<Config> {
    // BCR_OPENSSL_VERSION
    if let Some(version) = get_env("BCR_OPENSSL_VERSION") {
        config.openssl.version = version;
    }

    // BCR_OPENSSL_SOURCE_DATE_EPOCH
    if let Some(epoch) = get_env("BCR_OPENSSL_SOURCE_DATE_EPOCH") {
        config.build.source_date_epoch = epoch.trim().parse().map_err(|_| BcrError::Config {
            file: PathBuf::from("BCR_OPENSSL_SOURCE_DATE_EPOCH"),
            message: format!("'{}' is not a unix timestamp", epoch),
        })?;
    }

    // BCR_OPENSSL_BUILDIFIER
    if let Some(buildifier) = get_env("BCR_OPENSSL_BUILDIFIER") {
        config.tools.buildifier = buildifier;
    }

    // BCR_OPENSSL_VERBOSITY
    if let Some(verbosity) = get_env("BCR_OPENSSL_VERBOSITY") {
        config.output.verbosity = match verbosity.to_lowercase().as_str() {
            "quiet" => Verbosity::Quiet,
            "verbose" => Verbosity::Verbose,
            "debug" => Verbosity::Debug,
            _ => Verbosity::Normal,
        };
    }

    // BCR_OPENSSL_TEMPLATES_DIR
    if let Some(dir) = get_env("BCR_OPENSSL_TEMPLATES_DIR") {
        config.templates_dir = PathBuf::from(dir);
    }

    Ok(config)
}

fn user_config_dir() -> Option<PathBuf> {
    std::env::var(CONFIG_HOME_VAR)
        .ok()
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "templates_dir",
        "openssl",
        "version",
        "url_template",
        "integrity",
        "build",
        "source_date_epoch",
        "configure_options",
        "generated_files",
        "extract_script",
        "module",
        "name",
        "dependencies",
        "release_url_template",
        "overlay_repo_name",
        "tools",
        "buildifier",
        "tar",
        "make",
        "curl",
        "perl",
        "archive",
        "owner",
        "group",
        "mtime_epoch",
        "output",
        "verbosity",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
