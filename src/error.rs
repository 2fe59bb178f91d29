//! Error types for bcr-openssl
//!
//! Uses `thiserror` for library errors; the command layer wraps these in
//! `anyhow` with stage and platform context.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::entities::RunStage;
use crate::domain::value_objects::Platform;

/// Result type alias for bcr-openssl operations
pub type BcrResult<T> = Result<T, BcrError>;

/// Main error type for release operations
#[derive(Error, Debug)]
pub enum BcrError {
    /// Requested operating system selection is not one of unix/windows/all
    #[error("unknown operating system '{value}' (expected one of: unix, windows, all)")]
    UnknownOperatingSystem { value: String },

    /// Requested platform is not in the supported matrix
    #[error("unknown platform '{value}'")]
    UnknownPlatform { value: String },

    /// External program could not be started
    #[error("failed to run '{program}': {source}")]
    CommandSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// External program exited unsuccessfully
    #[error("'{program}' exited with {}", exit_description(*code))]
    CommandFailed { program: String, code: Option<i32> },

    /// The build toolchain reported success but did not produce a file
    #[error("{platform}: expected generated file '{path}' was not produced")]
    MissingGeneratedFile { platform: Platform, path: String },

    /// Content for the same path and platform was recorded twice
    #[error("{platform}: content for '{path}' was already recorded")]
    DuplicateContent { platform: Platform, path: String },

    /// Overlay template file is missing from the templates directory
    #[error("template not found: {path}")]
    MissingTemplate { path: PathBuf },

    /// Two harvest bundles cannot be merged
    #[error("cannot merge harvest bundles: {message}")]
    BundleConflict { message: String },

    /// Downloaded source does not match the pinned integrity
    #[error("integrity mismatch for {path}: expected {expected}, got {actual}")]
    IntegrityMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    /// Fingerprint string could not be parsed
    #[error("invalid integrity '{value}': {reason}")]
    InvalidIntegrity { value: String, reason: String },

    /// Release tag could not be interpreted
    #[error("invalid release tag '{tag}': {reason}")]
    InvalidTag { tag: String, reason: String },

    /// Output directory for the tag already exists
    #[error("output directory already exists: {path}")]
    OutputExists { path: PathBuf },

    /// Deduplication roots are the same tree or nested in one another
    #[error("cannot deduplicate {current} against {previous}: the trees overlap")]
    OverlappingTrees { previous: PathBuf, current: PathBuf },

    /// Run stage moved backwards or skipped a mandatory stage
    #[error("cannot move from {from} to {to}")]
    InvalidTransition { from: RunStage, to: RunStage },

    /// Registry metadata file is missing or malformed
    #[error("invalid registry metadata {path}: {message}")]
    Metadata { path: PathBuf, message: String },

    /// Configuration file could not be parsed
    #[error("invalid configuration in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialisation error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn exit_description(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}
