//! bcr-openssl - OpenSSL release automation for the Bazel Central Registry
//!
//! Builds OpenSSL's generated sources for a fixed platform matrix, splits
//! them into platform-independent and platform-specific files, and packages
//! the result as a versioned registry module with an overlay archive.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{
    deduplicate, DedupReport, HarvestOptions, HarvestUseCase, ReleaseOptions, ReleaseReport,
    ReleaseUseCase,
};
pub use config::Config;
pub use domain::entities::{GeneratedContentMap, HarvestBundle, RunStage};
pub use domain::services::{partition, PartitionResult};
pub use domain::value_objects::{
    IntegrityAlgorithm, IntegrityHash, OperatingSystem, Platform, ReleaseTag,
};
pub use error::{BcrError, BcrResult};
