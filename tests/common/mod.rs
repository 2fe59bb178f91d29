//! Common test utilities for bcr-openssl scenario and CLI tests.
//!
//! This module provides:
//! - `TestEnv`: isolated temp directory plus helpers to run the CLI
//! - Fakes for the external collaborators (fetcher, toolchain, archiver)
//! - Fixtures: templates directory and registry skeleton

#![allow(dead_code)]

pub mod env;
pub mod fakes;
pub mod fixtures;

pub use env::*;
pub use fakes::*;
pub use fixtures::*;
