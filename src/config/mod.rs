//! Configuration module for bcr-openssl
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (BCR_OPENSSL_*)
//! 3. `--config <file>` or `./bcr-openssl.toml`
//! 4. User config (`<config dir>/bcr-openssl/config.toml`)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{ConfigWarning, CONFIG_HOME_VAR, PROJECT_CONFIG_FILE};
pub use types::{
    ArchiveConfig, BuildConfig, Config, ModuleConfig, OpenSslConfig, OutputConfig, ToolsConfig,
    Verbosity, DEFAULT_GENERATED_FILES,
};
