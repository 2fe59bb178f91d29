//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::services::BazelDep;
use crate::error::BcrResult;
use crate::infrastructure::DEFAULT_URL_TEMPLATE;

use super::loader::{self, ConfigWarning};

/// Files OpenSSL generates at build time that the module ships
pub const DEFAULT_GENERATED_FILES: &[&str] = &[
    "apps/progs.c",
    "apps/progs.h",
    "crypto/buildinf.h",
    "crypto/params_idx.c",
    "include/crypto/bn_conf.h",
    "include/crypto/dso_conf.h",
    "include/internal/param_names.h",
    "include/openssl/asn1.h",
    "include/openssl/asn1t.h",
    "include/openssl/bio.h",
    "include/openssl/cmp.h",
    "include/openssl/cms.h",
    "include/openssl/conf.h",
    "include/openssl/configuration.h",
    "include/openssl/core_names.h",
    "include/openssl/crmf.h",
    "include/openssl/crypto.h",
    "include/openssl/ct.h",
    "include/openssl/err.h",
    "include/openssl/ess.h",
    "include/openssl/fipskey.h",
    "include/openssl/lhash.h",
    "include/openssl/ocsp.h",
    "include/openssl/opensslconf.h",
    "include/openssl/opensslv.h",
    "include/openssl/pkcs12.h",
    "include/openssl/pkcs7.h",
    "include/openssl/safestack.h",
    "include/openssl/srp.h",
    "include/openssl/ssl.h",
    "include/openssl/ui.h",
    "include/openssl/x509.h",
    "include/openssl/x509_vfy.h",
    "include/openssl/x509v3.h",
    "providers/common/der/der_digests_gen.c",
    "providers/common/der/der_dsa_gen.c",
    "providers/common/der/der_ec_gen.c",
    "providers/common/der/der_ecx_gen.c",
    "providers/common/der/der_rsa_gen.c",
    "providers/common/der/der_sm2_gen.c",
    "providers/common/der/der_wrap_gen.c",
    "providers/common/include/prov/der_digests.h",
    "providers/common/include/prov/der_dsa.h",
    "providers/common/include/prov/der_ec.h",
    "providers/common/include/prov/der_ecx.h",
    "providers/common/include/prov/der_rsa.h",
    "providers/common/include/prov/der_sm2.h",
    "providers/common/include/prov/der_wrap.h",
];

/// Upstream OpenSSL release
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenSslConfig {
    #[serde(default = "default_openssl_version")]
    pub version: String,

    /// Download URL; `{version}` is substituted
    #[serde(default = "default_url_template")]
    pub url_template: String,

    /// Expected fingerprint of the download (`sha256-...`)
    #[serde(default)]
    pub integrity: Option<String>,
}

impl Default for OpenSslConfig {
    fn default() -> Self {
        Self {
            version: default_openssl_version(),
            url_template: default_url_template(),
            integrity: None,
        }
    }
}

fn default_openssl_version() -> String {
    "3.3.1".to_string()
}

fn default_url_template() -> String {
    DEFAULT_URL_TEMPLATE.to_string()
}

/// Native build settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Stamped into generated headers; must be non-zero
    #[serde(default = "default_source_date_epoch")]
    pub source_date_epoch: i64,

    #[serde(default = "default_configure_options")]
    pub configure_options: Vec<String>,

    #[serde(default = "default_generated_files")]
    pub generated_files: Vec<String>,

    /// Defaults to `extract_srcs.pl` in the templates directory
    #[serde(default)]
    pub extract_script: Option<PathBuf>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            source_date_epoch: default_source_date_epoch(),
            configure_options: default_configure_options(),
            generated_files: default_generated_files(),
            extract_script: None,
        }
    }
}

fn default_source_date_epoch() -> i64 {
    443_779_200
}

fn default_configure_options() -> Vec<String> {
    vec!["no-afalgeng".to_string(), "no-dynamic-engine".to_string()]
}

fn default_generated_files() -> Vec<String> {
    DEFAULT_GENERATED_FILES.iter().map(|s| s.to_string()).collect()
}

/// Registry module being released
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleConfig {
    #[serde(default = "default_module_name")]
    pub name: String,

    #[serde(default = "default_dependencies")]
    pub dependencies: Vec<BazelDep>,

    /// Where the overlay archive is published; `{tag}` is substituted
    #[serde(default = "default_release_url_template")]
    pub release_url_template: String,

    #[serde(default = "default_overlay_repo_name")]
    pub overlay_repo_name: String,
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            name: default_module_name(),
            dependencies: default_dependencies(),
            release_url_template: default_release_url_template(),
            overlay_repo_name: default_overlay_repo_name(),
        }
    }
}

fn default_module_name() -> String {
    "openssl".to_string()
}

fn default_dependencies() -> Vec<BazelDep> {
    vec![
        BazelDep::new("platforms", "0.0.10"),
        BazelDep::new("rules_cc", "0.0.13"),
        BazelDep::new("rules_perl", "0.2.4"),
    ]
}

fn default_release_url_template() -> String {
    "https://github.com/raccoons-build/bazel-openssl-cc/releases/download/{tag}/bazel-openssl-cc-{tag}.tar.gz"
        .to_string()
}

fn default_overlay_repo_name() -> String {
    "openssl-generated-overlay".to_string()
}

/// External programs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    #[serde(default = "default_buildifier")]
    pub buildifier: String,

    /// Host default when unset (`gtar` on macOS)
    #[serde(default)]
    pub tar: Option<String>,

    /// Host default when unset (`make` / `nmake`)
    #[serde(default)]
    pub make: Option<String>,

    #[serde(default = "default_curl")]
    pub curl: String,

    #[serde(default = "default_perl")]
    pub perl: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            buildifier: default_buildifier(),
            tar: None,
            make: None,
            curl: default_curl(),
            perl: default_perl(),
        }
    }
}

fn default_buildifier() -> String {
    "buildifier".to_string()
}

fn default_curl() -> String {
    "curl".to_string()
}

fn default_perl() -> String {
    "perl".to_string()
}

/// Overlay archive normalisation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveConfig {
    #[serde(default = "default_owner")]
    pub owner: String,

    #[serde(default = "default_group")]
    pub group: String,

    /// 1980-01-01T00:00:00Z
    #[serde(default = "default_mtime_epoch")]
    pub mtime_epoch: i64,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            owner: default_owner(),
            group: default_group(),
            mtime_epoch: default_mtime_epoch(),
        }
    }
}

fn default_owner() -> String {
    "root".to_string()
}

fn default_group() -> String {
    "wheel".to_string()
}

fn default_mtime_epoch() -> i64 {
    315_532_800
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub verbosity: Verbosity,
}

/// Verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Debug,
}

impl Verbosity {
    /// Level combined with the `-v` count from the command line
    pub fn level(self, cli_count: u8) -> u8 {
        let base = match self {
            Verbosity::Quiet | Verbosity::Normal => 0,
            Verbosity::Verbose => 1,
            Verbosity::Debug => 2,
        };
        base.max(cli_count)
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Release templates (BUILD files, presubmit, helper scripts)
    #[serde(default = "default_templates_dir")]
    pub templates_dir: PathBuf,

    #[serde(default)]
    pub openssl: OpenSslConfig,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub module: ModuleConfig,

    #[serde(default)]
    pub tools: ToolsConfig,

    #[serde(default)]
    pub archive: ArchiveConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            templates_dir: default_templates_dir(),
            openssl: OpenSslConfig::default(),
            build: BuildConfig::default(),
            module: ModuleConfig::default(),
            tools: ToolsConfig::default(),
            archive: ArchiveConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

fn default_templates_dir() -> PathBuf {
    PathBuf::from("templates")
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> BcrResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> BcrResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from `bcr-openssl.toml` in `project_root`, the user config, or defaults
    pub fn load_or_default(project_root: Option<&Path>) -> BcrResult<(Self, Vec<ConfigWarning>)> {
        loader::load_or_default(project_root)
    }

    /// Apply environment variable overrides (BCR_OPENSSL_* prefix)
    pub fn with_env_overrides(self) -> BcrResult<Self> {
        loader::with_env_overrides(self)
    }

    /// Extraction script, resolved against the templates directory
    pub fn extract_script(&self) -> PathBuf {
        self.build
            .extract_script
            .clone()
            .unwrap_or_else(|| self.templates_dir.join("extract_srcs.pl"))
    }

    /// Published overlay archive URL for `tag`
    pub fn release_url(&self, tag: &str) -> String {
        self.module.release_url_template.replace("{tag}", tag)
    }
}
