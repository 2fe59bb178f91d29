//! OpenSSL Build Toolchain
//!
//! Drives OpenSSL's `Configure`, `make`/`nmake` and the Perl source-listing
//! script inside a platform's arena.

use std::path::PathBuf;

use crate::domain::ports::{Arena, BuildToolchain};
use crate::domain::value_objects::{OperatingSystem, Platform};
use crate::error::BcrResult;
use crate::infrastructure::fs::write_atomic;
use crate::infrastructure::process::CommandSpec;

/// Name of the configuration file written into each arena
pub const CONFIG_FILE: &str = "config.conf";
/// Configuration target defined by [`CONFIG_FILE`]
pub const CONFIG_TARGET: &str = "openssl_config";

/// Production toolchain backed by the host's perl and make
#[derive(Debug, Clone)]
pub struct OpenSslToolchain {
    pub os: OperatingSystem,
    pub perl: String,
    /// Overrides the host default (`make` / `nmake`)
    pub make: Option<String>,
    pub configure_options: Vec<String>,
    /// Exported as `SOURCE_DATE_EPOCH` so generated headers are reproducible
    pub source_date_epoch: i64,
    pub extract_script: PathBuf,
}

impl OpenSslToolchain {
    pub fn configure_command(&self, arena: &Arena) -> CommandSpec {
        let mut prefix = self.os.configure_prefix(arena.platform).into_iter();
        let program = prefix.next().unwrap_or("./Configure");
        CommandSpec::new(program)
            .args(prefix)
            .arg(format!("--config={}", CONFIG_FILE))
            .arg(CONFIG_TARGET)
            .args(&self.configure_options)
            .current_dir(&arena.source_dir)
    }

    pub fn generate_command(&self, arena: &Arena, files: &[String]) -> CommandSpec {
        let make = self
            .make
            .clone()
            .unwrap_or_else(|| self.os.make_program().to_string());
        CommandSpec::new(make)
            .args(files)
            .current_dir(&arena.source_dir)
            .env("SOURCE_DATE_EPOCH", self.source_date_epoch.to_string())
    }

    pub fn extract_command(&self, arena: &Arena) -> CommandSpec {
        CommandSpec::new(&self.perl)
            .args(["-I.", "-l", "-Mconfigdata"])
            .arg(&self.extract_script)
            .arg(arena.platform.family().as_str())
            .current_dir(&arena.source_dir)
    }
}

impl BuildToolchain for OpenSslToolchain {
    fn configure(&self, arena: &Arena) -> BcrResult<()> {
        write_atomic(
            &arena.source_dir.join(CONFIG_FILE),
            render_config_file(arena.platform).as_bytes(),
        )?;
        self.configure_command(arena).run()
    }

    fn generate(&self, arena: &Arena, files: &[String]) -> BcrResult<()> {
        self.generate_command(arena, files).run()
    }

    fn extract_listing(&self, arena: &Arena) -> BcrResult<String> {
        self.extract_command(arena).output()
    }
}

/// Perl configuration inheriting from `platform` with dynamic loading disabled
pub fn render_config_file(platform: Platform) -> String {
    format!(
        "(\n    '{}' => {{\n        inherit_from => [ \"{}\" ],\n        dso_scheme   => undef,\n    }}\n);\n",
        CONFIG_TARGET, platform
    )
}
