//! Build toolchain port - OpenSSL's own Configure/make/Perl tooling

use std::path::PathBuf;

use crate::domain::value_objects::Platform;
use crate::error::BcrResult;

/// Isolated source tree owned by a single platform's build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arena {
    pub platform: Platform,
    pub source_dir: PathBuf,
}

impl Arena {
    pub fn new(platform: Platform, source_dir: impl Into<PathBuf>) -> Self {
        Self {
            platform,
            source_dir: source_dir.into(),
        }
    }

    /// Absolute location of a generated file inside the arena
    pub fn generated_path(&self, relative: &str) -> PathBuf {
        relative
            .split('/')
            .fold(self.source_dir.clone(), |acc, part| acc.join(part))
    }
}

/// Runs the native build steps inside an arena
///
/// Every step must fail on a non-zero exit of the underlying tool.
pub trait BuildToolchain {
    /// Configure the arena's tree for its platform
    fn configure(&self, arena: &Arena) -> BcrResult<()>;

    /// Produce the listed generated files inside the arena
    fn generate(&self, arena: &Arena, files: &[String]) -> BcrResult<()>;

    /// Source/define/assembler listing of the configured tree, as Starlark
    fn extract_listing(&self, arena: &Arena) -> BcrResult<String>;
}
