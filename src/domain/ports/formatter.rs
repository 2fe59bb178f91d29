//! Formatter port - lints generated Starlark before packaging

use std::path::Path;

use crate::error::BcrResult;

/// Formats a generated declarative file in place
///
/// Only success matters; callers never inspect the formatted content.
pub trait Formatter {
    fn format(&self, path: &Path) -> BcrResult<()>;
}

/// Formatter that leaves files untouched
pub struct NoopFormatter;

impl Formatter for NoopFormatter {
    fn format(&self, _path: &Path) -> BcrResult<()> {
        Ok(())
    }
}
