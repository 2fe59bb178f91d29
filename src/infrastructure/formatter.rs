//! Buildifier formatter for generated Starlark

use std::path::Path;

use crate::domain::ports::Formatter;
use crate::error::BcrResult;
use crate::infrastructure::process::CommandSpec;

#[derive(Debug, Clone)]
pub struct Buildifier {
    pub program: String,
}

impl Buildifier {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Formatter for Buildifier {
    fn format(&self, path: &Path) -> BcrResult<()> {
        CommandSpec::new(&self.program).arg(path).run()
    }
}
