//! Archiver port - produces the overlay archive

use std::path::Path;

use crate::error::BcrResult;

/// Packs files of a directory into one deterministic archive
pub trait Archiver {
    /// Archive `files` (relative to `dir`, already sorted) into `output`
    ///
    /// Implementations must normalise ownership and timestamps so that
    /// re-running on identical input produces identical bytes.
    fn archive(&self, dir: &Path, files: &[String], output: &Path) -> BcrResult<()>;
}
