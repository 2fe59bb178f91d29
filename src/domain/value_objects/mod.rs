//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod integrity;
mod platform;
mod tag;

pub use integrity::{IntegrityAlgorithm, IntegrityHash};
pub use platform::{OperatingSystem, OsFamily, Platform};
pub use tag::{ReleaseTag, UpstreamVersion};
