//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Atomic writes, symlinks and deterministic tree walks
//! - `process/` - External commands with explicit cwd and environment
//! - `events/` - Console and NDJSON event sinks

pub mod archiver;
pub mod events;
pub mod fetcher;
pub mod formatter;
pub mod fs;
pub mod process;
pub mod toolchain;

pub use archiver::{default_tar_program, ArchiveNormalization, TarArchiver};
pub use events::{ConsoleEventSink, JsonEventSink};
pub use fetcher::{CurlFetcher, DEFAULT_URL_TEMPLATE};
pub use formatter::Buildifier;
pub use toolchain::OpenSslToolchain;
