//! Domain Ports (Interfaces)
//!
//! Boundaries to the external collaborators: the OpenSSL build tooling, the
//! archiver, the formatter, the source download and progress reporting.
//! Infrastructure provides the concrete implementations.

pub mod archiver;
pub mod events;
pub mod fetcher;
pub mod formatter;
pub mod toolchain;

pub use archiver::Archiver;
pub use events::{NoopEventSink, ReleaseEvent, ReleaseEventSink};
pub use fetcher::{FetchedSource, SourceFetcher};
pub use formatter::{Formatter, NoopFormatter};
pub use toolchain::{Arena, BuildToolchain};
