//! Release Event Port
//!
//! Observable interface for release runs: console progress, NDJSON streams
//! for CI, or silence in tests.

use std::path::PathBuf;

use crate::domain::entities::RunStage;
use crate::domain::value_objects::Platform;

/// Event emitted during a release run
#[derive(Debug, Clone)]
pub enum ReleaseEvent {
    /// Run started for a set of platforms
    Started {
        command: &'static str,
        tag: Option<String>,
        platforms: Vec<Platform>,
    },

    /// Run entered a new stage
    StageEntered { stage: RunStage },

    /// Upstream archive downloaded and fingerprinted
    SourceFetched { url: String, integrity: String },

    /// A platform's build started
    PlatformStarted {
        index: usize,
        total: usize,
        platform: Platform,
    },

    /// A platform's generated files were collected
    PlatformHarvested {
        platform: Platform,
        generated_count: usize,
    },

    /// Partition computed
    Partitioned { independent: usize, specific: usize },

    /// A file of the release tree was written
    FileWritten { path: PathBuf },

    /// Overlay archive produced
    ArchiveWritten { path: PathBuf, integrity: String },

    /// A file was replaced by a link to the previous tag
    FileLinked { path: PathBuf, target: PathBuf },

    /// Deduplication finished (or was skipped)
    Deduplicated {
        previous: Option<PathBuf>,
        linked: usize,
        kept: usize,
    },

    /// Registry metadata now lists the tag
    MetadataUpdated { path: PathBuf, tag: String },

    /// Run completed
    Completed { output: PathBuf },
}

/// Trait for receiving release events
pub trait ReleaseEventSink {
    fn on_event(&self, event: ReleaseEvent);

    /// Whether this sink wants per-file events
    fn wants_detailed_events(&self) -> bool {
        true
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl ReleaseEventSink for NoopEventSink {
    fn on_event(&self, _event: ReleaseEvent) {}

    fn wants_detailed_events(&self) -> bool {
        false
    }
}
