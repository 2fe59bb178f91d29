//! JSON Event Sink
//!
//! Outputs release events as NDJSON for CI/automation consumption.

use crate::domain::ports::{ReleaseEvent, ReleaseEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer (for testing)
    #[allow(dead_code)]
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl ReleaseEventSink for JsonEventSink {
    fn on_event(&self, event: ReleaseEvent) {
        let json = match event {
            ReleaseEvent::Started {
                command,
                tag,
                platforms,
            } => serde_json::json!({
                "event": "start",
                "command": command,
                "tag": tag,
                "platforms": platforms,
            }),

            ReleaseEvent::StageEntered { stage } => serde_json::json!({
                "event": "stage",
                "stage": stage,
            }),

            ReleaseEvent::SourceFetched { url, integrity } => serde_json::json!({
                "event": "source_fetched",
                "url": url,
                "integrity": integrity,
            }),

            ReleaseEvent::PlatformStarted {
                index,
                total,
                platform,
            } => serde_json::json!({
                "event": "platform_start",
                "index": index,
                "total": total,
                "platform": platform,
            }),

            ReleaseEvent::PlatformHarvested {
                platform,
                generated_count,
            } => serde_json::json!({
                "event": "platform_harvested",
                "platform": platform,
                "generated": generated_count,
            }),

            ReleaseEvent::Partitioned {
                independent,
                specific,
            } => serde_json::json!({
                "event": "partitioned",
                "independent": independent,
                "specific": specific,
            }),

            ReleaseEvent::FileWritten { path } => serde_json::json!({
                "event": "file_written",
                "path": path.display().to_string(),
            }),

            ReleaseEvent::ArchiveWritten { path, integrity } => serde_json::json!({
                "event": "archive_written",
                "path": path.display().to_string(),
                "integrity": integrity,
            }),

            ReleaseEvent::FileLinked { path, target } => serde_json::json!({
                "event": "file_linked",
                "path": path.display().to_string(),
                "target": target.display().to_string(),
            }),

            ReleaseEvent::Deduplicated {
                previous,
                linked,
                kept,
            } => serde_json::json!({
                "event": "deduplicated",
                "previous": previous.map(|p| p.display().to_string()),
                "linked": linked,
                "kept": kept,
            }),

            ReleaseEvent::MetadataUpdated { path, tag } => serde_json::json!({
                "event": "metadata_updated",
                "path": path.display().to_string(),
                "tag": tag,
            }),

            ReleaseEvent::Completed { output } => serde_json::json!({
                "event": "complete",
                "status": "success",
                "output": output.display().to_string(),
            }),
        };

        self.write_event(json);
    }
}
