//! Event Sink Implementations
//!
//! Provides concrete implementations of ReleaseEventSink:
//! - ConsoleEventSink: Human-readable progress on stderr
//! - JsonEventSink: NDJSON output for CI/automation

mod console;
mod json;

pub use console::ConsoleEventSink;
pub use json::JsonEventSink;
