//! Release run stages
//!
//! A run only moves forward; the deduplication stage may be skipped when
//! there is no previous tag to compare against.

use std::fmt;

use serde::Serialize;

use crate::error::{BcrError, BcrResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStage {
    /// Per-platform builds populate the content map
    Collecting,
    /// Independent/specific sets are frozen
    Partitioned,
    /// Constants, overlay and archive are written
    Packaged,
    /// Unchanged files were linked to the previous tag
    Deduplicated,
    Done,
}

impl RunStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStage::Collecting => "collecting",
            RunStage::Partitioned => "partitioned",
            RunStage::Packaged => "packaged",
            RunStage::Deduplicated => "deduplicated",
            RunStage::Done => "done",
        }
    }

    fn can_advance_to(&self, to: RunStage) -> bool {
        matches!(
            (self, to),
            (RunStage::Collecting, RunStage::Partitioned)
                | (RunStage::Partitioned, RunStage::Packaged)
                | (RunStage::Packaged, RunStage::Deduplicated)
                | (RunStage::Packaged, RunStage::Done)
                | (RunStage::Deduplicated, RunStage::Done)
        )
    }
}

impl fmt::Display for RunStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tracks the current stage of one release run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunProgress {
    stage: RunStage,
}

impl RunProgress {
    pub fn new() -> Self {
        Self {
            stage: RunStage::Collecting,
        }
    }

    pub fn stage(&self) -> RunStage {
        self.stage
    }

    pub fn advance(&mut self, to: RunStage) -> BcrResult<RunStage> {
        if !self.stage.can_advance_to(to) {
            return Err(BcrError::InvalidTransition {
                from: self.stage,
                to,
            });
        }
        self.stage = to;
        Ok(to)
    }
}

impl Default for RunProgress {
    fn default() -> Self {
        Self::new()
    }
}
