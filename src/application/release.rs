//! Release Use Case
//!
//! Drives a harvested bundle through the remaining stages of a run:
//! partition, package, deduplicate against the previous tag, and record
//! the tag in the registry metadata.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::domain::entities::{HarvestBundle, RunProgress, RunStage};
use crate::domain::ports::{Archiver, Formatter, ReleaseEvent, ReleaseEventSink};
use crate::domain::services::partition;
use crate::domain::value_objects::ReleaseTag;

use super::dedup::{deduplicate, previous_tag_dir, DedupReport};
use super::metadata::add_version;
use super::package::{ModuleSettings, PackageRequest, PackageUseCase};

/// Options for publishing one tag
#[derive(Debug, Clone)]
pub struct ReleaseOptions {
    /// Root of the registry checkout (contains `modules/`)
    pub registry_dir: PathBuf,
    pub tag: ReleaseTag,
    pub overlay_archive: PathBuf,
    pub overlay_url: String,
    /// Paths every built platform must have produced
    pub generated_files: Vec<String>,
}

impl ReleaseOptions {
    pub fn module_dir(&self, module_name: &str) -> PathBuf {
        self.registry_dir.join("modules").join(module_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseReport {
    pub out_dir: PathBuf,
    pub independent: usize,
    pub specific: usize,
    /// `None` when there was no previous tag to compare against
    pub dedup: Option<DedupReport>,
}

pub struct ReleaseUseCase<'a> {
    settings: &'a ModuleSettings,
    archiver: &'a dyn Archiver,
    formatter: &'a dyn Formatter,
}

impl<'a> ReleaseUseCase<'a> {
    pub fn new(
        settings: &'a ModuleSettings,
        archiver: &'a dyn Archiver,
        formatter: &'a dyn Formatter,
    ) -> Self {
        Self {
            settings,
            archiver,
            formatter,
        }
    }

    pub fn execute(
        &self,
        bundle: &HarvestBundle,
        options: &ReleaseOptions,
        events: &dyn ReleaseEventSink,
    ) -> Result<ReleaseReport> {
        let mut progress = RunProgress::new();
        let module_dir = options.module_dir(&self.settings.name);
        let out_dir = module_dir.join(options.tag.as_str());

        let content = bundle.content_map().context("merging harvested content")?;
        content
            .validate(&options.generated_files, &bundle.built_platforms())
            .context("validating harvested content")?;

        enter(&mut progress, RunStage::Partitioned, events)?;
        let partition = partition(&content);
        events.on_event(ReleaseEvent::Partitioned {
            independent: partition.independent().len(),
            specific: partition.specific().len(),
        });

        enter(&mut progress, RunStage::Packaged, events)?;
        PackageUseCase::new(self.settings, self.archiver, self.formatter)
            .execute(
                &PackageRequest {
                    bundle,
                    content: &content,
                    partition: &partition,
                    tag: &options.tag,
                    out_dir: &out_dir,
                    overlay_archive: &options.overlay_archive,
                    overlay_url: options.overlay_url.clone(),
                },
                events,
            )
            .with_context(|| format!("packaging {}", options.tag))?;

        let dedup = match previous_tag_dir(&module_dir, &options.tag) {
            Some(previous) => {
                enter(&mut progress, RunStage::Deduplicated, events)?;
                let report = deduplicate(&previous, &out_dir, events)
                    .with_context(|| format!("deduplicating against {}", previous.display()))?;
                events.on_event(ReleaseEvent::Deduplicated {
                    previous: Some(previous),
                    linked: report.linked.len(),
                    kept: report.kept.len(),
                });
                Some(report)
            }
            None => {
                events.on_event(ReleaseEvent::Deduplicated {
                    previous: None,
                    linked: 0,
                    kept: 0,
                });
                None
            }
        };

        let metadata = add_version(&module_dir, options.tag.as_str())
            .context("updating registry metadata")?;
        events.on_event(ReleaseEvent::MetadataUpdated {
            path: metadata,
            tag: options.tag.to_string(),
        });

        enter(&mut progress, RunStage::Done, events)?;
        events.on_event(ReleaseEvent::Completed {
            output: out_dir.clone(),
        });

        Ok(ReleaseReport {
            out_dir,
            independent: partition.independent().len(),
            specific: partition.specific().len(),
            dedup,
        })
    }
}

fn enter(progress: &mut RunProgress, stage: RunStage, events: &dyn ReleaseEventSink) -> Result<()> {
    progress.advance(stage)?;
    events.on_event(ReleaseEvent::StageEntered { stage });
    Ok(())
}

