//! Harvest command handler
//!
//! Builds this host's slice of the platform matrix and saves the result as a
//! JSON bundle for a later `combine` run.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use bcr_openssl::application::HarvestOptions;
use bcr_openssl::domain::ports::{ReleaseEvent, ReleaseEventSink};
use bcr_openssl::domain::services::to_json_indented;
use bcr_openssl::infrastructure::fs::write_atomic;
use bcr_openssl::presentation::factory;
use bcr_openssl::{HarvestBundle, OperatingSystem, RunStage};

use super::{parse_os, CommandContext, WorkDir};

pub fn cmd_harvest(
    ctx: &CommandContext,
    os: &str,
    output: &Path,
    work_dir: Option<PathBuf>,
    openssl_version: Option<String>,
) -> Result<()> {
    let os = parse_os(os)?;
    let version = openssl_version.unwrap_or_else(|| ctx.config.openssl.version.clone());
    let events = ctx.events();

    events.on_event(ReleaseEvent::Started {
        command: "harvest",
        tag: None,
        platforms: os.platforms().to_vec(),
    });
    let bundle = run_harvest(ctx, os, &version, work_dir, events.as_ref())?;

    let rendered = format!("{}\n", to_json_indented(&bundle, 2)?);
    write_atomic(output, rendered.as_bytes())
        .with_context(|| format!("writing bundle {}", output.display()))?;

    events.on_event(ReleaseEvent::Completed {
        output: output.to_path_buf(),
    });
    Ok(())
}

/// Fetch OpenSSL and harvest every platform of `os`
pub fn run_harvest(
    ctx: &CommandContext,
    os: OperatingSystem,
    openssl_version: &str,
    work_dir: Option<PathBuf>,
    events: &dyn ReleaseEventSink,
) -> Result<HarvestBundle> {
    let work = WorkDir::new(work_dir)?;
    let use_case = factory::create_harvest_use_case(&ctx.config, os)?;

    events.on_event(ReleaseEvent::StageEntered {
        stage: RunStage::Collecting,
    });
    use_case.execute(
        &HarvestOptions {
            openssl_version: openssl_version.to_string(),
            platforms: os.platforms().to_vec(),
            generated_files: ctx.config.build.generated_files.clone(),
            work_dir: work.path().to_path_buf(),
        },
        events,
    )
}
