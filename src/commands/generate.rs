//! Generate command handler
//!
//! Single-host release: harvest every platform of the selection, then
//! partition, package, deduplicate and update the registry metadata.

use std::path::PathBuf;

use anyhow::Result;

use bcr_openssl::domain::ports::ReleaseEvent;

use super::harvest::run_harvest;
use super::{ensure_unreleased, parse_os, publish_release, release_options, CommandContext};
use crate::cli::PublishArgs;

pub fn cmd_generate(
    mut ctx: CommandContext,
    os: &str,
    publish: &PublishArgs,
    work_dir: Option<PathBuf>,
    openssl_version: Option<String>,
) -> Result<()> {
    let os = parse_os(os)?;
    ctx.apply_publish_args(publish);
    if let Some(version) = openssl_version {
        ctx.config.openssl.version = version;
    }

    let options = release_options(&ctx.config, publish)?;
    ensure_unreleased(&ctx.config, &options)?;

    let events = ctx.events();
    events.on_event(ReleaseEvent::Started {
        command: "generate",
        tag: Some(options.tag.to_string()),
        platforms: os.platforms().to_vec(),
    });

    let bundle = run_harvest(
        &ctx,
        os,
        &ctx.config.openssl.version,
        work_dir,
        events.as_ref(),
    )?;
    publish_release(&ctx.config, os, &bundle, &options, events.as_ref())?;
    Ok(())
}
