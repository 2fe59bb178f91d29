//! Combine command handler
//!
//! Merges the bundles written by `harvest` on each host and publishes them
//! as one release.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use bcr_openssl::domain::entities::BUNDLE_FORMAT_VERSION;
use bcr_openssl::domain::ports::ReleaseEvent;
use bcr_openssl::{BcrError, HarvestBundle};

use super::{ensure_unreleased, parse_os, publish_release, release_options, CommandContext};
use crate::cli::PublishArgs;

pub fn cmd_combine(
    mut ctx: CommandContext,
    bundles: &[PathBuf],
    os: &str,
    publish: &PublishArgs,
) -> Result<()> {
    let os = parse_os(os)?;
    ctx.apply_publish_args(publish);

    let options = release_options(&ctx.config, publish)?;
    ensure_unreleased(&ctx.config, &options)?;

    let bundle = merge_bundles(bundles)?;

    let events = ctx.events();
    events.on_event(ReleaseEvent::Started {
        command: "combine",
        tag: Some(options.tag.to_string()),
        platforms: bundle.built_platforms(),
    });
    publish_release(&ctx.config, os, &bundle, &options, events.as_ref())?;
    Ok(())
}

fn merge_bundles(paths: &[PathBuf]) -> Result<HarvestBundle> {
    let mut merged: Option<HarvestBundle> = None;
    for path in paths {
        let bundle = read_bundle(path)?;
        match merged.as_mut() {
            Some(acc) => acc
                .merge(bundle)
                .with_context(|| format!("merging {}", path.display()))?,
            None => merged = Some(bundle),
        }
    }
    merged.context("no harvest bundles given")
}

fn read_bundle(path: &Path) -> Result<HarvestBundle> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading bundle {}", path.display()))?;
    let bundle: HarvestBundle = serde_json::from_str(&content)
        .map_err(BcrError::from)
        .with_context(|| format!("parsing bundle {}", path.display()))?;
    if bundle.format_version != BUNDLE_FORMAT_VERSION {
        return Err(BcrError::BundleConflict {
            message: format!(
                "{} has format version {}, expected {}",
                path.display(),
                bundle.format_version,
                BUNDLE_FORMAT_VERSION
            ),
        }
        .into());
    }
    Ok(bundle)
}
