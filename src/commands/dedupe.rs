//! Dedupe command handler

use std::path::Path;

use anyhow::{Context, Result};

use bcr_openssl::deduplicate;
use bcr_openssl::domain::ports::ReleaseEvent;

use super::CommandContext;

pub fn cmd_dedupe(ctx: &CommandContext, previous: &Path, current: &Path) -> Result<()> {
    if !current.is_dir() {
        anyhow::bail!("release tree {} does not exist", current.display());
    }

    let events = ctx.events();
    let report = deduplicate(previous, current, events.as_ref()).with_context(|| {
        format!(
            "deduplicating {} against {}",
            current.display(),
            previous.display()
        )
    })?;

    events.on_event(ReleaseEvent::Deduplicated {
        previous: previous.is_dir().then(|| previous.to_path_buf()),
        linked: report.linked.len(),
        kept: report.kept.len(),
    });
    Ok(())
}
