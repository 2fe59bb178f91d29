//! Console Event Sink
//!
//! Human-readable progress on stderr. Per-file lines only show up at `-v`.

use std::fmt::Write as _;

use crate::domain::ports::{ReleaseEvent, ReleaseEventSink};

struct Glyphs {
    check: &'static str,
    arrow: &'static str,
    link: &'static str,
    bullet: &'static str,
}

impl Glyphs {
    fn unicode() -> Self {
        Self {
            check: "✓",
            arrow: "→",
            link: "⇢",
            bullet: "•",
        }
    }

    fn ascii() -> Self {
        Self {
            check: "[OK]",
            arrow: "->",
            link: "=>",
            bullet: "*",
        }
    }
}

pub struct ConsoleEventSink {
    verbose: u8,
    glyphs: Glyphs,
}

impl ConsoleEventSink {
    pub fn new(verbose: u8, unicode: bool) -> Self {
        Self {
            verbose,
            glyphs: if unicode {
                Glyphs::unicode()
            } else {
                Glyphs::ascii()
            },
        }
    }

    /// Line for an event, or `None` when it is below the verbosity threshold
    pub fn render(&self, event: &ReleaseEvent) -> Option<String> {
        let g = &self.glyphs;
        let line = match event {
            ReleaseEvent::Started {
                command,
                tag,
                platforms,
            } => {
                let mut line = format!("{} {}", g.bullet, command);
                if let Some(tag) = tag {
                    let _ = write!(line, " {}", tag);
                }
                let names: Vec<_> = platforms.iter().map(|p| p.config_name()).collect();
                let _ = write!(line, " [{}]", names.join(", "));
                line
            }
            ReleaseEvent::StageEntered { stage } => {
                if self.verbose == 0 {
                    return None;
                }
                format!("  stage: {}", stage)
            }
            ReleaseEvent::SourceFetched { url, integrity } => {
                format!("  {} fetched {} ({})", g.check, url, integrity)
            }
            ReleaseEvent::PlatformStarted {
                index,
                total,
                platform,
            } => format!("  [{}/{}] {}", index + 1, total, platform),
            ReleaseEvent::PlatformHarvested {
                platform,
                generated_count,
            } => format!(
                "  {} {}: {} generated files",
                g.check, platform, generated_count
            ),
            ReleaseEvent::Partitioned {
                independent,
                specific,
            } => format!(
                "  {} {} platform-independent, {} platform-specific",
                g.check, independent, specific
            ),
            ReleaseEvent::FileWritten { path } => {
                if self.verbose == 0 {
                    return None;
                }
                format!("    {} {}", g.arrow, path.display())
            }
            ReleaseEvent::ArchiveWritten { path, integrity } => {
                format!("  {} {} ({})", g.check, path.display(), integrity)
            }
            ReleaseEvent::FileLinked { path, target } => {
                if self.verbose == 0 {
                    return None;
                }
                format!("    {} {} {}", path.display(), g.link, target.display())
            }
            ReleaseEvent::Deduplicated {
                previous,
                linked,
                kept,
            } => match previous {
                Some(previous) => format!(
                    "  {} {} linked to {}, {} kept",
                    g.check,
                    linked,
                    previous.display(),
                    kept
                ),
                None => "  no previous tag, nothing to deduplicate".to_string(),
            },
            ReleaseEvent::MetadataUpdated { path, tag } => {
                format!("  {} {} lists {}", g.check, path.display(), tag)
            }
            ReleaseEvent::Completed { output } => {
                format!("{} Done: {}", g.check, output.display())
            }
        };
        Some(line)
    }
}

impl ReleaseEventSink for ConsoleEventSink {
    fn on_event(&self, event: ReleaseEvent) {
        if let Some(line) = self.render(&event) {
            eprintln!("{}", line);
        }
    }

    fn wants_detailed_events(&self) -> bool {
        self.verbose > 0
    }
}
