//! Harvest Use Case
//!
//! Fetches the upstream source once, then for each selected platform:
//! 1. Extracts a pristine copy into the platform's own arena
//! 2. Configures and generates with the native toolchain
//! 3. Reads every expected generated file
//! 4. Captures the source listing
//!
//! Arenas are never shared, so one platform's build cannot leak into the
//! next one's tree.

use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::domain::entities::{HarvestBundle, PlatformHarvest};
use crate::domain::ports::{
    Arena, BuildToolchain, FetchedSource, ReleaseEvent, ReleaseEventSink, SourceFetcher,
};
use crate::domain::value_objects::Platform;
use crate::error::BcrError;

/// Options for one harvest run
#[derive(Debug, Clone)]
pub struct HarvestOptions {
    pub openssl_version: String,
    pub platforms: Vec<Platform>,
    /// Repository-relative paths every platform must produce
    pub generated_files: Vec<String>,
    /// Scratch root; holds the download and one arena per platform
    pub work_dir: PathBuf,
}

pub struct HarvestUseCase<F, T>
where
    F: SourceFetcher,
    T: BuildToolchain,
{
    fetcher: F,
    toolchain: T,
}

impl<F, T> HarvestUseCase<F, T>
where
    F: SourceFetcher,
    T: BuildToolchain,
{
    pub fn new(fetcher: F, toolchain: T) -> Self {
        Self { fetcher, toolchain }
    }

    pub fn execute(
        &self,
        options: &HarvestOptions,
        events: &dyn ReleaseEventSink,
    ) -> Result<HarvestBundle> {
        let source = self
            .fetcher
            .fetch(&options.openssl_version, &options.work_dir.join("download"))
            .with_context(|| format!("fetching OpenSSL {}", options.openssl_version))?;
        events.on_event(ReleaseEvent::SourceFetched {
            url: source.info.url.clone(),
            integrity: source.info.integrity.clone(),
        });

        let mut bundle = HarvestBundle::new(&options.openssl_version, source.info.clone());
        let total = options.platforms.len();
        for (index, platform) in options.platforms.iter().copied().enumerate() {
            events.on_event(ReleaseEvent::PlatformStarted {
                index,
                total,
                platform,
            });

            let harvest = self
                .harvest_platform(&source, platform, options)
                .with_context(|| format!("collecting generated files for {}", platform))?;
            let generated_count = harvest.generated.len();
            bundle.insert(platform, harvest)?;

            events.on_event(ReleaseEvent::PlatformHarvested {
                platform,
                generated_count,
            });
        }

        Ok(bundle)
    }

    fn harvest_platform(
        &self,
        source: &FetchedSource,
        platform: Platform,
        options: &HarvestOptions,
    ) -> Result<PlatformHarvest> {
        let arena_dir = options.work_dir.join(platform.config_name());
        if arena_dir.exists() {
            fs::remove_dir_all(&arena_dir)
                .with_context(|| format!("clearing arena {}", arena_dir.display()))?;
        }
        let source_dir = self
            .fetcher
            .unpack(source, &arena_dir)
            .context("extracting source archive")?;
        let arena = Arena::new(platform, source_dir);

        self.toolchain.configure(&arena).context("configure")?;
        self.toolchain
            .generate(&arena, &options.generated_files)
            .context("generate")?;

        let mut harvest = PlatformHarvest::default();
        for path in &options.generated_files {
            let content = match fs::read_to_string(arena.generated_path(path)) {
                Ok(content) => content,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    return Err(BcrError::MissingGeneratedFile {
                        platform,
                        path: path.clone(),
                    }
                    .into());
                }
                Err(e) => return Err(BcrError::Io(e).into()),
            };
            harvest.generated.insert(path.clone(), content);
        }

        harvest.listing = self
            .toolchain
            .extract_listing(&arena)
            .context("extracting source listing")?;
        Ok(harvest)
    }
}
