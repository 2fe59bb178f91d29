//! Command handlers
//!
//! Each handler loads configuration, wires the use cases through the
//! factory and reports progress through the selected event sink.

pub mod combine;
pub mod dedupe;
pub mod generate;
pub mod harvest;
pub mod integrity;
pub mod platforms;
pub mod previous_tag;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use bcr_openssl::application::{ReleaseOptions, ReleaseReport, ReleaseUseCase};
use bcr_openssl::config::Config;
use bcr_openssl::domain::ports::ReleaseEventSink;
use bcr_openssl::presentation::factory;
use bcr_openssl::{BcrError, HarvestBundle, OperatingSystem, ReleaseTag};

use crate::cli::PublishArgs;
use crate::ui::output::print_config_warnings;

/// Settings shared by every handler
pub struct CommandContext {
    pub config: Config,
    pub json: bool,
    pub verbose: u8,
}

impl CommandContext {
    /// Load `--config` if given, otherwise the project/user config
    pub fn load(config_path: Option<&Path>, json: bool, verbose: u8) -> Result<Self> {
        let (config, warnings) = match config_path {
            Some(path) => {
                let (config, warnings) = Config::load_with_warnings(path)
                    .with_context(|| format!("loading {}", path.display()))?;
                (config.with_env_overrides()?, warnings)
            }
            None => {
                let cwd = std::env::current_dir()?;
                Config::load_or_default(Some(&cwd))?
            }
        };
        print_config_warnings(&warnings, json);

        Ok(Self {
            config,
            json,
            verbose,
        })
    }

    pub fn events(&self) -> Box<dyn ReleaseEventSink> {
        factory::create_event_sink(&self.config, self.json, self.verbose)
    }

    /// Fold the publish flags into the configuration
    pub fn apply_publish_args(&mut self, args: &PublishArgs) {
        if let Some(template) = &args.release_url_template {
            self.config.module.release_url_template = template.clone();
        }
        if let Some(buildifier) = &args.buildifier {
            self.config.tools.buildifier = buildifier.clone();
        }
        if let Some(dir) = &args.templates_dir {
            self.config.templates_dir = dir.clone();
        }
    }
}

pub fn parse_os(value: &str) -> Result<OperatingSystem> {
    Ok(value.parse::<OperatingSystem>()?)
}

pub fn release_options(config: &Config, args: &PublishArgs) -> Result<ReleaseOptions> {
    let tag: ReleaseTag = args.tag.parse()?;
    let overlay_url = config.release_url(tag.as_str());
    Ok(ReleaseOptions {
        registry_dir: args.bcr_dir.clone(),
        tag,
        overlay_archive: args.overlay_tar_path.clone(),
        overlay_url,
        generated_files: config.build.generated_files.clone(),
    })
}

/// Fail before any build work when the tag was already published
pub fn ensure_unreleased(config: &Config, options: &ReleaseOptions) -> Result<()> {
    let out_dir = options
        .module_dir(&config.module.name)
        .join(options.tag.as_str());
    if out_dir.exists() {
        return Err(BcrError::OutputExists { path: out_dir }.into());
    }
    Ok(())
}

/// Partition, package, deduplicate and record `bundle` under the tag
pub fn publish_release(
    config: &Config,
    os: OperatingSystem,
    bundle: &HarvestBundle,
    options: &ReleaseOptions,
    events: &dyn ReleaseEventSink,
) -> Result<ReleaseReport> {
    let settings = factory::module_settings(config);
    let archiver = factory::create_archiver(config, os);
    let formatter = factory::create_formatter(config);
    ReleaseUseCase::new(&settings, &archiver, &formatter).execute(bundle, options, events)
}

/// Scratch directory: the given one, or a temporary directory removed on drop
pub enum WorkDir {
    Given(PathBuf),
    Temp(tempfile::TempDir),
}

impl WorkDir {
    pub fn new(given: Option<PathBuf>) -> Result<Self> {
        match given {
            Some(dir) => {
                std::fs::create_dir_all(&dir)
                    .with_context(|| format!("creating work directory {}", dir.display()))?;
                Ok(WorkDir::Given(dir))
            }
            None => Ok(WorkDir::Temp(
                tempfile::Builder::new().prefix("bcr-openssl").tempdir()?,
            )),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            WorkDir::Given(dir) => dir,
            WorkDir::Temp(dir) => dir.path(),
        }
    }
}
