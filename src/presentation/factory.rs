//! Use Case Factory
//!
//! Creates use cases and collaborators with infrastructure dependencies
//! wired up from a loaded [`Config`]. This is the dependency injection point
//! for the application.

use is_terminal::IsTerminal;

use crate::application::{HarvestUseCase, ModuleSettings};
use crate::config::{Config, Verbosity};
use crate::domain::ports::{NoopEventSink, ReleaseEventSink};
use crate::domain::value_objects::{IntegrityHash, OperatingSystem};
use crate::error::BcrResult;
use crate::infrastructure::{
    default_tar_program, ArchiveNormalization, Buildifier, ConsoleEventSink, CurlFetcher,
    JsonEventSink, OpenSslToolchain, TarArchiver,
};

/// Type alias for the production harvest use case
pub type ConcreteHarvestUseCase = HarvestUseCase<CurlFetcher, OpenSslToolchain>;

fn tar_program(config: &Config) -> String {
    config
        .tools
        .tar
        .clone()
        .unwrap_or_else(|| default_tar_program().to_string())
}

/// Create a harvest use case for the given host selection
///
/// Fails when the configured pinned integrity cannot be parsed.
pub fn create_harvest_use_case(
    config: &Config,
    os: OperatingSystem,
) -> BcrResult<ConcreteHarvestUseCase> {
    let pinned_integrity = config
        .openssl
        .integrity
        .as_deref()
        .map(IntegrityHash::parse)
        .transpose()?;

    let fetcher = CurlFetcher {
        curl: config.tools.curl.clone(),
        tar: tar_program(config),
        url_template: config.openssl.url_template.clone(),
        pinned_integrity,
    };
    let toolchain = OpenSslToolchain {
        os,
        perl: config.tools.perl.clone(),
        make: config.tools.make.clone(),
        configure_options: config.build.configure_options.clone(),
        source_date_epoch: config.build.source_date_epoch,
        extract_script: config.extract_script(),
    };
    Ok(HarvestUseCase::new(fetcher, toolchain))
}

/// Tar archiver; ownership and mtime are normalised except on windows hosts
pub fn create_archiver(config: &Config, os: OperatingSystem) -> TarArchiver {
    let normalization = os.normalizes_archives().then(|| ArchiveNormalization {
        owner: config.archive.owner.clone(),
        group: config.archive.group.clone(),
        mtime_epoch: config.archive.mtime_epoch,
    });
    TarArchiver {
        tar: tar_program(config),
        normalization,
    }
}

pub fn create_formatter(config: &Config) -> Buildifier {
    Buildifier::new(config.tools.buildifier.clone())
}

pub fn module_settings(config: &Config) -> ModuleSettings {
    ModuleSettings {
        name: config.module.name.clone(),
        dependencies: config.module.dependencies.clone(),
        overlay_repo_name: config.module.overlay_repo_name.clone(),
        templates_dir: config.templates_dir.clone(),
    }
}

/// Pick the event sink for a run
///
/// `--json` always streams NDJSON; otherwise a quiet configuration silences
/// progress and the console sink renders the rest on stderr.
pub fn create_event_sink(config: &Config, json: bool, verbose: u8) -> Box<dyn ReleaseEventSink> {
    if json {
        return Box::new(JsonEventSink::stdout());
    }
    if config.output.verbosity == Verbosity::Quiet && verbose == 0 {
        return Box::new(NoopEventSink);
    }
    let level = config.output.verbosity.level(verbose);
    Box::new(ConsoleEventSink::new(level, std::io::stderr().is_terminal()))
}
