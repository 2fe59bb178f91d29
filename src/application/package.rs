//! Package Use Case
//!
//! Turns a harvest into a registry release tree:
//!
//! ```text
//! <out_dir>/
//!   MODULE.bazel
//!   presubmit.yml
//!   source.json
//!   overlay/
//!     BUILD.bazel, utils.bzl, test_bazel_build/BUILD.bazel
//!     MODULE.bazel -> ../MODULE.bazel
//! ```
//!
//! plus the overlay archive holding the generated sources, one constants
//! file per platform and the Bazel helpers.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::domain::entities::{GeneratedContentMap, HarvestBundle};
use crate::domain::ports::{Archiver, Formatter, ReleaseEvent, ReleaseEventSink};
use crate::domain::services::{
    render_common, render_constants, render_module, render_source_json, ArchiveRef, BazelDep,
    ModuleDescriptor, PartitionResult,
};
use crate::domain::value_objects::{IntegrityHash, Platform, ReleaseTag, UpstreamVersion};
use crate::error::{BcrError, BcrResult};
use crate::infrastructure::fs::{copy_file, symlink_file, walk_tree, write_atomic};

/// A file copied verbatim from the templates directory
#[derive(Debug, Clone, Copy)]
pub struct Template {
    pub source: &'static str,
    pub dest: &'static str,
    pub executable: bool,
}

const fn template(source: &'static str, dest: &'static str) -> Template {
    Template {
        source,
        dest,
        executable: false,
    }
}

/// Copied into the release directory itself
pub const RELEASE_TEMPLATES: &[Template] = &[template("presubmit.yml", "presubmit.yml")];

/// Copied into `overlay/`
pub const OVERLAY_TEMPLATES: &[Template] = &[
    template("BUILD.openssl.bazel", "BUILD.bazel"),
    template("utils.bzl", "utils.bzl"),
    template("BUILD.test.bazel", "test_bazel_build/BUILD.bazel"),
];

/// Copied into the overlay archive
pub const ARCHIVE_TEMPLATES: &[Template] = &[
    template("collate_into_directory.bzl", "collate_into_directory.bzl"),
    Template {
        source: "move_file_and_strip_prefix.sh",
        dest: "move_file_and_strip_prefix.sh",
        executable: true,
    },
];

const ARCHIVE_BUILD_FILE: &str = "exports_files(glob([\"**\"]))\n";

/// Module-level settings of the release
#[derive(Debug, Clone)]
pub struct ModuleSettings {
    pub name: String,
    pub dependencies: Vec<BazelDep>,
    pub overlay_repo_name: String,
    pub templates_dir: PathBuf,
}

/// Inputs of one packaging run
pub struct PackageRequest<'a> {
    pub bundle: &'a HarvestBundle,
    pub content: &'a GeneratedContentMap,
    pub partition: &'a PartitionResult,
    pub tag: &'a ReleaseTag,
    /// `<registry>/modules/<module>/<tag>`; must not exist yet
    pub out_dir: &'a Path,
    pub overlay_archive: &'a Path,
    /// Published URL of `overlay_archive`
    pub overlay_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageReport {
    pub archive_integrity: IntegrityHash,
    /// Files written under the release directory, relative to it
    pub written: Vec<PathBuf>,
}

pub struct PackageUseCase<'a> {
    settings: &'a ModuleSettings,
    archiver: &'a dyn Archiver,
    formatter: &'a dyn Formatter,
}

impl<'a> PackageUseCase<'a> {
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
        request: &PackageRequest<'_>,
        events: &dyn ReleaseEventSink,
    ) -> Result<PackageReport> {
        let out_dir = request.out_dir;
        if out_dir.exists() {
            return Err(BcrError::OutputExists {
                path: out_dir.to_path_buf(),
            }
            .into());
        }
        let overlay_dir = out_dir.join("overlay");
        fs::create_dir_all(&overlay_dir)
            .with_context(|| format!("creating {}", overlay_dir.display()))?;

        let mut written = Vec::new();
        for t in RELEASE_TEMPLATES {
            self.copy_template(t, out_dir)?;
            written.push(PathBuf::from(t.dest));
        }
        for t in OVERLAY_TEMPLATES {
            self.copy_template(t, &overlay_dir)?;
            written.push(Path::new("overlay").join(t.dest));
        }

        let archive_integrity = self
            .build_archive(request, events)
            .with_context(|| format!("building overlay archive {}", request.overlay_archive.display()))?;
        events.on_event(ReleaseEvent::ArchiveWritten {
            path: request.overlay_archive.to_path_buf(),
            integrity: archive_integrity.to_string(),
        });

        let module = ModuleDescriptor {
            name: self.settings.name.clone(),
            version: request.tag.to_string(),
            compatibility_level: compatibility_level(request.tag, &request.bundle.openssl_version)?,
            dependencies: self.settings.dependencies.clone(),
            overlay: Some(ArchiveRef {
                repo_name: self.settings.overlay_repo_name.clone(),
                url: request.overlay_url.clone(),
                integrity: archive_integrity.clone(),
            }),
        };
        write_atomic(&out_dir.join("MODULE.bazel"), render_module(&module).as_bytes())?;
        symlink_file(Path::new("../MODULE.bazel"), &overlay_dir.join("MODULE.bazel"))?;
        written.push(PathBuf::from("MODULE.bazel"));
        written.push(PathBuf::from("overlay/MODULE.bazel"));

        let overlay_hashes = overlay_integrities(&overlay_dir)?;
        write_atomic(
            &out_dir.join("source.json"),
            render_source_json(&request.bundle.source, &overlay_hashes)?.as_bytes(),
        )?;
        written.push(PathBuf::from("source.json"));

        if events.wants_detailed_events() {
            for path in &written {
                events.on_event(ReleaseEvent::FileWritten {
                    path: out_dir.join(path),
                });
            }
        }

        Ok(PackageReport {
            archive_integrity,
            written,
        })
    }

    fn copy_template(&self, t: &Template, dest_dir: &Path) -> BcrResult<()> {
        let src = self.settings.templates_dir.join(t.source);
        if !src.is_file() {
            return Err(BcrError::MissingTemplate { path: src });
        }
        copy_file(&src, &dest_dir.join(t.dest), t.executable)
    }

    /// Stage the archive contents in a temporary directory, then tar them
    fn build_archive(
        &self,
        request: &PackageRequest<'_>,
        events: &dyn ReleaseEventSink,
    ) -> Result<IntegrityHash> {
        let staging = tempfile::Builder::new()
            .prefix("bcr-openssl-overlay")
            .tempdir()?;
        let stage = staging.path();

        for path in request.partition.independent() {
            let (_, content) = request
                .content
                .canonical(path)
                .with_context(|| format!("no content recorded for {}", path))?;
            write_atomic(&stage.join(path), content.as_bytes())?;
        }

        // Every platform gets a constants file so the BUILD file's loads
        // resolve, built or not.
        for platform in Platform::ALL {
            let constants = render_constants(
                platform,
                &request.bundle.openssl_version,
                &request.bundle.listing(platform),
                &request
                    .partition
                    .specific_contents_for(request.content, platform),
            )?;
            let path = stage.join(format!("constants-{}.bzl", platform));
            write_atomic(&path, constants.as_bytes())?;
            self.formatter
                .format(&path)
                .with_context(|| format!("formatting constants for {}", platform))?;
            if events.wants_detailed_events() {
                events.on_event(ReleaseEvent::FileWritten { path });
            }
        }

        write_atomic(
            &stage.join("common.bzl"),
            render_common(request.partition.independent()).as_bytes(),
        )?;
        for t in ARCHIVE_TEMPLATES {
            self.copy_template(t, stage)?;
        }
        write_atomic(&stage.join("BUILD.bazel"), ARCHIVE_BUILD_FILE.as_bytes())?;

        // Every member listed explicitly, nested ones included, so member
        // order never depends on directory read order
        let mut entries: Vec<String> = walk_tree(stage)?
            .iter()
            .map(|entry| entry.relative_slash())
            .collect();
        entries.sort();

        self.archiver
            .archive(stage, &entries, request.overlay_archive)?;
        Ok(IntegrityHash::of_file(request.overlay_archive)?)
    }
}

/// Compatibility level from the tag's upstream version, falling back to
/// the harvested OpenSSL version for tags without one
pub fn compatibility_level(tag: &ReleaseTag, openssl_version: &str) -> BcrResult<u64> {
    let version = match tag.upstream() {
        Some(version) => version,
        None => openssl_version.parse::<UpstreamVersion>()?,
    };
    Ok(version.compatibility_level())
}

/// `relative path -> integrity` of every file under `overlay_dir`
///
/// Symlinks are hashed through to their targets.
fn overlay_integrities(overlay_dir: &Path) -> BcrResult<std::collections::BTreeMap<String, String>> {
    walk_tree(overlay_dir)?
        .into_iter()
        .map(|entry| {
            let hash = IntegrityHash::of_file(&entry.path)?;
            Ok((entry.relative_slash(), hash.to_string()))
        })
        .collect()
}
