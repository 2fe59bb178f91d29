//! Scenario: Release assembled from a unix host and a windows host
//!
//! Journey: CI harvests the unix platforms on one machine and the windows
//! platforms on another, each writing a JSON bundle; a final job merges the
//! bundles and publishes.
//!
//! Success Criteria:
//! - Bundles survive a JSON round trip and merge into all six platforms
//! - A file that differs only on windows is platform-specific everywhere
//! - Windows listings get their backslashes doubled
//! - Hosts that harvested different file lists cannot be published together

use bcr_openssl::application::{HarvestOptions, HarvestUseCase, ReleaseOptions, ReleaseUseCase};
use bcr_openssl::domain::ports::{NoopEventSink, NoopFormatter};
use bcr_openssl::domain::services::to_json_indented;
use bcr_openssl::{BcrError, HarvestBundle, Platform, ReleaseTag};

use crate::common::*;

fn toolchain() -> TableToolchain {
    let mut toolchain = TableToolchain::default();
    for platform in Platform::ALL {
        let config = if platform.is_windows() {
            "#define OPENSSL_SYS_WIN64\n"
        } else {
            "#define OPENSSL_SYS_UNIX\n"
        };
        toolchain = toolchain
            .with(platform, "include/openssl/opensslv.h", "#define OPENSSL_VERSION_MAJOR 3\n")
            .with(platform, "include/openssl/configuration.h", config);
    }
    toolchain
}

fn generated_files() -> Vec<String> {
    vec![
        "include/openssl/configuration.h".to_string(),
        "include/openssl/opensslv.h".to_string(),
    ]
}

/// Harvest `platforms` as one host would, through a JSON bundle file
fn harvest_on_host(dir: &std::path::Path, host: &str, platforms: &[Platform]) -> HarvestBundle {
    harvest_files_on_host(dir, host, platforms, generated_files())
}

fn harvest_files_on_host(
    dir: &std::path::Path,
    host: &str,
    platforms: &[Platform],
    generated_files: Vec<String>,
) -> HarvestBundle {
    let bundle = HarvestUseCase::new(StubFetcher, toolchain())
        .execute(
            &HarvestOptions {
                openssl_version: "3.3.1".to_string(),
                platforms: platforms.to_vec(),
                generated_files,
                work_dir: dir.join(format!("work-{}", host)),
            },
            &NoopEventSink,
        )
        .unwrap();

    let path = dir.join(format!("{}.json", host));
    std::fs::write(&path, to_json_indented(&bundle, 2).unwrap()).unwrap();
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn scenario_unix_and_windows_bundles_combine() {
    let dir = tempfile::tempdir().unwrap();
    let templates = write_templates(dir.path());
    let bcr = write_registry(dir.path(), &["3.3.0.bcr.0"]);

    let mut bundle = harvest_on_host(dir.path(), "unix", &Platform::UNIX);
    let windows = harvest_on_host(dir.path(), "windows", &Platform::WINDOWS);
    bundle.merge(windows).unwrap();
    assert_eq!(bundle.built_platforms().len(), 6);

    let settings = module_settings(templates);
    let archiver = ListingArchiver::default();
    let report = ReleaseUseCase::new(&settings, &archiver, &NoopFormatter)
        .execute(
            &bundle,
            &ReleaseOptions {
                registry_dir: bcr.clone(),
                tag: ReleaseTag::new("3.3.1.bcr.0").unwrap(),
                overlay_archive: dir.path().join("dist/overlay.tar.gz"),
                overlay_url: "https://example.invalid/overlay.tar.gz".to_string(),
                generated_files: generated_files(),
            },
            &NoopEventSink,
        )
        .unwrap();

    assert_eq!((report.independent, report.specific), (1, 1));

    let staged = archiver.staged.borrow();
    assert!(staged.contains_key("include/openssl/opensslv.h"));
    assert!(!staged.contains_key("include/openssl/configuration.h"));

    let arm = &staged["constants-VC-WIN64-CLANGASM-ARM.bzl"];
    assert!(arm.contains("OPENSSL_SYS_WIN64"));
    assert!(arm.contains("LIBCRYPTO_SRCS = [\"crypto\\\\aarch64.c\"]"), "{}", arm);

    let linux = &staged["constants-linux-aarch64.bzl"];
    assert!(linux.contains("OPENSSL_SYS_UNIX"));
    assert!(linux.contains("LIBCRYPTO_SRCS = [\"crypto/aarch64.c\"]"));

    // 3.3.0.bcr.0 is not this tag's predecessor
    assert_eq!(report.dedup, None);
}

#[test]
fn scenario_overlapping_hosts_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut unix = harvest_on_host(dir.path(), "unix", &Platform::UNIX);
    let all = harvest_on_host(dir.path(), "all", &Platform::ALL);

    let err = unix.merge(all).unwrap_err();
    assert!(matches!(err, BcrError::BundleConflict { .. }));
}

#[test]
fn scenario_file_missing_from_one_host_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let templates = write_templates(dir.path());
    let bcr = write_registry(dir.path(), &[]);

    // The windows host was configured without configuration.h
    let mut bundle = harvest_on_host(dir.path(), "unix", &Platform::UNIX);
    let windows = harvest_files_on_host(
        dir.path(),
        "windows",
        &Platform::WINDOWS,
        vec!["include/openssl/opensslv.h".to_string()],
    );
    bundle.merge(windows).unwrap();

    let settings = module_settings(templates);
    let err = ReleaseUseCase::new(&settings, &ListingArchiver::default(), &NoopFormatter)
        .execute(
            &bundle,
            &ReleaseOptions {
                registry_dir: bcr.clone(),
                tag: ReleaseTag::new("3.3.1.bcr.0").unwrap(),
                overlay_archive: dir.path().join("dist/overlay.tar.gz"),
                overlay_url: "https://example.invalid/overlay.tar.gz".to_string(),
                generated_files: vec!["include/openssl/opensslv.h".to_string()],
            },
            &NoopEventSink,
        )
        .unwrap_err();

    match err.downcast_ref::<BcrError>() {
        Some(BcrError::MissingGeneratedFile { platform, path }) => {
            assert!(platform.is_windows());
            assert_eq!(path, "include/openssl/configuration.h");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(!bcr.join("modules/openssl/3.3.1.bcr.0").exists());
}
