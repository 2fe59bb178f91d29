//! Scenario: Follow-up registry release of the same OpenSSL version
//!
//! Journey: `3.3.1.bcr.0` is already in the registry; the maintainer
//! republishes the same sources as `3.3.1.bcr.1`.
//!
//! Success Criteria:
//! - Files identical to `3.3.1.bcr.0` become relative links into it
//! - `MODULE.bazel` and `source.json` (which name the tag) stay real files
//! - The previous tree is never modified
//! - metadata.json lists both tags

use std::fs;
use std::path::{Path, PathBuf};

use bcr_openssl::application::{ReleaseOptions, ReleaseReport, ReleaseUseCase};
use bcr_openssl::domain::entities::PlatformHarvest;
use bcr_openssl::domain::ports::{NoopEventSink, NoopFormatter};
use bcr_openssl::{HarvestBundle, Platform, ReleaseTag};

use crate::common::*;

fn bundle() -> HarvestBundle {
    let mut bundle = HarvestBundle::new("3.3.1", source_info("3.3.1"));
    for platform in Platform::UNIX {
        let mut harvest = PlatformHarvest::default();
        harvest
            .generated
            .insert("include/x.h".to_string(), "#define X 1\n".to_string());
        harvest
            .generated
            .insert("y.c".to_string(), format!("/* {} */\n", platform));
        bundle.insert(platform, harvest).unwrap();
    }
    bundle
}

fn release(dir: &Path, bcr: &Path, tag: &str) -> ReleaseReport {
    let settings = module_settings(dir.join("templates"));
    let options = ReleaseOptions {
        registry_dir: bcr.to_path_buf(),
        tag: ReleaseTag::new(tag).unwrap(),
        overlay_archive: dir.join(format!("dist/{}.tar.gz", tag)),
        overlay_url: format!("https://example.invalid/{}.tar.gz", tag),
        generated_files: vec!["include/x.h".to_string(), "y.c".to_string()],
    };
    ReleaseUseCase::new(&settings, &ListingArchiver::default(), &NoopFormatter)
        .execute(&bundle(), &options, &NoopEventSink)
        .unwrap()
}

#[test]
fn scenario_follow_up_release_links_unchanged_files() {
    let dir = tempfile::tempdir().unwrap();
    write_templates(dir.path());
    let bcr = write_registry(dir.path(), &[]);
    let module_dir = bcr.join("modules/openssl");

    let first = release(dir.path(), &bcr, "3.3.1.bcr.0");
    assert_eq!(first.dedup, None);

    let second = release(dir.path(), &bcr, "3.3.1.bcr.1");
    let dedup = second.dedup.expect("previous tag exists");

    assert_eq!(
        dedup.linked,
        vec![
            PathBuf::from("overlay/BUILD.bazel"),
            PathBuf::from("overlay/test_bazel_build/BUILD.bazel"),
            PathBuf::from("overlay/utils.bzl"),
            PathBuf::from("presubmit.yml"),
        ]
    );
    assert_eq!(
        dedup.kept,
        vec![PathBuf::from("MODULE.bazel"), PathBuf::from("source.json")]
    );

    let current = module_dir.join("3.3.1.bcr.1");
    assert_eq!(
        fs::read_link(current.join("presubmit.yml")).unwrap(),
        PathBuf::from("../3.3.1.bcr.0/presubmit.yml")
    );
    assert_eq!(
        fs::read_link(current.join("overlay/test_bazel_build/BUILD.bazel")).unwrap(),
        PathBuf::from("../../../3.3.1.bcr.0/overlay/test_bazel_build/BUILD.bazel")
    );
    // Links resolve to the same bytes
    assert_eq!(
        fs::read_to_string(current.join("presubmit.yml")).unwrap(),
        PRESUBMIT_YML
    );

    // Previous tree untouched
    let previous = module_dir.join("3.3.1.bcr.0");
    for file in ["presubmit.yml", "overlay/BUILD.bazel", "MODULE.bazel"] {
        let meta = fs::symlink_metadata(previous.join(file)).unwrap();
        assert!(meta.file_type().is_file(), "{} became a link", file);
    }
    // The overlay's MODULE.bazel link was left alone
    assert_eq!(
        fs::read_link(current.join("overlay/MODULE.bazel")).unwrap(),
        PathBuf::from("../MODULE.bazel")
    );

    let metadata: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(module_dir.join("metadata.json")).unwrap())
            .unwrap();
    assert_eq!(
        metadata["versions"],
        serde_json::json!(["3.3.1.bcr.0", "3.3.1.bcr.1"])
    );
}

#[test]
fn scenario_republishing_an_existing_tag_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    write_templates(dir.path());
    let bcr = write_registry(dir.path(), &[]);
    release(dir.path(), &bcr, "3.3.1.bcr.0");

    let settings = module_settings(dir.path().join("templates"));
    let options = ReleaseOptions {
        registry_dir: bcr.clone(),
        tag: ReleaseTag::new("3.3.1.bcr.0").unwrap(),
        overlay_archive: dir.path().join("dist/again.tar.gz"),
        overlay_url: String::new(),
        generated_files: vec![],
    };
    let err = ReleaseUseCase::new(&settings, &ListingArchiver::default(), &NoopFormatter)
        .execute(&bundle(), &options, &NoopEventSink)
        .unwrap_err();

    assert!(format!("{:#}", err).contains("already exists"));
}
