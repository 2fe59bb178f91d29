//! Scenario: First release of a new OpenSSL version
//!
//! Journey: A maintainer publishes `3.3.1.bcr.0` from a unix host.
//!
//! Steps:
//! 1. Four unix platforms are built; `x.h` comes out identical everywhere,
//!    `y.c` differs on one platform
//! 2. The release is partitioned, packaged and recorded in the registry
//!
//! Success Criteria:
//! - `x.h` ships once in the overlay archive, `y.c` lives in the constants
//! - Windows constants exist with empty listings and empty `y.c`
//! - No previous tag, so nothing is deduplicated

use std::fs;

use bcr_openssl::application::{HarvestOptions, HarvestUseCase, ReleaseOptions, ReleaseUseCase};
use bcr_openssl::domain::ports::{NoopFormatter, ReleaseEvent};
use bcr_openssl::{Platform, ReleaseTag, RunStage};

use crate::common::*;

fn toolchain() -> TableToolchain {
    let mut toolchain = TableToolchain::default();
    for platform in Platform::UNIX {
        let y = if platform == Platform::LinuxX86_64Clang {
            "int y = 2;\n"
        } else {
            "int y = 1;\n"
        };
        toolchain = toolchain
            .with(platform, "include/x.h", "#define X 1\n")
            .with(platform, "y.c", y);
    }
    toolchain
}

fn generated_files() -> Vec<String> {
    vec!["include/x.h".to_string(), "y.c".to_string()]
}

#[test]
fn scenario_four_platform_first_release() {
    let dir = tempfile::tempdir().unwrap();
    let templates = write_templates(dir.path());
    let bcr = write_registry(dir.path(), &[]);
    let sink = RecordingSink::default();

    // Step 1: harvest the unix matrix
    let bundle = HarvestUseCase::new(StubFetcher, toolchain())
        .execute(
            &HarvestOptions {
                openssl_version: "3.3.1".to_string(),
                platforms: Platform::UNIX.to_vec(),
                generated_files: generated_files(),
                work_dir: dir.path().join("work"),
            },
            &sink,
        )
        .unwrap();
    assert_eq!(bundle.platforms.len(), 4);

    // Step 2: publish
    let settings = module_settings(templates);
    let archiver = ListingArchiver::default();
    let options = ReleaseOptions {
        registry_dir: bcr.clone(),
        tag: ReleaseTag::new("3.3.1.bcr.0").unwrap(),
        overlay_archive: dir.path().join("dist/bazel-openssl-cc-3.3.1.bcr.0.tar.gz"),
        overlay_url: "https://github.com/raccoons-build/bazel-openssl-cc/releases/download/3.3.1.bcr.0/bazel-openssl-cc-3.3.1.bcr.0.tar.gz".to_string(),
        generated_files: generated_files(),
    };
    let report = ReleaseUseCase::new(&settings, &archiver, &NoopFormatter)
        .execute(&bundle, &options, &sink)
        .unwrap();

    assert_eq!(report.independent, 1);
    assert_eq!(report.specific, 1);
    assert_eq!(report.dedup, None);

    // Independent content ships once; specific content lives in constants
    let staged = archiver.staged.borrow();
    assert_eq!(staged["include/x.h"], "#define X 1\n");
    assert!(!staged.contains_key("y.c"));
    assert_eq!(staged["common.bzl"], "COMMON_GENERATED_FILES = [\"include/x.h\"]\n");

    let clang = &staged["constants-linux-x86_64-clang.bzl"];
    assert!(clang.contains("PLATFORM = \"linux-x86_64-clang\""));
    assert!(clang.contains("\"y.c\": \"int y = 2;\\n\""));
    assert!(clang.contains("LIBCRYPTO_SRCS = [\"crypto/x86_64.c\"]"));

    let darwin = &staged["constants-darwin64-arm64-cc.bzl"];
    assert!(darwin.contains("\"y.c\": \"int y = 1;\\n\""));

    // Windows was not built on this host
    let windows = &staged["constants-VC-WIN64A-masm.bzl"];
    assert!(windows.contains("LIBCRYPTO_SRCS = []"));
    assert!(windows.contains("\"y.c\": \"\""));

    // Registry entry
    let out_dir = bcr.join("modules/openssl/3.3.1.bcr.0");
    assert_eq!(report.out_dir, out_dir);
    let module = fs::read_to_string(out_dir.join("MODULE.bazel")).unwrap();
    assert!(module.contains("version = \"3.3.1.bcr.0\""));
    assert!(module.contains("bazel_dep(name = \"rules_perl\", version = \"0.2.4\")"));
    assert!(module.contains("name = \"openssl-generated-overlay\""));
    assert_eq!(
        fs::read_to_string(out_dir.join("presubmit.yml")).unwrap(),
        PRESUBMIT_YML
    );

    let metadata: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(bcr.join("modules/openssl/metadata.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(metadata["versions"], serde_json::json!(["3.3.1.bcr.0"]));

    // Stages were entered in order
    let stages: Vec<RunStage> = sink
        .events
        .borrow()
        .iter()
        .filter_map(|e| match e {
            ReleaseEvent::StageEntered { stage } => Some(*stage),
            _ => None,
        })
        .collect();
    assert_eq!(
        stages,
        vec![RunStage::Partitioned, RunStage::Packaged, RunStage::Done]
    );
}

#[test]
fn scenario_missing_generated_file_aborts_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let bcr = write_registry(dir.path(), &[]);

    // darwin64-x86_64-cc never produces y.c
    let mut toolchain = toolchain();
    toolchain
        .outputs
        .get_mut(&Platform::DarwinX86_64)
        .unwrap()
        .remove("y.c");

    let err = HarvestUseCase::new(StubFetcher, toolchain)
        .execute(
            &HarvestOptions {
                openssl_version: "3.3.1".to_string(),
                platforms: Platform::UNIX.to_vec(),
                generated_files: generated_files(),
                work_dir: dir.path().join("work"),
            },
            &RecordingSink::default(),
        )
        .unwrap_err();

    let message = format!("{:#}", err);
    assert!(message.contains("darwin64-x86_64-cc"), "{}", message);
    assert!(message.contains("y.c"), "{}", message);
    assert!(!bcr.join("modules/openssl/3.3.1.bcr.0").exists());
}
