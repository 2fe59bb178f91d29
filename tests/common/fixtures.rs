//! Filesystem fixtures: templates directory and registry skeleton.

use std::fs;
use std::path::{Path, PathBuf};

use bcr_openssl::application::{
    ModuleSettings, ARCHIVE_TEMPLATES, OVERLAY_TEMPLATES, RELEASE_TEMPLATES,
};
use bcr_openssl::domain::services::BazelDep;

pub const PRESUBMIT_YML: &str = r#"matrix:
  platform: ["debian10", "macos", "ubuntu2004", "windows"]
  bazel: ["7.x"]
tasks:
  verify_targets:
    name: Verify build targets
    platform: ${{ platform }}
    bazel: ${{ bazel }}
    build_targets:
      - "@openssl//:openssl"
"#;

/// Write every template the packager copies into `<dir>/templates`
pub fn write_templates(dir: &Path) -> PathBuf {
    let root = dir.join("templates");
    fs::create_dir_all(&root).unwrap();
    for t in RELEASE_TEMPLATES
        .iter()
        .chain(OVERLAY_TEMPLATES)
        .chain(ARCHIVE_TEMPLATES)
    {
        let content = if t.source == "presubmit.yml" {
            PRESUBMIT_YML.to_string()
        } else {
            format!("# {}\n", t.source)
        };
        fs::write(root.join(t.source), content).unwrap();
    }
    root
}

/// `<dir>/bcr/modules/openssl/metadata.json` listing `versions`
pub fn write_registry(dir: &Path, versions: &[&str]) -> PathBuf {
    let bcr = dir.join("bcr");
    let module = bcr.join("modules/openssl");
    fs::create_dir_all(&module).unwrap();
    let doc = serde_json::json!({
        "homepage": "https://www.openssl.org",
        "maintainers": [],
        "repository": ["github:openssl/openssl"],
        "versions": versions,
        "yanked_versions": {},
    });
    fs::write(
        module.join("metadata.json"),
        serde_json::to_string_pretty(&doc).unwrap(),
    )
    .unwrap();
    bcr
}

pub fn module_settings(templates_dir: PathBuf) -> ModuleSettings {
    ModuleSettings {
        name: "openssl".to_string(),
        dependencies: vec![
            BazelDep::new("platforms", "0.0.10"),
            BazelDep::new("rules_cc", "0.0.13"),
            BazelDep::new("rules_perl", "0.2.4"),
        ],
        overlay_repo_name: "openssl-generated-overlay".to_string(),
        templates_dir,
    }
}
