//! Manifest rendering
//!
//! Text of every file handed to the registry: `MODULE.bazel`, the per-platform
//! constants files, `common.bzl` and `source.json`.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::domain::entities::{SourceInfo, SourceListing};
use crate::domain::value_objects::{IntegrityHash, Platform};
use crate::error::BcrResult;

/// A pinned `bazel_dep`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, serde::Deserialize)]
pub struct BazelDep {
    pub name: String,
    pub version: String,
}

impl BazelDep {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// Overlay archive referenced from `MODULE.bazel`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveRef {
    pub repo_name: String,
    pub url: String,
    pub integrity: IntegrityHash,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDescriptor {
    pub name: String,
    pub version: String,
    pub compatibility_level: u64,
    pub dependencies: Vec<BazelDep>,
    pub overlay: Option<ArchiveRef>,
}

pub fn render_module(module: &ModuleDescriptor) -> String {
    let mut out = format!(
        "module(\n    name = \"{}\",\n    version = \"{}\",\n    compatibility_level = {},\n)\n",
        module.name, module.version, module.compatibility_level
    );

    if !module.dependencies.is_empty() {
        out.push('\n');
        for dep in &module.dependencies {
            out.push_str(&format!(
                "bazel_dep(name = \"{}\", version = \"{}\")\n",
                dep.name, dep.version
            ));
        }
    }

    if let Some(overlay) = &module.overlay {
        out.push_str(
            "\nhttp_archive = use_repo_rule(\"@bazel_tools//tools/build_defs/repo:http.bzl\", \"http_archive\")\n",
        );
        out.push_str(&format!(
            "\nhttp_archive(\n    name = \"{}\",\n    integrity = \"{}\",\n    url = \"{}\",\n)\n",
            overlay.repo_name, overlay.integrity, overlay.url
        ));
    }

    out
}

/// `constants-<platform>.bzl`
pub fn render_constants(
    platform: Platform,
    openssl_version: &str,
    listing: &SourceListing,
    generated: &BTreeMap<String, String>,
) -> BcrResult<String> {
    Ok(format!(
        "# Generated code. DO NOT EDIT.\n\nPLATFORM = \"{}\"\nOPENSSL_VERSION = \"{}\"\n\n{}\n\nGEN_FILES = {}\n",
        platform,
        openssl_version,
        listing.render(platform),
        to_json_indented(generated, 4)?,
    ))
}

/// `common.bzl`, listing the files shipped once for every platform
pub fn render_common(independent: &BTreeSet<String>) -> String {
    let items: Vec<String> = independent.iter().map(|p| json_string(p)).collect();
    format!("COMMON_GENERATED_FILES = [{}]\n", items.join(", "))
}

/// `source.json` for the registry entry
pub fn render_source_json(
    source: &SourceInfo,
    overlay: &BTreeMap<String, String>,
) -> BcrResult<String> {
    #[derive(Serialize)]
    struct SourceJson<'a> {
        integrity: &'a str,
        overlay: &'a BTreeMap<String, String>,
        strip_prefix: &'a str,
        url: &'a str,
    }

    let doc = SourceJson {
        integrity: &source.integrity,
        overlay,
        strip_prefix: &source.strip_prefix,
        url: &source.url,
    };
    Ok(format!("{}\n", to_json_indented(&doc, 4)?))
}

/// Pretty JSON with an explicit indent width
pub fn to_json_indented<T: Serialize + ?Sized>(value: &T, indent: usize) -> BcrResult<String> {
    let indent = " ".repeat(indent);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    // serde_json only emits UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn json_string(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}
