//! In-process stand-ins for curl, Configure/make, tar and event reporting.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use bcr_openssl::domain::entities::SourceInfo;
use bcr_openssl::domain::ports::{
    Archiver, Arena, BuildToolchain, FetchedSource, ReleaseEvent, ReleaseEventSink, SourceFetcher,
};
use bcr_openssl::infrastructure::fs::walk_tree;
use bcr_openssl::{BcrResult, Platform};

pub fn source_info(version: &str) -> SourceInfo {
    SourceInfo {
        url: format!(
            "https://github.com/openssl/openssl/releases/download/openssl-{0}/openssl-{0}.tar.gz",
            version
        ),
        integrity: "sha256-47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU=".to_string(),
        strip_prefix: format!("openssl-{}", version),
    }
}

/// "Downloads" nothing and unpacks an empty source root
pub struct StubFetcher;

impl SourceFetcher for StubFetcher {
    fn fetch(&self, version: &str, staging: &Path) -> BcrResult<FetchedSource> {
        Ok(FetchedSource {
            archive: staging.join(format!("openssl-{}.tar.gz", version)),
            info: source_info(version),
        })
    }

    fn unpack(&self, source: &FetchedSource, dest: &Path) -> BcrResult<PathBuf> {
        let root = dest.join(&source.info.strip_prefix);
        fs::create_dir_all(&root)?;
        Ok(root)
    }
}

/// Writes the generated files a table says each platform produces
#[derive(Default)]
pub struct TableToolchain {
    pub outputs: BTreeMap<Platform, BTreeMap<String, String>>,
}

impl TableToolchain {
    pub fn with(mut self, platform: Platform, path: &str, content: &str) -> Self {
        self.outputs
            .entry(platform)
            .or_default()
            .insert(path.to_string(), content.to_string());
        self
    }
}

impl BuildToolchain for TableToolchain {
    fn configure(&self, _arena: &Arena) -> BcrResult<()> {
        Ok(())
    }

    fn generate(&self, arena: &Arena, _files: &[String]) -> BcrResult<()> {
        for (path, content) in self.outputs.get(&arena.platform).into_iter().flatten() {
            let target = arena.generated_path(path);
            fs::create_dir_all(target.parent().unwrap())?;
            fs::write(target, content)?;
        }
        Ok(())
    }

    fn extract_listing(&self, arena: &Arena) -> BcrResult<String> {
        let sep = if arena.platform.is_windows() { "\\" } else { "/" };
        Ok(format!(
            "LIBCRYPTO_SRCS = [\"crypto{sep}{}.c\"]\nLIBSSL_SRCS = [\"ssl{sep}ssl_lib.c\"]",
            arena.platform.arch()
        ))
    }
}

/// Captures what would be archived; the "archive" is the sorted file list
#[derive(Default)]
pub struct ListingArchiver {
    pub files: RefCell<Vec<String>>,
    pub staged: RefCell<BTreeMap<String, String>>,
}

impl Archiver for ListingArchiver {
    fn archive(&self, dir: &Path, files: &[String], output: &Path) -> BcrResult<()> {
        *self.files.borrow_mut() = files.to_vec();
        let mut staged = self.staged.borrow_mut();
        staged.clear();
        for entry in walk_tree(dir)? {
            let content = fs::read_to_string(&entry.path).unwrap_or_default();
            staged.insert(entry.relative_slash(), content);
        }
        fs::create_dir_all(output.parent().unwrap())?;
        fs::write(output, files.join("\n"))?;
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub events: RefCell<Vec<ReleaseEvent>>,
}

impl ReleaseEventSink for RecordingSink {
    fn on_event(&self, event: ReleaseEvent) {
        self.events.borrow_mut().push(event);
    }
}
