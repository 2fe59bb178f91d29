//! Application Layer
//!
//! Use cases that orchestrate a release run.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `HarvestUseCase` - Fetch, build every selected platform, collect outputs
//! - `PackageUseCase` - Write the release tree and the overlay archive
//! - `ReleaseUseCase` - Partition, package, deduplicate, update metadata
//!
//! ## Services
//!
//! - `deduplicate` - Link unchanged files to the previous tag
//! - `add_version` - Record a tag in the registry metadata

pub mod dedup;
pub mod harvest;
pub mod metadata;
pub mod package;
pub mod release;

pub use dedup::{deduplicate, previous_tag_dir, DedupReport};
pub use harvest::{HarvestOptions, HarvestUseCase};
pub use metadata::{add_version, METADATA_FILE};
pub use package::{
    compatibility_level, ModuleSettings, PackageReport, PackageRequest, PackageUseCase, Template,
    ARCHIVE_TEMPLATES, OVERLAY_TEMPLATES, RELEASE_TEMPLATES,
};
pub use release::{ReleaseOptions, ReleaseReport, ReleaseUseCase};
