//! Domain Entities
//!
//! Mutable-during-collection, frozen-afterwards data of a release run.

mod content_map;
mod harvest;
mod run_state;

pub use content_map::GeneratedContentMap;
pub use harvest::{
    HarvestBundle, PlatformHarvest, SourceInfo, SourceListing, BUNDLE_FORMAT_VERSION,
    LISTING_VARIABLES,
};
pub use run_state::{RunProgress, RunStage};
