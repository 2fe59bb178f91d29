//! Domain Services
//!
//! Stateless functions over domain entities.

pub mod manifest;
pub mod partitioner;

pub use manifest::{
    render_common, render_constants, render_module, render_source_json, to_json_indented,
    ArchiveRef, BazelDep, ModuleDescriptor,
};
pub use partitioner::{partition, PartitionResult};
