//! Domain Layer
//!
//! Pure release logic without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - Content map, partition result, run stages, harvest bundle
//! - `value_objects/` - Platform matrix, integrity hashes, release tags
//! - `services/` - Partitioner and manifest rendering
//! - `ports/` - Interfaces for the external collaborators (toolchain, tar, ...)
//!
//! Nothing in here spawns processes; file reads happen only through the
//! hashing helpers, which take an explicit path or reader.

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
