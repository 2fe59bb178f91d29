//! File System Helpers
//!
//! Local disk operations used while assembling and deduplicating release
//! trees.

mod local;
mod walk;

pub use local::{copy_file, make_executable, symlink_file, write_atomic};
pub use walk::{relative_path, to_slash, walk_tree, TreeEntry};
