//! Filesystem and hashing helpers shared by the pipeline stages

pub mod fs;
pub mod hash;

pub use fs::{PathStatus, copy_file, exists};
pub use hash::hash_parts;
