//! Configuration management for scriptify

mod settings;
pub mod toolchain;

// Re-export main types
pub use settings::Config;
pub use toolchain::{ToolchainConfig, ToolchainKind};
