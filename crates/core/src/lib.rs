//! scriptify - compile and run loose source files as scripts
//!
//! This crate provides functionality to:
//! - Resolve which candidate script (or directory) to run
//! - Stage sources under names the compiler accepts, at a build location
//!   derived from a hash of the inputs
//! - Build with an external compiler, clean up, and run the binary while
//!   forwarding stdio and the exit status
pub mod command;
pub mod config;
pub mod entry;
pub mod error;
pub mod resolver;
pub mod runner;
pub mod staging;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{Error, ErrorKind, Result};
pub use types::*;

// Re-export main API components
pub use command::{BuildInput, Compiler, GoBuild, Input, Output, Rustc, StdStreams};
pub use config::Config;
pub use resolver::ScriptResolver;
pub use runner::{Orchestrator, RunPlan, ScriptOptions, ScriptTarget};
pub use staging::StagingPlanner;
