//! External collaborators: the compiler toolchains and the process runner

pub mod compiler;
pub mod go;
pub mod process;
pub mod rustc;

// Re-export commonly used types
pub use compiler::{BuildInput, Compiler};
pub use go::GoBuild;
pub use process::{Input, Output, StdStreams, execute};
pub use rustc::Rustc;
