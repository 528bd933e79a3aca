pub mod outcome;
pub mod script_path;

// Re-export commonly used types
pub use outcome::{BuildOutcome, RunOutcome, Stage};
pub use script_path::{BuildTarget, ScriptPath};
