use serde::Serialize;
use std::path::PathBuf;

/// One staged source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptPath {
    /// The path as supplied by the caller
    pub original: PathBuf,
    /// The path handed to the compiler, always carrying its source extension
    pub generated: PathBuf,
    /// True when `generated` was synthesized and must be removed after the build
    pub clean: bool,
}

impl ScriptPath {
    pub fn needs_copy(&self) -> bool {
        self.original != self.generated
    }
}

/// Where the compiled binary goes, and the identity it was derived from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildTarget {
    pub binary_path: PathBuf,
    pub hash: String,
}
