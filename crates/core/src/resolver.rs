//! Picking which script to run from a prioritized list of candidates

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{
    error::{Error, Result},
    utils::exists,
};

/// A resolved candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub path: PathBuf,
    pub is_dir: bool,
}

/// Finds the first existing candidate, in the caller's priority order.
///
/// On case-insensitive filesystems two differently cased candidates may both
/// match the same file; the first one listed wins.
#[derive(Debug, Clone)]
pub struct ScriptResolver {
    extension: String,
    directory_root: Option<String>,
}

impl ScriptResolver {
    /// `extension` is the compiler's source extension, without the dot.
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            directory_root: None,
        }
    }

    /// Only accept `root` as the file that selects a subdirectory build, for
    /// compilers that build a directory from one fixed file.
    pub fn with_directory_root(mut self, root: Option<&str>) -> Self {
        self.directory_root = root.map(str::to_string);
        self
    }

    /// First candidate that exists and is not a directory.
    ///
    /// Candidates are looked up relative to `working_dir` and returned as
    /// given.
    pub fn find_first_existing(
        &self,
        candidates: &[PathBuf],
        working_dir: &Path,
    ) -> Result<PathBuf> {
        for candidate in candidates {
            let status = exists(&working_dir.join(candidate))?;
            if status.exists && !status.is_dir {
                debug!("Resolved script: {}", candidate.display());
                return Ok(candidate.clone());
            }
        }
        Err(Error::NotFound {
            candidates: candidates.to_vec(),
        })
    }

    /// First candidate that exists, where a candidate may be a directory.
    ///
    /// Candidates are looked up relative to `working_dir`. With
    /// `use_directory`, a file inside a subdirectory resolves to that
    /// subdirectory so the whole directory is built; such a file must carry
    /// the compiler's extension (and be the directory root, when one is set),
    /// since any other file would be ignored by the compiler. Files directly
    /// in `working_dir` are returned as files.
    pub fn find_first_existing_or_directory(
        &self,
        candidates: &[PathBuf],
        use_directory: bool,
        working_dir: &Path,
    ) -> Result<Resolved> {
        for candidate in candidates {
            let full = working_dir.join(candidate);
            let status = exists(&full)?;
            if !status.exists {
                continue;
            }

            if status.is_dir || !use_directory {
                debug!(
                    "Resolved {}: {}",
                    if status.is_dir { "directory" } else { "script" },
                    candidate.display()
                );
                return Ok(Resolved {
                    path: candidate.clone(),
                    is_dir: status.is_dir,
                });
            }

            if is_directly_in(&full, working_dir) {
                debug!("Resolved script: {}", candidate.display());
                return Ok(Resolved {
                    path: candidate.clone(),
                    is_dir: false,
                });
            }

            if full.extension().and_then(|e| e.to_str()) != Some(self.extension.as_str()) {
                return Err(Error::Validation(format!(
                    "'{}' is in a subdirectory and must have the .{} extension to build its directory",
                    candidate.display(),
                    self.extension
                )));
            }

            if let Some(root) = &self.directory_root {
                if full.file_name().and_then(|n| n.to_str()) != Some(root.as_str()) {
                    return Err(Error::Validation(format!(
                        "'{}' is in a subdirectory but a directory build compiles {root}; name it {}",
                        candidate.display(),
                        candidate.with_file_name(root).display()
                    )));
                }
            }

            let dir = candidate
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            debug!(
                "Resolved directory {} from {}",
                dir.display(),
                candidate.display()
            );
            return Ok(Resolved {
                path: dir,
                is_dir: true,
            });
        }

        Err(Error::NotFound {
            candidates: candidates.to_vec(),
        })
    }
}

/// Whether `file` sits directly inside `dir`, not in a subdirectory of it.
fn is_directly_in(file: &Path, dir: &Path) -> bool {
    let Some(parent) = file.parent() else {
        return true;
    };
    match (fs::canonicalize(parent), fs::canonicalize(dir)) {
        (Ok(parent), Ok(dir)) => parent == dir,
        _ => parent == dir,
    }
}
