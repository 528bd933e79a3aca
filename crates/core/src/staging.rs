//! Staging: giving each source a name the compiler accepts, and deciding
//! where the binary goes

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{
    error::{Error, Result},
    types::{BuildTarget, ScriptPath},
    utils::{copy_file, exists, hash_parts},
};

/// Plans generated source paths for a given source extension.
#[derive(Debug, Clone)]
pub struct StagingPlanner {
    extension: String,
}

impl StagingPlanner {
    /// `extension` is the compiler's source extension, without the dot.
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
        }
    }

    /// Plan the generated path for one source.
    ///
    /// A source that already has the extension is used in place and never
    /// deleted. Otherwise the extension is appended; if that name is taken by
    /// an existing file, `<dir>/<hash>-<name>.<ext>` is used instead. If that
    /// is taken too, planning fails rather than overwrite someone's file.
    pub fn plan_single(&self, hash: &str, original: &Path) -> Result<ScriptPath> {
        if original.extension().and_then(|e| e.to_str()) == Some(self.extension.as_str()) {
            return Ok(ScriptPath {
                original: original.to_path_buf(),
                generated: original.to_path_buf(),
                clean: false,
            });
        }

        let mut generated = with_extension_appended(original, &self.extension);

        if exists(&generated)?.exists {
            let base = original
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let dir = original.parent().unwrap_or_else(|| Path::new(""));
            generated = dir.join(format!("{hash}-{base}.{}", self.extension));
            if exists(&generated)?.exists {
                return Err(Error::Validation(format!(
                    "cannot stage '{}': both {} and {} already exist",
                    original.display(),
                    with_extension_appended(original, &self.extension).display(),
                    generated.display()
                )));
            }
        }

        debug!(
            "Planned {} -> {}",
            original.display(),
            generated.display()
        );
        Ok(ScriptPath {
            original: original.to_path_buf(),
            generated,
            clean: true,
        })
    }

    /// Plan every source independently.
    pub fn plan_many(&self, hash: &str, originals: &[PathBuf]) -> Result<Vec<ScriptPath>> {
        originals
            .iter()
            .map(|original| self.plan_single(hash, original))
            .collect()
    }
}

fn with_extension_appended(path: &Path, extension: &str) -> PathBuf {
    let mut appended = OsString::from(path.as_os_str());
    appended.push(".");
    appended.push(extension);
    PathBuf::from(appended)
}

/// Derive the binary location for a set of sources (or a directory) run from
/// `working_dir`. The same inputs always map to the same path.
pub fn compute_build_target(
    sources_or_dir: &[PathBuf],
    working_dir: &Path,
    temp_root: &Path,
) -> Result<BuildTarget> {
    if sources_or_dir.is_empty() {
        return Err(Error::Validation("a source file is required".to_string()));
    }

    let mut parts: Vec<String> = sources_or_dir
        .iter()
        .map(|p| p.to_string_lossy().into_owned())
        .collect();
    parts.push(working_dir.to_string_lossy().into_owned());
    let hash = hash_parts(&parts);

    Ok(BuildTarget {
        binary_path: temp_root.join(&hash),
        hash,
    })
}

/// Copy each original to its generated location, skipping in-place sources.
pub fn copy_scripts(paths: &[ScriptPath]) -> Result<()> {
    for path in paths.iter().filter(|p| p.needs_copy()) {
        debug!(
            "Staging {} -> {}",
            path.original.display(),
            path.generated.display()
        );
        copy_file(&path.generated, &path.original)?;
    }
    Ok(())
}

/// Remove every generated path marked for cleaning.
pub fn clean_scripts(paths: &[ScriptPath]) -> Result<()> {
    for path in paths.iter().filter(|p| p.clean) {
        debug!("Removing staged source {}", path.generated.display());
        fs::remove_file(&path.generated).map_err(|e| Error::file(&path.generated, e))?;
    }
    Ok(())
}
