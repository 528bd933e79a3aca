use std::fs::{self, File};
use std::io;
use std::path::Path;

use crate::error::{Error, Result};

/// What a `stat` of a path reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PathStatus {
    pub exists: bool,
    pub is_dir: bool,
}

/// Stat `path`, treating "not found" as a normal answer rather than an error.
pub fn exists(path: &Path) -> Result<PathStatus> {
    match fs::metadata(path) {
        Ok(metadata) => Ok(PathStatus {
            exists: true,
            is_dir: metadata.is_dir(),
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(PathStatus::default()),
        Err(e) => Err(Error::file(path, e)),
    }
}

/// Copy `src` byte for byte to `dst`, replacing `dst` if it exists.
pub fn copy_file(dst: &Path, src: &Path) -> Result<()> {
    let mut reader = File::open(src).map_err(|e| Error::file(src, e))?;
    let mut writer = File::create(dst).map_err(|e| Error::file(dst, e))?;
    io::copy(&mut reader, &mut writer).map_err(|e| Error::file(dst, e))?;
    Ok(())
}
