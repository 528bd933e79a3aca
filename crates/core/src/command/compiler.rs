//! The compile step: a toolchain that turns staged sources into a binary

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{Error, Result};

/// What to hand the compiler
#[derive(Debug, Clone, Copy)]
pub enum BuildInput<'a> {
    /// Individual source files, all carrying the toolchain's extension
    Files(&'a [PathBuf]),
    /// A directory built in place
    Directory(&'a Path),
}

/// A toolchain able to build a script into a binary
pub trait Compiler {
    /// Language token used in messages, e.g. `rust`
    fn language(&self) -> &str;

    /// Required source extension, without the leading dot
    fn extension(&self) -> &str;

    /// Build `input` into the binary at `output`.
    ///
    /// A non-zero compiler exit is reported as [`Error::Compile`] carrying the
    /// compiler's status and its diagnostic stream verbatim.
    fn compile(&self, output: &Path, input: BuildInput<'_>) -> Result<()>;

    /// File name a directory build compiles from, when the toolchain reads a
    /// single fixed file rather than every source in the directory
    fn directory_root(&self) -> Option<&str> {
        None
    }

    fn has_extension(&self, path: &Path) -> bool {
        path.extension().and_then(|e| e.to_str()) == Some(self.extension())
    }

    /// Reject sources the compiler would not accept, before spawning it.
    fn check_sources(&self, sources: &[PathBuf]) -> Result<()> {
        if sources.is_empty() {
            return Err(Error::Validation("a source file is required".to_string()));
        }
        if let Some(bad) = sources.iter().find(|s| !self.has_extension(s)) {
            return Err(Error::Validation(format!(
                "source must have {} extension (.{}): {}",
                self.language(),
                self.extension(),
                bad.display()
            )));
        }
        Ok(())
    }
}

impl<C: Compiler + ?Sized> Compiler for Box<C> {
    fn language(&self) -> &str {
        (**self).language()
    }

    fn extension(&self) -> &str {
        (**self).extension()
    }

    fn directory_root(&self) -> Option<&str> {
        (**self).directory_root()
    }

    fn compile(&self, output: &Path, input: BuildInput<'_>) -> Result<()> {
        (**self).compile(output, input)
    }
}

/// Run a compiler command, keeping its stderr for the error report.
pub(crate) fn run_compiler(mut cmd: Command, program: &str) -> Result<()> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped());

    debug!("Running compiler: {:?}", cmd);
    let output = cmd.output().map_err(|source| Error::SpawnError {
        program: program.to_string(),
        source,
    })?;

    if output.status.success() {
        return Ok(());
    }

    match output.status.code() {
        Some(exit_code) => Err(Error::Compile {
            exit_code,
            message: String::from_utf8_lossy(&output.stderr).into_owned(),
        }),
        None => Err(Error::Execution(format!(
            "{program} exited without a status ({})",
            output.status
        ))),
    }
}
