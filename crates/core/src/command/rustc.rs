use std::path::Path;
use std::process::Command;

use crate::{
    command::compiler::{BuildInput, Compiler, run_compiler},
    error::{Error, Result},
};

const DIRECTORY_ROOT: &str = "main.rs";

/// Builds scripts with `rustc`.
///
/// rustc takes a single crate root, so a file build accepts exactly one
/// source and a directory build compiles the directory's `main.rs`.
#[derive(Debug, Clone)]
pub struct Rustc {
    command: String,
    edition: String,
    extra_args: Vec<String>,
}

impl Default for Rustc {
    fn default() -> Self {
        Self {
            command: "rustc".to_string(),
            edition: "2021".to_string(),
            extra_args: Vec::new(),
        }
    }
}

impl Rustc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    pub fn with_edition(mut self, edition: impl Into<String>) -> Self {
        self.edition = edition.into();
        self
    }

    pub fn with_extra_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }

    fn crate_root(&self, input: BuildInput<'_>) -> Result<std::path::PathBuf> {
        match input {
            BuildInput::Files(sources) => {
                self.check_sources(sources)?;
                if sources.len() > 1 {
                    return Err(Error::Validation(format!(
                        "rustc builds a single crate root, got {} sources",
                        sources.len()
                    )));
                }
                Ok(sources[0].clone())
            }
            BuildInput::Directory(dir) => {
                let root = dir.join(DIRECTORY_ROOT);
                if !root.is_file() {
                    return Err(Error::Validation(format!(
                        "directory '{}' has no {DIRECTORY_ROOT}",
                        dir.display()
                    )));
                }
                Ok(root)
            }
        }
    }
}

impl Compiler for Rustc {
    fn language(&self) -> &str {
        "rust"
    }

    fn extension(&self) -> &str {
        "rs"
    }

    fn directory_root(&self) -> Option<&str> {
        Some(DIRECTORY_ROOT)
    }

    fn compile(&self, output: &Path, input: BuildInput<'_>) -> Result<()> {
        let root = self.crate_root(input)?;

        let mut cmd = Command::new(&self.command);
        cmd.arg("--edition")
            .arg(&self.edition)
            .arg("-o")
            .arg(output)
            .arg(&root)
            .args(&self.extra_args);

        run_compiler(cmd, &self.command)
    }
}
