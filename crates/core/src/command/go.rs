use std::path::Path;
use std::process::Command;

use crate::{
    command::compiler::{BuildInput, Compiler, run_compiler},
    error::{Error, Result},
};

/// Builds scripts with `go build`
#[derive(Debug, Clone)]
pub struct GoBuild {
    command: String,
    extra_args: Vec<String>,
}

impl Default for GoBuild {
    fn default() -> Self {
        Self {
            command: "go".to_string(),
            extra_args: Vec::new(),
        }
    }
}

impl GoBuild {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    pub fn with_extra_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }
}

impl Compiler for GoBuild {
    fn language(&self) -> &str {
        "go"
    }

    fn extension(&self) -> &str {
        "go"
    }

    fn compile(&self, output: &Path, input: BuildInput<'_>) -> Result<()> {
        let mut cmd = Command::new(&self.command);
        cmd.arg("build").args(&self.extra_args).arg("-o");

        match input {
            BuildInput::Files(sources) => {
                self.check_sources(sources)?;
                cmd.arg(output).args(sources);
            }
            BuildInput::Directory(dir) => {
                // The package is built from inside the directory, so the
                // output must not depend on the child's working dir.
                let output = std::path::absolute(output).map_err(|e| Error::file(output, e))?;
                cmd.arg(output).current_dir(dir);
            }
        }

        run_compiler(cmd, &self.command)
    }
}
