use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use scriptify_core::{ScriptTarget, config::ToolchainKind};
use std::path::PathBuf;

use crate::commands::{init_command, run_command};

#[derive(Parser, Debug)]
#[command(name = "scriptify")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every subcommand; they override the config file
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Directory compiled binaries are kept in
    #[arg(long, global = true, value_name = "DIR")]
    pub temp_root: Option<PathBuf>,

    /// Compiler used to build scripts
    #[arg(long, global = true, value_enum)]
    pub toolchain: Option<ToolchainArg>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolchainArg {
    Rustc,
    Go,
}

impl From<ToolchainArg> for ToolchainKind {
    fn from(arg: ToolchainArg) -> Self {
        match arg {
            ToolchainArg::Rustc => ToolchainKind::Rustc,
            ToolchainArg::Go => ToolchainKind::Go,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile and run one or more source files as a script
    #[command(visible_alias = "r")]
    Run {
        /// Source files, built together into one binary
        #[arg(required = true)]
        scripts: Vec<PathBuf>,

        /// Print the build plan without staging or building
        #[arg(short, long)]
        dry_run: bool,

        /// Print the dry-run plan as JSON
        #[arg(long, requires = "dry_run")]
        json: bool,

        /// Arguments passed to the script
        #[arg(last = true)]
        args: Vec<String>,
    },
    /// Compile and run a directory in place
    #[command(visible_alias = "d")]
    Dir {
        /// Directory to build
        dir: PathBuf,

        /// Print the build plan without building
        #[arg(short, long)]
        dry_run: bool,

        /// Print the dry-run plan as JSON
        #[arg(long, requires = "dry_run")]
        json: bool,

        /// Arguments passed to the program
        #[arg(last = true)]
        args: Vec<String>,
    },
    /// Run the first candidate that exists
    #[command(visible_alias = "f")]
    First {
        /// Candidates in priority order
        #[arg(required = true)]
        candidates: Vec<PathBuf>,

        /// Allow directories, and build the enclosing directory of a
        /// candidate found in a subdirectory
        #[arg(long)]
        dir: bool,

        /// Print the build plan without staging or building
        #[arg(short, long)]
        dry_run: bool,

        /// Print the dry-run plan as JSON
        #[arg(long, requires = "dry_run")]
        json: bool,

        /// Arguments passed to the script
        #[arg(last = true)]
        args: Vec<String>,
    },
    /// Write a default .scriptify.json in the current directory
    Init {
        /// Overwrite an existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

impl Commands {
    /// Execute the command, returning the process exit status
    pub fn execute(self, global: &GlobalOptions) -> Result<i32> {
        match self {
            Commands::Run {
                scripts,
                dry_run,
                json,
                args,
            } => run_command(ScriptTarget::Scripts(scripts), &args, dry_run, json, global),
            Commands::Dir {
                dir,
                dry_run,
                json,
                args,
            } => run_command(ScriptTarget::Directory(dir), &args, dry_run, json, global),
            Commands::First {
                candidates,
                dir,
                dry_run,
                json,
                args,
            } => {
                let target = if dir {
                    ScriptTarget::FirstFoundOrDirectory {
                        candidates,
                        use_directory: true,
                    }
                } else {
                    ScriptTarget::FirstFound(candidates)
                };
                run_command(target, &args, dry_run, json, global)
            }
            Commands::Init { force } => init_command(force, global),
        }
    }
}
