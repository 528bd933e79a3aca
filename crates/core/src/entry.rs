//! Process-level entry points.
//!
//! These run the pipeline with default options (the default temp root, rustc,
//! and this process's stdio), pass along this process's own arguments, report
//! any pipeline failure on stderr, and exit. Use [`Orchestrator::run`] to get
//! a [`RunOutcome`] back instead.

use std::io::{self, Write};
use std::path::PathBuf;

use crate::{
    error::Error,
    runner::{Orchestrator, ScriptOptions, ScriptTarget},
    types::RunOutcome,
};

/// Compile and run a single script file, then exit.
pub fn run_script(path: impl Into<PathBuf>) -> ! {
    run_and_exit(ScriptTarget::Scripts(vec![path.into()]))
}

/// Compile and run a directory, then exit.
pub fn run_directory(path: impl Into<PathBuf>) -> ! {
    run_and_exit(ScriptTarget::Directory(path.into()))
}

/// Run the first candidate file that exists, then exit.
pub fn run_first_found<I, P>(candidates: I) -> !
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    run_and_exit(ScriptTarget::FirstFound(
        candidates.into_iter().map(Into::into).collect(),
    ))
}

/// Run the first candidate file or directory that exists, then exit.
///
/// With `use_directory`, a matching file inside a subdirectory builds that
/// whole subdirectory, so `tools/tools.rs` can select the `tools` package.
pub fn run_first_found_or_directory<I, P>(use_directory: bool, candidates: I) -> !
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    run_and_exit(ScriptTarget::FirstFoundOrDirectory {
        candidates: candidates.into_iter().map(Into::into).collect(),
        use_directory,
    })
}

/// Write the user-facing message for a failed run and return the process
/// exit status for `outcome`.
pub fn report(outcome: &RunOutcome, stderr: &mut dyn Write) -> i32 {
    if let Some(ref err) = outcome.error {
        let _ = match err {
            Error::Compile { message, .. } => write!(stderr, "Build error:\n\n{message}"),
            other => writeln!(stderr, "Fatal: {other}"),
        };
    }
    outcome.process_exit_code()
}

fn run_and_exit(target: ScriptTarget) -> ! {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let orchestrator: Orchestrator = Orchestrator::default();
    let outcome = orchestrator.run(&target, &args, ScriptOptions::default());
    let code = report(&outcome, &mut io::stderr());
    std::process::exit(code)
}
