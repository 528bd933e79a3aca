use anyhow::{Context, Result};
use scriptify_core::{Orchestrator, ScriptOptions, ScriptTarget, entry::report};
use std::env;
use std::io;
use tracing::debug;

use crate::cli::GlobalOptions;
use crate::config::load_config;
use crate::display::print_plan;

pub fn run_command(
    target: ScriptTarget,
    args: &[String],
    dry_run: bool,
    json: bool,
    global: &GlobalOptions,
) -> Result<i32> {
    let cwd = env::current_dir().context("Failed to get current directory")?;
    let config = load_config(&cwd, global)?;
    let temp_root = config.temp_root();

    debug!("Running {:?} with temp root {}", target, temp_root.display());

    let orchestrator = Orchestrator::new(config.toolchain.compiler());

    if dry_run {
        let plan = orchestrator
            .plan(&target, &cwd, &cwd.join(&temp_root))
            .context("Failed to plan the build")?;
        print_plan(&plan, json)?;
        return Ok(0);
    }

    let options = ScriptOptions::new(temp_root).with_working_dir(cwd);
    let outcome = orchestrator.run(&target, args, options);
    Ok(report(&outcome, &mut io::stderr()))
}
