use anyhow::Result;
use scriptify_core::RunPlan;
use std::io::{self, Write};

/// Print a dry-run plan to stdout, as text or JSON.
pub fn print_plan(plan: &RunPlan, json: bool) -> Result<()> {
    let mut stdout = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut stdout, plan)?;
        writeln!(stdout)?;
    } else {
        write_plan(plan, &mut stdout)?;
    }
    Ok(())
}

pub fn write_plan(plan: &RunPlan, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "Binary:    {}", plan.target.binary_path.display())?;
    writeln!(out, "Hash:      {}", plan.target.hash)?;

    if let Some(ref dir) = plan.directory {
        writeln!(out, "Directory: {}", dir.display())?;
    }

    for source in &plan.sources {
        if source.needs_copy() {
            writeln!(
                out,
                "Source:    {} -> {}{}",
                source.original.display(),
                source.generated.display(),
                if source.clean { " (removed after build)" } else { "" }
            )?;
        } else {
            writeln!(out, "Source:    {}", source.original.display())?;
        }
    }
    Ok(())
}
