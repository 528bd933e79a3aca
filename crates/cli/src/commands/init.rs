use anyhow::{Context, Result, bail};
use scriptify_core::{Config, ScriptOptions};
use std::env;
use tracing::info;

use crate::cli::GlobalOptions;

pub fn init_command(force: bool, global: &GlobalOptions) -> Result<i32> {
    let cwd = env::current_dir().context("Failed to get current directory")?;
    let config_path = cwd.join(".scriptify.json");

    if config_path.exists() && !force {
        bail!(
            "Config already exists at {} (use --force to overwrite)",
            config_path.display()
        );
    }

    let mut config = Config {
        temp_root: Some(
            global
                .temp_root
                .clone()
                .unwrap_or_else(ScriptOptions::default_temp_root),
        ),
        ..Default::default()
    };
    if let Some(toolchain) = global.toolchain {
        config.toolchain.kind = toolchain.into();
    }

    config
        .save_to_file(&config_path)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    info!("Wrote {}", config_path.display());
    println!("Created config: {}", config_path.display());
    Ok(0)
}
