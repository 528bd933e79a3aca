use anyhow::{Context, Result};
use scriptify_core::Config;
use std::path::Path;

use crate::cli::GlobalOptions;

/// Load the nearest config file above `cwd` and apply command-line overrides.
pub fn load_config(cwd: &Path, global: &GlobalOptions) -> Result<Config> {
    let mut config = Config::discover(cwd).context("Failed to load configuration")?;

    if let Some(ref temp_root) = global.temp_root {
        config.temp_root = Some(temp_root.clone());
    }
    if let Some(toolchain) = global.toolchain {
        config.toolchain.kind = toolchain.into();
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ToolchainArg;
    use scriptify_core::config::ToolchainKind;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_flags_override_config_file() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join(".scriptify.json"),
            r#"{ "temp_root": "/from/file", "toolchain": { "kind": "go", "command": "go1.22" } }"#,
        )
        .unwrap();

        let global = GlobalOptions {
            temp_root: Some(PathBuf::from("/from/flag")),
            toolchain: Some(ToolchainArg::Rustc),
            verbose: false,
        };
        let config = load_config(temp_dir.path(), &global).unwrap();

        assert_eq!(config.temp_root(), PathBuf::from("/from/flag"));
        assert_eq!(config.toolchain.kind, ToolchainKind::Rustc);
        assert_eq!(config.toolchain.command.as_deref(), Some("go1.22"));
    }

    #[test]
    fn test_file_values_apply_without_flags() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join("scriptify.json"),
            r#"{ "temp_root": "bin" }"#,
        )
        .unwrap();

        let config = load_config(temp_dir.path(), &GlobalOptions::default()).unwrap();
        assert_eq!(config.temp_root(), PathBuf::from("bin"));
    }
}
