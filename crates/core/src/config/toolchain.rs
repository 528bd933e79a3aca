use serde::{Deserialize, Serialize};

use crate::command::{Compiler, GoBuild, Rustc};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolchainKind {
    #[default]
    Rustc,
    Go,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ToolchainConfig {
    #[serde(default)]
    pub kind: ToolchainKind,
    /// Compiler executable, when not the toolchain's usual name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    /// Rust edition passed to rustc; ignored by other toolchains
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_args: Option<Vec<String>>,
}

impl ToolchainConfig {
    pub fn compiler(&self) -> Box<dyn Compiler> {
        let extra_args = self.extra_args.clone().unwrap_or_default();
        match self.kind {
            ToolchainKind::Rustc => {
                let mut rustc = Rustc::new().with_extra_args(extra_args);
                if let Some(ref command) = self.command {
                    rustc = rustc.with_command(command);
                }
                if let Some(ref edition) = self.edition {
                    rustc = rustc.with_edition(edition);
                }
                Box::new(rustc)
            }
            ToolchainKind::Go => {
                let mut go = GoBuild::new().with_extra_args(extra_args);
                if let Some(ref command) = self.command {
                    go = go.with_command(command);
                }
                Box::new(go)
            }
        }
    }
}
