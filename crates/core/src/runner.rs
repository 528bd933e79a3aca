//! Sequences a run: resolve, stage, build, clean up, execute

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::{
    command::{BuildInput, Compiler, Rustc, StdStreams, execute},
    error::{Error, Result},
    resolver::ScriptResolver,
    staging::{StagingPlanner, clean_scripts, compute_build_target, copy_scripts},
    types::{BuildOutcome, BuildTarget, RunOutcome, ScriptPath, Stage},
};

/// What the caller asked to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptTarget {
    /// One or more source files built together
    Scripts(Vec<PathBuf>),
    /// A directory built in place
    Directory(PathBuf),
    /// The first existing file among the candidates
    FirstFound(Vec<PathBuf>),
    /// The first existing file or directory among the candidates; see
    /// [`ScriptResolver::find_first_existing_or_directory`]
    FirstFoundOrDirectory {
        candidates: Vec<PathBuf>,
        use_directory: bool,
    },
}

/// Options for a single run
pub struct ScriptOptions<'a> {
    /// Where binaries are written; relative paths are taken from `working_dir`
    pub temp_root: PathBuf,
    /// Directory the run is identified by; the process's current directory
    /// when unset
    pub working_dir: Option<PathBuf>,
    pub streams: StdStreams<'a>,
}

impl<'a> ScriptOptions<'a> {
    pub fn new(temp_root: impl Into<PathBuf>) -> Self {
        Self {
            temp_root: temp_root.into(),
            working_dir: None,
            streams: StdStreams::inherit(),
        }
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn with_streams(mut self, streams: StdStreams<'a>) -> Self {
        self.streams = streams;
        self
    }

    /// `<system temp>/scriptify`
    pub fn default_temp_root() -> PathBuf {
        std::env::temp_dir().join("scriptify")
    }
}

impl Default for ScriptOptions<'_> {
    fn default() -> Self {
        Self::new(Self::default_temp_root())
    }
}

/// Everything a run will touch, computed without side effects
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunPlan {
    pub target: BuildTarget,
    /// Staged sources for a file build; empty for a directory build
    pub sources: Vec<ScriptPath>,
    /// The directory for a directory build
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

/// Drives the pipeline with a given compiler
pub struct Orchestrator<C: Compiler = Rustc> {
    compiler: C,
    resolver: ScriptResolver,
    planner: StagingPlanner,
}

impl Default for Orchestrator<Rustc> {
    fn default() -> Self {
        Self::new(Rustc::default())
    }
}

impl<C: Compiler> Orchestrator<C> {
    pub fn new(compiler: C) -> Self {
        let extension = compiler.extension().to_string();
        Self {
            resolver: ScriptResolver::new(extension.clone())
                .with_directory_root(compiler.directory_root()),
            planner: StagingPlanner::new(extension),
            compiler,
        }
    }

    pub fn compiler(&self) -> &C {
        &self.compiler
    }

    /// Run `target` with `args`.
    ///
    /// Pipeline failures come back in `RunOutcome::error` together with the
    /// stage they happened in. A program that ran reports its own exit status
    /// with no error, whatever that status is.
    pub fn run(&self, target: &ScriptTarget, args: &[String], options: ScriptOptions<'_>) -> RunOutcome {
        let mut stage = Stage::Resolving;
        match self.run_stages(target, args, options, &mut stage) {
            Ok(exit_code) => {
                debug!("Run finished with exit status {}", exit_code);
                RunOutcome::completed(exit_code)
            }
            Err(err) => {
                warn!("Run failed while {}: {}", stage, err);
                RunOutcome::failed(stage, err)
            }
        }
    }

    /// Resolve and plan `target` without writing anything.
    pub fn plan(&self, target: &ScriptTarget, working_dir: &Path, temp_root: &Path) -> Result<RunPlan> {
        let mut stage = Stage::Resolving;
        self.plan_stages(target, working_dir, temp_root, &mut stage)
    }

    /// Build `input` into `target`'s binary.
    pub fn build(&self, target: &BuildTarget, input: BuildInput<'_>) -> BuildOutcome {
        debug!("Building {}", target.binary_path.display());
        match self.compiler.compile(&target.binary_path, input) {
            Ok(()) => BuildOutcome::Success(target.binary_path.clone()),
            Err(err) => BuildOutcome::Failure(err),
        }
    }

    fn plan_stages(
        &self,
        target: &ScriptTarget,
        working_dir: &Path,
        temp_root: &Path,
        stage: &mut Stage,
    ) -> Result<RunPlan> {
        *stage = Stage::Resolving;
        let (path_or_sources, is_dir) = self.resolve(target, working_dir)?;

        *stage = Stage::Staging;
        let target = compute_build_target(&path_or_sources, working_dir, temp_root)?;

        if is_dir {
            return Ok(RunPlan {
                target,
                sources: Vec::new(),
                directory: Some(working_dir.join(&path_or_sources[0])),
            });
        }

        let sources: Vec<PathBuf> = path_or_sources.iter().map(|s| working_dir.join(s)).collect();
        let sources = self.planner.plan_many(&target.hash, &sources)?;
        Ok(RunPlan {
            target,
            sources,
            directory: None,
        })
    }

    fn resolve(&self, target: &ScriptTarget, working_dir: &Path) -> Result<(Vec<PathBuf>, bool)> {
        let resolved = match target {
            ScriptTarget::Scripts(scripts) => (scripts.clone(), false),
            ScriptTarget::Directory(dir) => (vec![dir.clone()], true),
            ScriptTarget::FirstFound(candidates) => (
                vec![self.resolver.find_first_existing(candidates, working_dir)?],
                false,
            ),
            ScriptTarget::FirstFoundOrDirectory {
                candidates,
                use_directory,
            } => {
                let found = self.resolver.find_first_existing_or_directory(
                    candidates,
                    *use_directory,
                    working_dir,
                )?;
                (vec![found.path], found.is_dir)
            }
        };

        for path in &resolved.0 {
            info!(
                "Resolved {} {}",
                if resolved.1 { "directory" } else { "script" },
                path.display()
            );
        }
        Ok(resolved)
    }

    fn run_stages(
        &self,
        target: &ScriptTarget,
        args: &[String],
        options: ScriptOptions<'_>,
        stage: &mut Stage,
    ) -> Result<i32> {
        let working_dir = match options.working_dir {
            Some(dir) => dir,
            None => std::env::current_dir()?,
        };
        let temp_root = working_dir.join(&options.temp_root);

        let plan = self.plan_stages(target, &working_dir, &temp_root, stage)?;

        // Staging
        fs::create_dir_all(&temp_root).map_err(|e| Error::file(&temp_root, e))?;
        copy_scripts(&plan.sources)?;

        *stage = Stage::Building;
        let generated: Vec<PathBuf> = plan.sources.iter().map(|s| s.generated.clone()).collect();
        let input = match &plan.directory {
            Some(dir) => BuildInput::Directory(dir),
            None => BuildInput::Files(&generated),
        };
        // Staged sources are left behind when the build fails.
        let binary = self.build(&plan.target, input).into_result()?;

        *stage = Stage::CleaningUp;
        clean_scripts(&plan.sources)?;

        *stage = Stage::Executing;
        info!("Running {}", binary.display());
        execute(&binary, args, options.streams)
    }
}
