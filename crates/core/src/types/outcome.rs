use std::fmt;
use std::path::PathBuf;

use crate::error::{Error, ErrorKind};

/// Pipeline stages, in the order a run walks through them
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Resolving,
    Staging,
    Building,
    CleaningUp,
    Executing,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Resolving => "resolving",
            Stage::Staging => "staging",
            Stage::Building => "building",
            Stage::CleaningUp => "cleaning up",
            Stage::Executing => "executing",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Result of the building stage
#[derive(Debug)]
pub enum BuildOutcome {
    Success(PathBuf),
    Failure(Error),
}

impl BuildOutcome {
    /// The compiler's exit status on a compile failure, 0 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            BuildOutcome::Success(_) => 0,
            BuildOutcome::Failure(err) => err.exit_code(),
        }
    }

    pub fn into_result(self) -> Result<PathBuf, Error> {
        match self {
            BuildOutcome::Success(binary) => Ok(binary),
            BuildOutcome::Failure(err) => Err(err),
        }
    }
}

/// What one pipeline run produced.
///
/// `error` is only set for pipeline failures (resolve, stage, build, cleanup,
/// or a binary that could not be started). A program that ran and exited
/// non-zero reports that status through `exit_code` with no error.
#[derive(Debug)]
pub struct RunOutcome {
    pub exit_code: i32,
    pub error: Option<Error>,
    /// The stage the run stopped in; `Stage::Done` when it completed.
    pub stage: Stage,
}

impl RunOutcome {
    pub fn completed(exit_code: i32) -> Self {
        Self {
            exit_code,
            error: None,
            stage: Stage::Done,
        }
    }

    pub fn failed(stage: Stage, error: Error) -> Self {
        Self {
            exit_code: error.exit_code(),
            error: Some(error),
            stage,
        }
    }

    pub fn failed_stage(&self) -> Option<Stage> {
        self.error.as_ref().map(|_| self.stage)
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error.as_ref().map(Error::kind)
    }

    /// Exit status for the hosting process. A pipeline failure never maps to
    /// 0, even when the failure itself carries no status.
    pub fn process_exit_code(&self) -> i32 {
        match (&self.error, self.exit_code) {
            (Some(_), 0) => 1,
            (_, code) => code,
        }
    }
}
