//! End-to-end runs of the pipeline against the real rustc

use scriptify_core::{
    BuildInput, Compiler, ErrorKind, Input, Orchestrator, Output, Rustc, ScriptOptions,
    ScriptTarget, Stage, StdStreams,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// A scratch working directory holding copies of the named fixtures.
fn workspace(fixtures: &[&str]) -> TempDir {
    let work = TempDir::new().unwrap();
    for name in fixtures {
        let dst = work.path().join(name);
        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::copy(fixture(name), dst).unwrap();
    }
    work
}

#[test]
fn test_runs_script_and_forwards_streams_and_status() {
    let work = workspace(&["exit15.rs"]);
    let bin = TempDir::new().unwrap();
    let orchestrator: Orchestrator = Orchestrator::default();

    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let options = ScriptOptions::new(bin.path())
        .with_working_dir(work.path())
        .with_streams(StdStreams {
            stdin: Input::Null,
            stdout: Output::Writer(&mut stdout),
            stderr: Output::Writer(&mut stderr),
        });

    let outcome = orchestrator.run(
        &ScriptTarget::Scripts(vec![PathBuf::from("exit15.rs")]),
        &[],
        options,
    );

    assert!(outcome.error.is_none(), "{:?}", outcome.error);
    assert_eq!(outcome.exit_code, 15);
    assert_eq!(outcome.stage, Stage::Done);
    assert_eq!(stdout, b"STDOUT: Exiting 15");
    assert_eq!(stderr, b"STDERR: Exiting 15");
    // The caller's file is never cleaned up.
    assert!(work.path().join("exit15.rs").exists());
}

#[test]
fn test_runs_script_without_extension_next_to_existing_source() {
    let work = workspace(&["exit15", "exit15.rs"]);
    let bin = TempDir::new().unwrap();
    let original_rs = fs::read(work.path().join("exit15.rs")).unwrap();
    let orchestrator: Orchestrator = Orchestrator::default();

    let target = ScriptTarget::Scripts(vec![PathBuf::from("exit15")]);
    let plan = orchestrator.plan(&target, work.path(), bin.path()).unwrap();
    let staged = plan.sources[0].generated.clone();
    assert_ne!(staged, work.path().join("exit15.rs"));
    assert!(plan.sources[0].clean);

    let outcome = orchestrator.run(
        &target,
        &[],
        ScriptOptions::new(bin.path())
            .with_working_dir(work.path())
            .with_streams(StdStreams::null()),
    );

    assert!(outcome.error.is_none(), "{:?}", outcome.error);
    assert_eq!(outcome.exit_code, 15);
    assert!(!staged.exists(), "staged source should be removed");
    assert_eq!(fs::read(work.path().join("exit15.rs")).unwrap(), original_rs);
    assert!(plan.target.binary_path.exists(), "binary stays as a cache");
}

#[test]
fn test_syntax_error_is_a_compile_error() {
    let work = workspace(&["synerr.rs"]);
    let bin = TempDir::new().unwrap();
    let orchestrator: Orchestrator = Orchestrator::default();

    let outcome = orchestrator.run(
        &ScriptTarget::Scripts(vec![PathBuf::from("synerr.rs")]),
        &[],
        ScriptOptions::new(bin.path())
            .with_working_dir(work.path())
            .with_streams(StdStreams::null()),
    );

    assert_eq!(outcome.error_kind(), Some(ErrorKind::Compile));
    assert_eq!(outcome.failed_stage(), Some(Stage::Building));
    assert_ne!(outcome.exit_code, 0);
    let message = outcome.error.unwrap().to_string();
    assert!(message.contains("expected expression"), "{message}");
}

#[test]
fn test_source_without_extension_is_rejected_before_compiling() {
    let bin = TempDir::new().unwrap();
    let output = bin.path().join("out");
    let err = Rustc::new()
        .compile(&output, BuildInput::Files(&[fixture("exit15")]))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.to_string().contains("extension"));
    assert!(err.to_string().contains("rust"));
    assert!(!output.exists());
}

#[test]
fn test_repeat_runs_reuse_the_binary_path() {
    let work = workspace(&["exit15.rs"]);
    let bin = TempDir::new().unwrap();
    let orchestrator: Orchestrator = Orchestrator::default();
    let target = ScriptTarget::Scripts(vec![PathBuf::from("exit15.rs")]);

    let first = orchestrator.plan(&target, work.path(), bin.path()).unwrap();
    for _ in 0..2 {
        let outcome = orchestrator.run(
            &target,
            &[],
            ScriptOptions::new(bin.path())
                .with_working_dir(work.path())
                .with_streams(StdStreams::null()),
        );
        assert!(outcome.error.is_none(), "{:?}", outcome.error);
        assert_eq!(outcome.exit_code, 15);
    }
    let second = orchestrator.plan(&target, work.path(), bin.path()).unwrap();

    assert_eq!(first.target, second.target);
    let binaries: Vec<_> = fs::read_dir(bin.path()).unwrap().collect();
    assert_eq!(binaries.len(), 1);
}

#[test]
fn test_subdirectory_candidate_builds_its_directory() {
    let work = workspace(&["pkg/main.rs"]);
    let bin = TempDir::new().unwrap();
    let orchestrator: Orchestrator = Orchestrator::default();

    let mut stdin: &[u8] = b"hello";
    let mut stdout = Vec::new();
    let options = ScriptOptions::new(bin.path())
        .with_working_dir(work.path())
        .with_streams(StdStreams {
            stdin: Input::Reader(&mut stdin),
            stdout: Output::Writer(&mut stdout),
            stderr: Output::Null,
        });

    let outcome = orchestrator.run(
        &ScriptTarget::FirstFoundOrDirectory {
            candidates: vec![PathBuf::from("Pkg/main.rs"), PathBuf::from("pkg/main.rs")],
            use_directory: true,
        },
        &["a".to_string(), "b".to_string()],
        options,
    );

    assert!(outcome.error.is_none(), "{:?}", outcome.error);
    assert_eq!(outcome.exit_code, 2);
    assert_eq!(String::from_utf8(stdout).unwrap(), "args=a,b stdin=hello");
}

#[test]
fn test_first_found_prefers_earlier_candidates() {
    let work = workspace(&["exit15.rs", "synerr.rs"]);
    let bin = TempDir::new().unwrap();
    let orchestrator: Orchestrator = Orchestrator::default();

    let outcome = orchestrator.run(
        &ScriptTarget::FirstFound(vec![
            PathBuf::from("missing.rs"),
            PathBuf::from("exit15.rs"),
            PathBuf::from("synerr.rs"),
        ]),
        &[],
        ScriptOptions::new(bin.path())
            .with_working_dir(work.path())
            .with_streams(StdStreams::null()),
    );

    assert!(outcome.error.is_none(), "{:?}", outcome.error);
    assert_eq!(outcome.exit_code, 15);
}
