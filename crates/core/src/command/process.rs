//! Running a built binary with the caller's standard streams

use std::io::{self, Read, Write};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;

use tracing::{debug, warn};

use crate::{
    error::{Error, Result},
    utils::exists,
};

/// Where the child's stdin comes from
pub enum Input<'a> {
    /// Share this process's stdin
    Inherit,
    /// Empty stdin
    Null,
    /// Feed the child from a reader
    Reader(&'a mut (dyn Read + Send)),
}

/// Where one of the child's output streams goes
pub enum Output<'a> {
    /// Share this process's stream
    Inherit,
    /// Discard everything
    Null,
    /// Copy the child's bytes into a writer
    Writer(&'a mut (dyn Write + Send)),
}

impl Input<'_> {
    fn stdio(&self) -> Stdio {
        match self {
            Input::Inherit => Stdio::inherit(),
            Input::Null => Stdio::null(),
            Input::Reader(_) => Stdio::piped(),
        }
    }
}

impl Output<'_> {
    fn stdio(&self) -> Stdio {
        match self {
            Output::Inherit => Stdio::inherit(),
            Output::Null => Stdio::null(),
            Output::Writer(_) => Stdio::piped(),
        }
    }
}

/// The three streams handed to a script
pub struct StdStreams<'a> {
    pub stdin: Input<'a>,
    pub stdout: Output<'a>,
    pub stderr: Output<'a>,
}

impl StdStreams<'_> {
    /// The hosting process's own stdin, stdout and stderr
    pub fn inherit() -> Self {
        Self {
            stdin: Input::Inherit,
            stdout: Output::Inherit,
            stderr: Output::Inherit,
        }
    }

    /// No input, all output discarded
    pub fn null() -> Self {
        Self {
            stdin: Input::Null,
            stdout: Output::Null,
            stderr: Output::Null,
        }
    }
}

impl Default for StdStreams<'_> {
    fn default() -> Self {
        Self::inherit()
    }
}

/// Run `binary` with `args`, wiring the given streams, and return its exit status.
///
/// A missing binary is an error reported before anything is spawned, so that
/// "nothing to run" is never confused with "ran and failed". A non-zero exit
/// of the program is returned as `Ok(code)`. Once the program has started,
/// a failing output writer is logged and the rest of that stream discarded;
/// the program's status is still returned.
pub fn execute(binary: &Path, args: &[String], streams: StdStreams<'_>) -> Result<i32> {
    if !exists(binary)?.exists {
        return Err(Error::Execution(format!(
            "binary not found: {}",
            binary.display()
        )));
    }

    let StdStreams {
        stdin,
        stdout,
        stderr,
    } = streams;

    let mut cmd = Command::new(binary);
    cmd.args(args)
        .stdin(stdin.stdio())
        .stdout(stdout.stdio())
        .stderr(stderr.stdio());

    debug!("Executing: {:?}", cmd);
    let mut child = cmd.spawn().map_err(|e| {
        Error::Execution(format!("failed to start {}: {}", binary.display(), e))
    })?;

    let status = forward_and_wait(&mut child, stdin, stdout, stderr)
        .map_err(|e| Error::file(binary, e))?;

    exit_code(binary, status)
}

fn forward_and_wait(
    child: &mut Child,
    stdin: Input<'_>,
    stdout: Output<'_>,
    stderr: Output<'_>,
) -> io::Result<ExitStatus> {
    let child_stdin = child.stdin.take();
    let child_stdout = child.stdout.take();
    let child_stderr = child.stderr.take();

    thread::scope(|s| {
        if let (Some(mut pipe), Input::Reader(reader)) = (child_stdin, stdin) {
            s.spawn(move || {
                // The child may exit without draining stdin; a broken pipe
                // here is not a failure of the run.
                let _ = io::copy(reader, &mut pipe);
            });
        }

        let out = match (child_stdout, stdout) {
            (Some(pipe), Output::Writer(writer)) => Some(s.spawn(move || pump(pipe, writer))),
            _ => None,
        };
        let err = match (child_stderr, stderr) {
            (Some(pipe), Output::Writer(writer)) => Some(s.spawn(move || pump(pipe, writer))),
            _ => None,
        };

        let status = child.wait()?;

        for handle in [out, err].into_iter().flatten() {
            if handle.join().is_err() {
                warn!("Stream forwarding thread panicked");
            }
        }

        Ok(status)
    })
}

/// Copy a child stream into `to`. On failure the remaining output is drained
/// so the child never blocks on a full pipe or dies on a closed one.
fn pump(mut from: impl Read, to: &mut (dyn Write + Send)) {
    let copied = io::copy(&mut from, to).and_then(|_| to.flush());
    if let Err(e) = copied {
        warn!("Failed to forward script output: {}", e);
        let _ = io::copy(&mut from, &mut io::sink());
    }
}

fn exit_code(binary: &Path, status: ExitStatus) -> Result<i32> {
    if let Some(code) = status.code() {
        return Ok(code);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return Err(Error::Execution(format!(
                "{} was terminated by signal {}",
                binary.display(),
                signal
            )));
        }
    }

    Err(Error::Execution(format!(
        "could not determine the exit status of {}",
        binary.display()
    )))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn script(dir: &TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn test_returns_exit_status() {
        let dir = TempDir::new().unwrap();
        let bin = script(&dir, "exit15", "exit 15");
        assert_eq!(execute(&bin, &[], StdStreams::null()).unwrap(), 15);
    }

    #[test]
    fn test_passes_args() {
        let dir = TempDir::new().unwrap();
        let bin = script(&dir, "exitarg", "exit \"$1\"");
        let code = execute(&bin, &["25".to_string()], StdStreams::null()).unwrap();
        assert_eq!(code, 25);
    }

    #[test]
    fn test_forwards_stdout_and_stderr_verbatim() {
        let dir = TempDir::new().unwrap();
        let bin = script(
            &dir,
            "exit15",
            "printf 'STDOUT: Exiting 15'\nprintf 'STDERR: Exiting 15' >&2\nexit 15",
        );

        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = execute(
            &bin,
            &[],
            StdStreams {
                stdin: Input::Null,
                stdout: Output::Writer(&mut out),
                stderr: Output::Writer(&mut err),
            },
        )
        .unwrap();

        assert_eq!(code, 15);
        assert_eq!(out, b"STDOUT: Exiting 15");
        assert_eq!(err, b"STDERR: Exiting 15");
    }

    #[test]
    fn test_forwards_stdin() {
        let dir = TempDir::new().unwrap();
        let bin = script(&dir, "echoinput", "printf 'Echoing '\ncat");

        let mut input: &[u8] = b"Writing to STDIN";
        let mut out = Vec::new();
        execute(
            &bin,
            &[],
            StdStreams {
                stdin: Input::Reader(&mut input),
                stdout: Output::Writer(&mut out),
                stderr: Output::Null,
            },
        )
        .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "Echoing Writing to STDIN");
    }

    struct ClosedWriter;

    impl Write for ClosedWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_failing_output_writer_keeps_the_exit_status() {
        let dir = TempDir::new().unwrap();
        let bin = script(
            &dir,
            "chatty",
            "i=0\nwhile [ $i -lt 2000 ]; do echo line $i; i=$((i+1)); done\nexit 7",
        );

        let mut closed = ClosedWriter;
        let code = execute(
            &bin,
            &[],
            StdStreams {
                stdin: Input::Null,
                stdout: Output::Writer(&mut closed),
                stderr: Output::Null,
            },
        )
        .unwrap();

        assert_eq!(code, 7);
    }

    #[test]
    fn test_missing_binary_fails_before_spawning() {
        let dir = TempDir::new().unwrap();
        let err = execute(&dir.path().join("nope"), &[], StdStreams::null()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Execution);
        assert_eq!(err.exit_code(), 0);
    }

    #[test]
    fn test_signal_is_an_error_not_a_status() {
        let dir = TempDir::new().unwrap();
        let bin = script(&dir, "killself", "kill -9 $$");
        let err = execute(&bin, &[], StdStreams::null()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Execution);
        assert!(err.to_string().contains("signal 9"), "{err}");
    }
}
