//! Target program execution
//!
//! Runs the program under test once per case, with the case's source file
//! as its only argument, and captures everything it writes.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use crate::discovery::case_path;
use crate::error::HarnessError;

/// What one run of the target program produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Captured standard output, compared against the golden file
    pub stdout: Vec<u8>,
    /// Captured standard error, only used for diagnostics
    pub stderr: Vec<u8>,
    /// Exit code, `None` if the process was terminated by a signal
    pub exit_code: Option<i32>,
}

impl ExecutionResult {
    /// Whether the process exited with code 0
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Exit code for display; `signal` when there is none
    pub fn exit_display(&self) -> String {
        match self.exit_code {
            Some(code) => code.to_string(),
            None => "signal".to_string(),
        }
    }
}

/// Invokes the target program
#[derive(Debug, Clone)]
pub struct Executor {
    program: PathBuf,
}

impl Executor {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Run the program on `<dir>/<id>.<source_ext>` and wait for it.
    ///
    /// Stdin is closed. A non-zero exit is returned as data, not as an
    /// error; only failing to start the program is an error.
    pub fn run(&self, dir: &Path, id: &OsStr, source_ext: &str) -> Result<ExecutionResult, HarnessError> {
        let source = case_path(dir, id, source_ext);
        tracing::debug!(program = %self.program.display(), source = %source.display(), "executing");

        let output = Command::new(&self.program)
            .arg(&source)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| HarnessError::spawn(&self.program, e))?;

        let result = ExecutionResult {
            stdout: output.stdout,
            stderr: output.stderr,
            exit_code: output.status.code(),
        };
        tracing::debug!(
            id = %id.to_string_lossy(),
            exit = %result.exit_display(),
            stdout_bytes = result.stdout.len(),
            stderr_bytes = result.stderr.len(),
            "finished"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::fs;

    #[test]
    fn test_exit_display() {
        let mut result = ExecutionResult {
            stdout: Vec::new(),
            stderr: Vec::new(),
            exit_code: Some(3),
        };
        assert!(!result.success());
        assert_eq!(result.exit_display(), "3");
        result.exit_code = None;
        assert_eq!(result.exit_display(), "signal");
    }

    #[cfg(unix)]
    #[test]
    fn test_run_captures_stdout_bytes() {
        let tmp = tempfile::tempdir().unwrap();
        let bytes = b"1 2 + .\r\n\xff\x00trailing  ".to_vec();
        fs::write(tmp.path().join("raw.fth"), &bytes).unwrap();

        let result = Executor::new("cat").run(tmp.path(), OsStr::new("raw"), "fth").unwrap();
        assert_eq!(result.stdout, bytes);
        assert!(result.stderr.is_empty());
        assert!(result.success());
    }

    #[cfg(unix)]
    #[test]
    fn test_run_reports_nonzero_exit() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(
            tmp.path().join("fail.fth"),
            "echo partial\necho oops >&2\nexit 7\n",
        )
        .unwrap();

        let result = Executor::new("sh").run(tmp.path(), OsStr::new("fail"), "fth").unwrap();
        assert_eq!(result.exit_code, Some(7));
        assert_eq!(result.stdout, b"partial\n");
        assert_eq!(result.stderr, b"oops\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_run_stdin_is_closed() {
        let tmp = tempfile::tempdir().unwrap();
        // `cat` with no arguments reads stdin; it must see EOF immediately.
        fs::write(tmp.path().join("stdin.fth"), "cat\necho done\n").unwrap();

        let result = Executor::new("sh").run(tmp.path(), OsStr::new("stdin"), "fth").unwrap();
        assert_eq!(result.stdout, b"done\n");
    }

    #[test]
    fn test_run_missing_program_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("a.fth"), "").unwrap();

        let err = Executor::new(tmp.path().join("no-such-interpreter"))
            .run(tmp.path(), OsStr::new("a"), "fth")
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Spawn);
    }
}
