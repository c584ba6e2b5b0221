//! Harness errors
//!
//! Only fatal conditions are errors. A failing test case is a
//! [`Verdict`](crate::Verdict), never a `HarnessError`.

use std::fmt;
use std::path::{Path, PathBuf};

/// The kind of harness error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Test directory missing or unreadable
    DirectoryUnreadable,
    /// Target program could not be started
    Spawn,
    /// Golden file exists but could not be read
    GoldenRead,
    /// Golden file could not be written (override mode)
    GoldenWrite,
    /// The report sink rejected a write
    Report,
}

/// A fatal harness error, optionally tied to a path
#[derive(Debug)]
pub struct HarnessError {
    pub kind: ErrorKind,
    pub message: String,
    pub path: Option<PathBuf>,
}

impl HarnessError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            path: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn directory(dir: &Path, err: std::io::Error) -> Self {
        Self::new(ErrorKind::DirectoryUnreadable, format!("cannot read test directory: {}", err))
            .with_path(dir)
    }

    pub fn spawn(program: &Path, err: std::io::Error) -> Self {
        Self::new(ErrorKind::Spawn, format!("failed to execute target program: {}", err))
            .with_path(program)
    }

    pub fn golden_read(path: &Path, err: std::io::Error) -> Self {
        Self::new(ErrorKind::GoldenRead, format!("failed to read golden file: {}", err))
            .with_path(path)
    }

    pub fn golden_write(path: &Path, err: std::io::Error) -> Self {
        Self::new(ErrorKind::GoldenWrite, format!("failed to write golden file: {}", err))
            .with_path(path)
    }

    pub fn report(err: std::io::Error) -> Self {
        Self::new(ErrorKind::Report, format!("failed to write report: {}", err))
    }
}

impl fmt::Display for HarnessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: ", path.display())?;
        }
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for HarnessError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_path() {
        let err = HarnessError::spawn(
            Path::new("./forth"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory"),
        );
        assert_eq!(err.kind, ErrorKind::Spawn);
        assert_eq!(
            err.to_string(),
            "./forth: failed to execute target program: No such file or directory"
        );
    }

    #[test]
    fn test_display_without_path() {
        let err = HarnessError::report(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "broken pipe"));
        assert_eq!(err.kind, ErrorKind::Report);
        assert_eq!(err.to_string(), "failed to write report: broken pipe");
    }
}
