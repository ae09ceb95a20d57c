use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure of a clean pass
///
/// `path` is `None` when the pass ran over a bare reader/writer (stdin,
/// stdout, in-memory buffers) rather than a named file.
#[derive(Error, Debug)]
pub enum CleanError {
    /// Source missing, unreadable, or not valid UTF-8
    #[error("input not readable{}", describe(.path))]
    InputNotReadable {
        path: Option<PathBuf>,
        #[source]
        source: io::Error,
    },
    /// Destination could not be created or written
    #[error("output not writable{}", describe(.path))]
    OutputNotWritable {
        path: Option<PathBuf>,
        #[source]
        source: io::Error,
    },
}

impl CleanError {
    pub(crate) fn input(path: Option<&Path>, source: io::Error) -> Self {
        CleanError::InputNotReadable {
            path: path.map(Path::to_path_buf),
            source,
        }
    }

    pub(crate) fn output(path: Option<&Path>, source: io::Error) -> Self {
        CleanError::OutputNotWritable {
            path: path.map(Path::to_path_buf),
            source,
        }
    }

    /// Attach a file path to an error raised over an anonymous stream
    pub(crate) fn at(self, input: &Path, output: &Path) -> Self {
        match self {
            CleanError::InputNotReadable { path: None, source } => {
                CleanError::input(Some(input), source)
            }
            CleanError::OutputNotWritable { path: None, source } => {
                CleanError::output(Some(output), source)
            }
            other => other,
        }
    }

    /// Underlying I/O error kind
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            CleanError::InputNotReadable { source, .. }
            | CleanError::OutputNotWritable { source, .. } => source.kind(),
        }
    }
}

fn describe(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!(" ({})", path.display()),
        None => String::new(),
    }
}
