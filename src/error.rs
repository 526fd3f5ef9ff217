use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("cannot locate the home directory")]
    NoHomeDir,

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing `{0}` column in CSV header")]
    MissingColumn(&'static str),

    #[error("no prompts found in {}", .0.display())]
    EmptyCatalog(PathBuf),

    #[error("EDITOR is not set")]
    NoEditor,

    #[error("failed to launch editor: {0}")]
    EditorLaunch(#[source] io::Error),

    #[error("editor exited abnormally: {0}")]
    EditorStatus(ExitStatus),

    #[error("terminal error: {0}")]
    Terminal(#[source] io::Error),

    #[error("copy failed: {0}")]
    Clipboard(#[from] arboard::Error),
}

impl AppError {
    /// Errors that leave the previous catalog usable.
    pub(crate) fn is_recoverable(&self) -> bool {
        !matches!(self, AppError::NoHomeDir | AppError::Terminal(_))
    }
}
