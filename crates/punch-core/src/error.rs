use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the punch-report pipeline.
#[derive(Error, Debug)]
pub enum PunchError {
    /// A source file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A source line did not split into the five expected tab-delimited fields.
    #[error("{path}:{line}: expected 5 tab-delimited fields, found {found}")]
    BadFieldCount {
        path: PathBuf,
        line: usize,
        found: usize,
    },

    /// A datetime field did not match any recognised device format.
    #[error("{path}:{line}: invalid timestamp \"{value}\"")]
    BadTimestamp {
        path: PathBuf,
        line: usize,
        value: String,
    },

    /// The given log folder does not exist or is not a directory.
    #[error("Log folder not found: {0}")]
    FolderNotFound(PathBuf),

    /// An error originating from the workbook writer.
    #[error("Workbook export failed: {0}")]
    Export(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the punch crates.
pub type Result<T> = std::result::Result<T, PunchError>;
