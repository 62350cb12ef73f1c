use std::path::PathBuf;
use thiserror::Error;

/// Zone conversion errors.
///
/// Only conditions that abort a whole file conversion live here; malformed
/// individual records are logged and skipped by the parser instead.
#[derive(Error, Debug)]
pub enum ZoneError {
    #[error("failed to read zone file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no $ORIGIN specified and none detected in the file")]
    NoOrigin,

    #[error("file already processed: {0}")]
    AlreadyProcessed(PathBuf),

    #[error("$INCLUDE cycle detected at {0}")]
    IncludeCycle(PathBuf),

    #[error("$INCLUDE nesting deeper than {0} levels")]
    IncludeDepthExceeded(usize),

    #[error("failed to serialize zone configuration: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write output file {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ZoneError>;
