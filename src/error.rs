// Error types shared by the parser, emitter and router.
// Fatal errors abort the run; the rest are reported per statement.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("open {}: {source}", path.display())]
    OpenInput { path: PathBuf, source: io::Error },

    #[error("mkdir {}: {source}", path.display())]
    CreateOutputDir { path: PathBuf, source: io::Error },

    #[error("open {}: {source}", path.display())]
    CreateOutputFile { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("failed to serialize record: {0}")]
    Json(#[from] serde_json::Error),

    #[error("refusing to read a dump from an interactive terminal; pass --file or pipe input")]
    InteractiveStdin,

    #[error("malformed INSERT statement: {0}")]
    MalformedStatement(String),

    #[error("tuple {tuple}: wrong number of fields (expected {expected}, got {found})")]
    FieldCount {
        tuple: usize,
        expected: usize,
        found: usize,
    },

    #[error("tuple {tuple}: {reason}")]
    TupleParse { tuple: usize, reason: String },
}

impl ConvertError {
    // I/O conditions end the run; statement-level problems only skip the statement.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            ConvertError::MalformedStatement(_)
                | ConvertError::FieldCount { .. }
                | ConvertError::TupleParse { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
