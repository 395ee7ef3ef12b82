use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("failed to read {file}: {reason}")]
    Read { file: String, reason: String },
    #[error("failed to write {file}: {source}")]
    Write {
        file: String,
        #[source]
        source: std::io::Error,
    },
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

impl StoreError {
    pub fn validation(msg: impl Into<String>) -> Self { Self::Validation(msg.into()) }

    pub fn read(path: &Path, reason: impl std::fmt::Display) -> Self {
        Self::Read { file: file_label(path), reason: reason.to_string() }
    }

    pub fn write(path: &Path, source: std::io::Error) -> Self {
        Self::Write { file: file_label(path), source }
    }

    /// True for errors caused by the request itself rather than the disk.
    pub fn is_validation(&self) -> bool { matches!(self, Self::Validation(_)) }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
