// src/utils/error.rs
use thiserror::Error;

// Define specific error types for the collaborators around the ranking core.
// The core itself (normalize, segment, score, rank, validate) never fails.
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("PDF text extraction failed for {0}: {1}")]
    Pdf(String, String),

    #[error("Unsupported document type: {0}")]
    Unsupported(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Document reading failed: {0}")]
    Read(#[from] ReadError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_error_converts_into_app_error() {
        let err: AppError = ReadError::Unsupported("notes.docx".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Document reading failed: Unsupported document type: notes.docx"
        );
    }

    #[test]
    fn test_storage_error_wraps_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: AppError = StorageError::from(io).into();
        assert!(err.to_string().starts_with("Storage error: I/O error"));
    }
}
