//! Error types for yds-tools operations.
//!
//! Each utility owns its error enum:
//! - Exam database initialization (JSON load/patch/save, answer keys, definitions)
//! - Document text extraction (DOCX loading, text output)

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while initializing the exam database.
#[derive(Debug, Error)]
pub enum ExamError {
    #[error("Database file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to parse database '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Database root in '{}' is not a JSON object", .0.display())]
    NotAnObject(PathBuf),

    #[error("Invalid answer key: {0}")]
    InvalidAnswerKey(String),

    #[error("Invalid choice '{0}': expected A-E or 0-4")]
    InvalidChoice(String),

    #[error("Invalid exam definition: {0}")]
    InvalidDefinition(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Errors that can occur during document text extraction.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Document not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Unreadable document '{}': {reason}", path.display())]
    Format { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
