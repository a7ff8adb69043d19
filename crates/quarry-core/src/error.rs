//! Error types for quarry-core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in quarry-core
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed XML in a source file
    #[error("failed to parse XML '{path}': {message}")]
    Xml { path: PathBuf, message: String },

    /// A file the run cannot do without is missing
    #[error("required source file not found: {path}")]
    MissingSource { path: PathBuf },

    /// Requested language is not listed in language.xml
    #[error("unknown language '{language}'. Valid options: {}", .valid.join(", "))]
    UnknownLanguage { language: String, valid: Vec<String> },

    /// The game installation has no Infos directory
    #[error("Infos directory not found: {0}")]
    InfosDirNotFound(PathBuf),

    /// No category with this name in the category table
    #[error("unknown category '{0}'")]
    UnknownCategory(String),

    /// Directory traversal error
    #[error("failed to traverse directory: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_language_lists_choices() {
        let err = Error::UnknownLanguage {
            language: "xx-XX".to_string(),
            valid: vec!["en-US".to_string(), "de-DE".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "unknown language 'xx-XX'. Valid options: en-US, de-DE"
        );
    }
}
