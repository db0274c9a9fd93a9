//! Error types for versebook.
//!
//! Library crates use [`VersebookError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all versebook operations.
#[derive(Debug, thiserror::Error)]
pub enum VersebookError {
    /// Configuration loading or parsing error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Registry or table validation error (bad filename, broken part grouping, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },

    /// The documentation directory to preprocess does not exist.
    #[error("Directory {} does not exist", path.display())]
    MissingInput { path: PathBuf },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, VersebookError>;

impl VersebookError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = VersebookError::config("unknown field `colour`");
        assert_eq!(err.to_string(), "config error: unknown field `colour`");

        let err = VersebookError::validation("duplicate chapter 01_expressions.md");
        assert!(err.to_string().contains("01_expressions.md"));
    }

    #[test]
    fn missing_input_names_the_directory() {
        let err = VersebookError::MissingInput {
            path: PathBuf::from("docs/verse"),
        };
        assert_eq!(err.to_string(), "Directory docs/verse does not exist");
    }
}
