//! Error types and error handling

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result alias used throughout the scaffolding library
pub type Result<T> = std::result::Result<T, ScaffoldError>;

/// Scaffolding error type
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// Identifier failed lexical validation
    #[error("Invalid {kind} name '{value}': {rule}")]
    InvalidName {
        /// What the identifier names (entity, column, method)
        kind: &'static str,
        /// Rejected input
        value: String,
        /// Human readable rule the input broke
        rule: &'static str,
    },

    /// Attribute definition could not be parsed or accepted
    #[error("Invalid attribute '{input}': {reason}")]
    InvalidAttribute {
        /// Raw definition as supplied
        input: String,
        /// Why it was rejected
        reason: String,
    },

    /// Target file already exists and the step never overwrites it
    #[error("{} already exists", path.display())]
    Collision {
        /// Existing file
        path: PathBuf,
    },

    /// A file the step depends on is missing
    #[error("{} not found", path.display())]
    MissingFile {
        /// Expected location
        path: PathBuf,
    },

    /// A text patch could not locate its anchor
    #[error("Could not find {anchor} in {}", path.display())]
    AnchorNotFound {
        /// Description of the anchor
        anchor: String,
        /// File being patched
        path: PathBuf,
    },

    /// Filesystem failure
    #[error("Failed to {action} {}: {source}", path.display())]
    Io {
        /// Operation that failed (read, write, create directory)
        action: &'static str,
        /// Path involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Template rendering failure
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    /// Anchor pattern failed to compile
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Terminal interaction failure
    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    /// Scripted answers ran out before the prompt was answered
    #[error("No answer available for prompt '{prompt}'")]
    NoAnswer {
        /// Prompt left unanswered
        prompt: String,
    },

    /// Scripted answer does not fit the prompt
    #[error("Answer '{answer}' does not fit prompt '{prompt}'")]
    UnexpectedAnswer {
        /// Prompt being answered
        prompt: String,
        /// Offending answer
        answer: String,
    },

    /// JSON serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScaffoldError {
    /// Wrap an I/O error with the action and path it relates to
    pub fn io(action: &'static str, path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Whether the error came from the input side
    ///
    /// No later step can collect answers once the terminal is gone, so these
    /// end a run even when raised by an otherwise independent step.
    #[must_use]
    pub const fn is_prompt_failure(&self) -> bool {
        matches!(
            self,
            Self::Prompt(_) | Self::NoAnswer { .. } | Self::UnexpectedAnswer { .. }
        )
    }
}
