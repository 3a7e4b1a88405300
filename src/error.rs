use crate::domain::Severity;
use thiserror::Error;

/// Unified error type for gensemver operations
#[derive(Error, Debug)]
pub enum GenSemverError {
    #[error("Not in a git repository: {0}")]
    RepositoryNotFound(String),

    #[error("Cannot run '{tool}': {reason}")]
    ToolUnavailable { tool: String, reason: String },

    #[error("'{command}' failed: {stderr}")]
    ToolFailure { command: String, stderr: String },

    #[error("No new version could be determined from {range}")]
    NoDeterminableVersion { range: String },

    #[error("Invalid previous version '{value}': {reason}")]
    InvalidOverrideVersion { value: String, reason: String },

    #[error("Cannot apply a {severity} bump to {version}: component overflows")]
    VersionOverflow { version: String, severity: Severity },

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in gensemver
pub type Result<T> = std::result::Result<T, GenSemverError>;

impl GenSemverError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GenSemverError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        GenSemverError::Version(msg.into())
    }

    pub fn repository_not_found(msg: impl Into<String>) -> Self {
        GenSemverError::RepositoryNotFound(msg.into())
    }

    pub fn no_new_version(range: impl Into<String>) -> Self {
        GenSemverError::NoDeterminableVersion {
            range: range.into(),
        }
    }
}
