//! Unified error types for kcov-runner.

use std::path::PathBuf;
use thiserror::Error;

/// Main application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    #[error("Artifact error: {0}")]
    Artifact(#[from] ArtifactError),

    #[error("Metadata error: {0}")]
    Metadata(#[from] MetadataError),

    #[error("Coverage failed for {} of {total} test binaries", .failed.len())]
    CoverageFailed { failed: Vec<PathBuf>, total: usize },
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Errors raised while running an external program
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with status {code:?}")]
    Status { command: String, code: Option<i32> },

    #[error("`{program}` produced non UTF-8 output")]
    InvalidUtf8 { program: String },

    #[error("`{program}` produced no output")]
    EmptyOutput { program: String },
}

/// Errors parsing the build tool's artifact message stream
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Malformed artifact message on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors reading the build tool's workspace metadata
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Malformed metadata: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Metadata has no target_directory")]
    MissingTargetDirectory,

    #[error("Target directory does not look like a path: {0}")]
    InvalidTargetDirectory(PathBuf),
}

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias for external program invocations
pub type ToolResult<T> = std::result::Result<T, ToolError>;
