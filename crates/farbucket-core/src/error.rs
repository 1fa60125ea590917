//! Error types for the bucket pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Error type for pipeline operations
///
/// Every error is fatal to the run; nothing is retried or recovered locally.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Invalid or missing option combination
    #[error("configuration error: {0}")]
    Configuration(String),

    /// An external tool exited unsuccessfully or could not be started
    #[error("{tool} failed: {status}")]
    ExternalTool { tool: String, status: ToolStatus },

    /// A required path could not be read, written, or copied
    #[error("file system error at {}: {source}", path.display())]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Pipeline configuration file could not be parsed
    #[error("invalid configuration file: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// How an external tool invocation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolStatus {
    /// The process ran and exited with this code
    Exited(i32),
    /// The process was terminated without an exit code
    Terminated,
    /// The process could not be launched
    Spawn(String),
    /// The process succeeded but an expected output is missing
    MissingOutput(PathBuf),
}

impl std::fmt::Display for ToolStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToolStatus::Exited(code) => write!(f, "exit status {code}"),
            ToolStatus::Terminated => write!(f, "terminated by signal"),
            ToolStatus::Spawn(reason) => write!(f, "could not start: {reason}"),
            ToolStatus::MissingOutput(path) => {
                write!(f, "expected output {} was not produced", path.display())
            }
        }
    }
}

impl PipelineError {
    /// Shorthand for a file system error at `path`.
    pub fn fs(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::FileSystem {
            path: path.into(),
            source,
        }
    }

    /// Shorthand for a tool failure.
    pub fn tool(tool: impl Into<String>, status: ToolStatus) -> Self {
        PipelineError::ExternalTool {
            tool: tool.into(),
            status,
        }
    }

    /// Process exit code for this error.
    ///
    /// Tool failures pass the tool's own exit code through when there is one.
    pub fn exit_code(&self) -> i32 {
        match self {
            PipelineError::ExternalTool {
                status: ToolStatus::Exited(code),
                ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }
}

#[cfg(test)]
#[path = "error/error_tests.rs"]
mod error_tests;
