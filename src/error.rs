//! Error handling module for gpbuild
//!
//! Every failing build step surfaces as a `BuildError`. A command that exits
//! non-zero keeps its status unchanged so the CI driver can report it verbatim.

use thiserror::Error;

/// Main error type for build steps
#[derive(Error, Debug)]
pub enum BuildError {
    /// A command ran and exited with a non-zero status
    #[error("{program} failed with status {status}")]
    CommandFailed { program: String, status: i32 },

    /// A command could not be started at all (missing binary, missing cwd)
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors (loading, parsing, validation)
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for build operations
pub type Result<T> = std::result::Result<T, BuildError>;

impl BuildError {
    /// Create a command failure carrying the child's status
    pub fn command_failed(program: impl Into<String>, status: i32) -> Self {
        Self::CommandFailed {
            program: program.into(),
            status,
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Status of the failing command, if this error came from one
    pub fn status(&self) -> Option<i32> {
        match self {
            Self::CommandFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Process exit code to report for this error.
    ///
    /// Statuses that fit a process exit code pass through; anything else
    /// (signals, spawn and config failures) maps to 1.
    pub fn exit_code(&self) -> i32 {
        match self.status() {
            Some(status) if (1..=255).contains(&status) => status,
            _ => 1,
        }
    }
}
