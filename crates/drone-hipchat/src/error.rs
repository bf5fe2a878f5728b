//! Error types for drone-hipchat

use thiserror::Error;

/// Errors raised while reading the plugin input
#[derive(Error, Debug)]
pub enum PluginError {
    /// No parameters were supplied on the command line, in a file, or on stdin
    #[error("no plugin parameters supplied")]
    EmptyInput,

    /// Parameters were not a valid Drone plugin document
    #[error("invalid plugin parameters: {0}")]
    InvalidInput(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for plugin operations
pub type Result<T> = std::result::Result<T, PluginError>;
