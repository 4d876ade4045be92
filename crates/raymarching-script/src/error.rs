//! Error types for script evaluation

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using the scripting Error type
pub type Result<T> = std::result::Result<T, ScriptError>;

/// Errors that can occur while evaluating or watching scene scripts
#[derive(Error, Debug)]
pub enum ScriptError {
    /// Script file could not be read
    #[error("Failed to read script {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Script failed to parse
    #[error("Script compilation failed: {0}")]
    Compile(String),

    /// Script raised an error while running
    #[error("Failed to evaluate script: {0}")]
    Eval(String),

    /// Shader generation failed
    #[error(transparent)]
    Sdf(#[from] raymarching_sdf::Error),

    /// File watcher could not be set up
    #[error("Watch error: {0}")]
    Watch(String),
}
