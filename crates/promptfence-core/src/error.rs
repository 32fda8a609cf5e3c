//! Error types for PromptFence
//!
//! Detection, resolution, evaluation and anonymization never fail; errors
//! only come from configuration parsing and lookups.

use thiserror::Error;

/// PromptFence error type
#[derive(Error, Debug)]
pub enum FenceError {
    /// Preset id not in the registry
    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    /// Data type id not in the registry
    #[error("unknown data type: {0}")]
    UnknownDataType(String),

    /// Action name other than ALLOW/WARN/BLOCK
    #[error("unknown action: {0}")]
    UnknownAction(String),

    /// Structurally valid but unusable configuration
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type for PromptFence
pub type FenceResult<T> = Result<T, FenceError>;
