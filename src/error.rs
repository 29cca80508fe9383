//! Error types for Botdesk
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur in Botdesk
#[derive(Debug, Error)]
pub enum BotdeskError {
    /// Lookup for a tool id that is not in the catalog
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Submission attempted with an incomplete or malformed field set
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Backend call failed (transport, timeout, or non-2xx status)
    #[error("Invocation failed: {0}")]
    Invocation(String),

    /// Clipboard write failed; callers treat this as best-effort
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// Catalog file could not be read or is structurally invalid
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Botdesk operations
pub type Result<T> = std::result::Result<T, BotdeskError>;
