//! Error types for shift-core operations.
//!
//! Malformed clock times are not errors anywhere in this crate; they read as
//! zero minutes. Everything below is either a configuration problem or a
//! failure talking to the remote shift store.

use std::path::PathBuf;

/// All errors that can occur in shift-core operations.
#[derive(Debug, thiserror::Error)]
pub enum ShiftError {
    // ─────────────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Configuration file malformed: {path}: {details}")]
    ConfigMalformed { path: PathBuf, details: String },

    #[error("Configuration write failed: {path}: {source}")]
    ConfigWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Missing configuration value: {0}")]
    ConfigMissing(&'static str),

    #[error("Unknown time zone: {0}")]
    UnknownTimeZone(String),

    #[error("Home directory not found")]
    HomeDirNotFound,

    // ─────────────────────────────────────────────────────────────────────
    // Remote API Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Failed to fetch shifts: {0}")]
    Fetch(String),

    #[error("Remote call failed: {action}: {details}")]
    Remote { action: String, details: String },

    #[error("Invalid request: {code}: {message}")]
    InvalidRequest { code: String, message: String },

    // ─────────────────────────────────────────────────────────────────────
    // I/O Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("I/O error: {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parsing error: {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ShiftError {
    pub fn remote(action: &str, details: impl Into<String>) -> Self {
        ShiftError::Remote {
            action: action.to_string(),
            details: details.into(),
        }
    }
}

impl From<shiftline_protocol::ErrorInfo> for ShiftError {
    fn from(info: shiftline_protocol::ErrorInfo) -> Self {
        ShiftError::InvalidRequest {
            code: info.code,
            message: info.message,
        }
    }
}

/// Convenience type alias for Results using ShiftError.
pub type Result<T> = std::result::Result<T, ShiftError>;
