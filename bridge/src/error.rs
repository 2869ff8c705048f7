//! Error types for the datatable bridge.
//!
//! - [`SourceError`] - Loading rows from JSON/CSV input
//! - [`ConfigError`] - Loading and schema-checking an option bag
//! - [`BridgeError`] - Top-level errors returned by the row pipeline
//!
//! Unresolved placeholders are not errors: the literal `{{name}}` text is
//! kept in the output. Malformed options only surface as errors when the
//! option bag asks for strict mode.

use thiserror::Error;

// =============================================================================
// Row Source Errors
// =============================================================================

/// Errors while materializing rows from an input file or string.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Failed to read input.
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to decode input bytes.
    #[error("Failed to decode input: {0}")]
    Encoding(String),

    /// Malformed CSV.
    #[error("Invalid CSV at line {line}: {message}")]
    Parse { line: u64, message: String },

    /// A JSON row that is not an object.
    #[error("Row {index} is not a JSON object")]
    InvalidRow { index: usize },

    /// Input with no header line.
    #[error("Input is empty")]
    EmptyInput,

    /// JSON syntax error or a top-level value that is not a row list.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors while loading an option bag.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error.
    #[error("Options IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("Options JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Schema validation failed.
    #[error("Options failed validation: {errors:?}")]
    Schema { errors: Vec<String> },
}

// =============================================================================
// Bridge Errors (top-level)
// =============================================================================

/// Errors returned by [`crate::transform::pipeline::create_json`].
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The upstream query reported no result at all.
    #[error("Query returned no data")]
    NoData,

    /// A sub-option lacks a field it needs (strict mode only).
    #[error("Option '{option}' is missing required field '{field}'")]
    MissingOptionField { option: String, field: String },

    /// A sub-option carries a value the pipeline cannot use (strict mode only).
    #[error("Invalid value for option '{option}': {message}")]
    InvalidOption { option: String, message: String },

    /// Fetching rows failed.
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BridgeError {
    pub(crate) fn missing(option: impl Into<String>, field: impl Into<String>) -> Self {
        BridgeError::MissingOptionField {
            option: option.into(),
            field: field.into(),
        }
    }

    pub(crate) fn invalid(option: impl Into<String>, message: impl Into<String>) -> Self {
        BridgeError::InvalidOption {
            option: option.into(),
            message: message.into(),
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for row loading.
pub type SourceResult<T> = Result<T, SourceError>;

/// Result type for option loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for the pipeline.
pub type BridgeResult<T> = Result<T, BridgeError>;
