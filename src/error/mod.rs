//! Error handling for skillmatrix.
//!
//! This module provides:
//! - [`MatrixError`]: The main error enum for all operations
//! - [`ErrorCode`]: Standardized error codes for machine parsing
//! - [`StructuredError`]: Rich error type with suggestions and context
//! - Suggestion helpers for context-aware recovery hints

mod codes;
mod suggestions;

use std::io;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use codes::ErrorCode;
pub use suggestions::{suggest_for_error, suggest_similar};

/// Main error type for skillmatrix operations.
#[derive(Error, Debug)]
pub enum MatrixError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse catalog {path}: {reason}")]
    CatalogParse { path: String, reason: String },

    #[error("Unsupported catalog format: {0}")]
    UnsupportedFormat(String),

    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("Unknown category filter '{tag}'")]
    UnknownCategory { tag: String, known: Vec<String> },

    #[error("Invalid proficiency bands: {0}")]
    InvalidBands(String),

    #[error("Catalog validation failed for {origin}: {} problem(s)", .errors.len())]
    ValidationFailed { origin: String, errors: Vec<String> },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Config file not found: {0}")]
    ConfigNotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl MatrixError {
    /// Get the error code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Io(_) => ErrorCode::IoError,
            Self::Serialization(_) => ErrorCode::SerializationError,
            Self::CatalogParse { .. } => ErrorCode::CatalogParseError,
            Self::UnsupportedFormat(_) => ErrorCode::CatalogUnsupportedFormat,
            Self::CategoryNotFound(_) => ErrorCode::CategoryNotFound,
            Self::UnknownCategory { .. } => ErrorCode::SearchUnknownCategory,
            Self::InvalidBands(_) => ErrorCode::BandsInvalid,
            Self::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            Self::Config(_) => ErrorCode::ConfigInvalid,
            Self::ConfigNotFound(_) => ErrorCode::ConfigNotFound,
        }
    }

    /// Get context information for this error as JSON.
    #[must_use]
    pub fn context(&self) -> Option<Value> {
        match self {
            Self::CategoryNotFound(id) => Some(serde_json::json!({ "category_id": id })),
            Self::UnknownCategory { tag, known } => {
                Some(serde_json::json!({ "tag": tag, "known": known }))
            }
            Self::CatalogParse { path, reason } => {
                Some(serde_json::json!({ "path": path, "reason": reason }))
            }
            Self::ValidationFailed { origin, errors } => {
                Some(serde_json::json!({ "origin": origin, "errors": errors }))
            }
            Self::ConfigNotFound(path) => Some(serde_json::json!({ "path": path })),
            _ => None,
        }
    }

    /// Convert this error to a structured error.
    #[must_use]
    pub fn to_structured(&self) -> StructuredError {
        StructuredError::from_matrix_error(self)
    }
}

/// A structured error with machine-readable code, suggestion, and context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// The error code (e.g., "SKILL_NOT_FOUND")
    pub code: ErrorCode,

    /// The numeric error code (e.g., 101)
    pub numeric_code: u16,

    /// Human-readable error message
    pub message: String,

    /// Actionable suggestion for recovery
    pub suggestion: String,

    /// Additional context for debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,

    /// Whether this error is potentially recoverable by the user
    pub recoverable: bool,

    /// Error category (e.g., "catalog", "config")
    pub category: String,
}

impl StructuredError {
    /// Create a new structured error.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            numeric_code: code.numeric(),
            suggestion: code.suggestion().to_string(),
            context: None,
            recoverable: code.is_recoverable(),
            category: code.category().to_string(),
            code,
            message: message.into(),
        }
    }

    /// Create a structured error from a `MatrixError`.
    #[must_use]
    pub fn from_matrix_error(err: &MatrixError) -> Self {
        let code = err.code();
        let context = err.context();
        let suggestion = suggest_for_error(code, context.as_ref());

        Self {
            code,
            numeric_code: code.numeric(),
            message: err.to_string(),
            suggestion,
            context,
            recoverable: code.is_recoverable(),
            category: code.category().to_string(),
        }
    }

    /// Add context to this error.
    #[must_use]
    pub fn with_context(mut self, context: Value) -> Self {
        self.context = Some(context);
        // Regenerate suggestion with new context
        self.suggestion = suggest_for_error(self.code, self.context.as_ref());
        self
    }
}

impl std::fmt::Display for StructuredError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl From<&MatrixError> for StructuredError {
    fn from(err: &MatrixError) -> Self {
        Self::from_matrix_error(err)
    }
}

/// Result type alias using `MatrixError`.
pub type Result<T> = std::result::Result<T, MatrixError>;
