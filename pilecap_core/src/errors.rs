//! # Error Types
//!
//! Structured error types for pilecap_core. Every variant carries enough
//! context for a caller (CLI, service, or LLM tool) to explain the failure
//! to the engineer without re-running the calculation.
//!
//! ## Example
//!
//! ```rust
//! use pilecap_core::errors::{CalcError, CalcResult};
//!
//! fn validate_spacing(s_x: f64) -> CalcResult<()> {
//!     if s_x <= 0.0 {
//!         return Err(CalcError::invalid_geometry("s_x", s_x.to_string(), "Spacing must be positive"));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for pilecap_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
///
/// An empty load-case set is not an error: the envelope engine passes the
/// piles through unchanged.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, non-finite, duplicated, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Pile grid parameters cannot produce a grid
    #[error("Invalid pile geometry for '{field}': {value} - {reason}")]
    InvalidGeometry {
        field: String,
        value: String,
        reason: String,
    },

    /// Geometry is well-formed but a downstream quantity is undefined
    /// (no piles, non-positive effective depth)
    #[error("Degenerate geometry in {calculation}: {reason}")]
    DegenerateGeometry { calculation: String, reason: String },

    /// Flexural demand exceeds what the section can resist
    #[error(
        "Reinforcement underflow ({axis}-direction): Mu = {moment_per_ft:.2} kip-ft/ft gives radicand {radicand:.4} < 0 - section inadequate in flexure"
    )]
    ReinforcementUnderflow {
        axis: String,
        moment_per_ft: f64,
        radicand: f64,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// File is locked by another user/process
    #[error("File locked: '{path}' is locked by {locked_by} since {locked_at}")]
    FileLocked {
        path: String,
        locked_by: String,
        locked_at: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidGeometry error
    pub fn invalid_geometry(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidGeometry {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a DegenerateGeometry error
    pub fn degenerate_geometry(calculation: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::DegenerateGeometry {
            calculation: calculation.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(path: impl Into<String>, locked_by: impl Into<String>, locked_at: impl Into<String>) -> Self {
        CalcError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Check if this is a recoverable error (e.g., can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CalcError::FileLocked { .. })
    }

    /// Whether this error reports a failed design (as opposed to bad input)
    pub fn is_design_failure(&self) -> bool {
        matches!(self, CalcError::ReinforcementUnderflow { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::InvalidGeometry { .. } => "INVALID_GEOMETRY",
            CalcError::DegenerateGeometry { .. } => "DEGENERATE_GEOMETRY",
            CalcError::ReinforcementUnderflow { .. } => "REINFORCEMENT_UNDERFLOW",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::FileLocked { .. } => "FILE_LOCKED",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_geometry("n_x", "0", "Pile count must be at least 1");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidGeometry\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::degenerate_geometry("flexure", "no piles").error_code(), "DEGENERATE_GEOMETRY");
        let underflow = CalcError::ReinforcementUnderflow {
            axis: "x".to_string(),
            moment_per_ft: 900.0,
            radicand: -0.2,
        };
        assert_eq!(underflow.error_code(), "REINFORCEMENT_UNDERFLOW");
        assert!(underflow.is_design_failure());
        assert!(!underflow.is_recoverable());
    }

    #[test]
    fn test_underflow_message_names_axis() {
        let underflow = CalcError::ReinforcementUnderflow {
            axis: "y".to_string(),
            moment_per_ft: 1234.5,
            radicand: -0.5,
        };
        let message = underflow.to_string();
        assert!(message.contains("y-direction"));
        assert!(message.contains("1234.50"));
    }
}
