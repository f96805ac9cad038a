// In: src/error.rs

//! This module defines the single, unified error type for the entire plume library.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.

use pyo3::PyErr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlumeError {
    // =========================================================================
    // === High-Level, Semantic Errors (Specific to our library's logic)
    // =========================================================================
    /// A `Generic` column holds cells of more than one scalar kind. Recoverable
    /// via the single text-coercion retry in the encoder.
    #[error("Column '{0}' mixes incompatible value types")]
    MixedType(String),

    /// The dataset could not be represented in any supported logical type,
    /// even after the text-coercion fallback. Terminal for that dataset.
    #[error("Dataset cannot be encoded: {0}")]
    Unencodable(String),

    /// The compute runtime call itself failed. The payload is opaque to this
    /// library, so the failure is passed through without classification.
    #[error("Compute runtime call failed: {0}")]
    RuntimeFailure(String),

    #[error("Column '{0}' has {2} rows, expected {1}")]
    LengthMismatch(String, usize, usize),

    #[error("Unsupported data type for this operation: {0}")]
    UnsupportedType(String),

    // =========================================================================
    // === External Error Wrappers (Using #[from] for automatic conversion)
    // =========================================================================
    /// An error originating from the Arrow library.
    #[error("Arrow operation failed: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// An error originating from the underlying I/O subsystem. The store's
    /// atomic-rename discipline guarantees no corrupt artifact is ever visible
    /// under a final path when this surfaces.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error from the Serde JSON library, typically during locator serialization.
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// An error for Python FFI (Foreign Function Interface) operations.
    #[error("FFI operation failed: {0}")]
    FfiError(String), // PyErr doesn't impl Error, so we can't use #[from] here.
}

// =============================================================================
// === Manual `From` Implementations ===
// =============================================================================

impl From<PyErr> for PlumeError {
    fn from(err: PyErr) -> Self {
        PlumeError::FfiError(err.to_string())
    }
}

impl From<PlumeError> for PyErr {
    fn from(err: PlumeError) -> PyErr {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_type_display_names_the_column() {
        let err = PlumeError::MixedType("payload".to_string());
        assert!(err.to_string().contains("payload"));
        assert!(err.to_string().contains("mixes incompatible value types"));
    }

    #[test]
    fn io_errors_convert_automatically() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: PlumeError = io.into();
        assert!(matches!(err, PlumeError::Io(_)));
        assert!(err.to_string().contains("denied"));
    }
}
