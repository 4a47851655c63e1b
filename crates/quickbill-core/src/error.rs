//! # Error Types
//!
//! Domain-specific error types for quickbill-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  quickbill-core errors (this file)                                     │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  quickbill-db errors (separate crate)                                  │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  Console errors (in app)                                               │
//! │  └── AppError         - What the operator sees                         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → Operator               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A corrupt stored document is deliberately *not* an error here: decoding
//! reports it through [`crate::document::Decoded::Corrupt`] and callers fall
//! back to defaults.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A menu draft row does not exist. Rows are numbered from 1.
    ///
    /// ## When This Occurs
    /// - Operator types `menu price 9 30` while the draft has 6 rows
    /// - Row was dropped earlier in the same edit session
    #[error("Menu row {row} does not exist (draft has {rows} rows)")]
    MenuRowOutOfRange { row: usize, rows: usize },

    /// A draft operation was attempted outside edit mode.
    #[error("{what} is not being edited")]
    NotEditing { what: &'static str },

    /// A document could not be encoded for storage.
    #[error("Failed to encode document: {0}")]
    Encode(#[from] serde_json::Error),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::MenuRowOutOfRange { row: 9, rows: 6 };
        assert_eq!(
            err.to_string(),
            "Menu row 9 does not exist (draft has 6 rows)"
        );

        let err = CoreError::NotEditing { what: "Menu" };
        assert_eq!(err.to_string(), "Menu is not being edited");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
