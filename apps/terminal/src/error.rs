//! # Console Error Type
//!
//! Unified error type for console commands and startup.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in QuickBill                              │
//! │                                                                         │
//! │  Operator types `menu price 9 30`                                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command handler                                                 │  │
//! │  │  Result<Reply, AppError>                                         │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Database Error? ─── DbError::QueryFailed("...") ──┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Domain Error? ──── CoreError::MenuRowOutOfRange ── AppError ───►│  │
//! │  │         │                                          ▲            │  │
//! │  │         ▼                                          │            │  │
//! │  │  Export Error? ──── ExportError::InFlight ─────────┘            │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Console prints: error[VALIDATION_ERROR]: Menu row 9 does not exist ... │
//! │  The loop keeps running; only startup errors end the process.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use quickbill_core::CoreError;
use quickbill_db::DbError;

use crate::export::ExportError;

/// Error returned from console commands and startup.
#[derive(Debug, Clone)]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes shown in brackets on the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Menu item not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Database operation failed
    DatabaseError,

    /// Operation not allowed in the current state
    BusinessLogic,

    /// Receipt export could not start or failed
    ExportError,

    /// Configuration could not be loaded or is invalid
    ConfigError,

    /// Internal error
    Internal,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::BusinessLogic => "BUSINESS_LOGIC",
            ErrorCode::ExportError => "EXPORT_ERROR",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AppError {
    /// Creates a new error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        AppError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ConfigError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

/// Converts database errors to console errors.
impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Database migration failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but show a generic message
                tracing::error!("Database query failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::Encode { key, message } => {
                tracing::error!(key = %key, "Document encoding failed: {}", message);
                AppError::internal(format!("Could not encode '{}'", key))
            }
            DbError::PoolExhausted => {
                AppError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to console errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::MenuRowOutOfRange { .. } => AppError::validation(err.to_string()),
            CoreError::NotEditing { what } => AppError::new(
                ErrorCode::BusinessLogic,
                format!("{} is not being edited; start with `edit`", what),
            ),
            CoreError::Encode(e) => AppError::internal(format!("Failed to encode document: {}", e)),
            CoreError::Validation(e) => AppError::validation(e.to_string()),
        }
    }
}

/// Converts export errors to console errors.
impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::EmptyOrder => AppError::new(
                ErrorCode::BusinessLogic,
                "Order is empty; add items before exporting",
            ),
            ExportError::InFlight => AppError::new(
                ErrorCode::BusinessLogic,
                "An export is already in progress",
            ),
            other => AppError::new(ErrorCode::ExportError, other.to_string()),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::internal(format!("I/O error: {}", err))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error[{}]: {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}

/// Result type for console operations.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code() {
        let err = AppError::validation("bad input");
        assert_eq!(err.to_string(), "error[VALIDATION_ERROR]: bad input");
    }

    #[test]
    fn test_core_errors_map_to_codes() {
        let err = AppError::from(CoreError::MenuRowOutOfRange { row: 9, rows: 6 });
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("Menu row 9"));

        let err = AppError::from(CoreError::NotEditing { what: "Menu" });
        assert_eq!(err.code, ErrorCode::BusinessLogic);
    }

    #[test]
    fn test_export_refusals_are_business_errors() {
        assert_eq!(AppError::from(ExportError::InFlight).code, ErrorCode::BusinessLogic);
        assert_eq!(AppError::from(ExportError::EmptyOrder).code, ErrorCode::BusinessLogic);
        assert_eq!(
            AppError::from(ExportError::Render("font".into())).code,
            ErrorCode::ExportError
        );
    }

    #[test]
    fn test_db_errors_hide_details() {
        let err = AppError::from(DbError::QueryFailed("no such table".into()));
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.message, "Database operation failed");
    }
}
