//! # App Error Type
//!
//! Unified error type for CLI commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in FrameIt Billing                        │
//! │                                                                         │
//! │  frameit preview --order bill.json                                      │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, AppError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  No valid item? ─── CoreError::NoValidItems ───────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  PDF failed? ────── ExportError::Io ──────────── AppError ─────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  main: print message to stderr, exit code 1                            │
//! │        (--json: {"code": "PRECONDITION_FAILED", "message": "..."})      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use frameit_core::{CoreError, ValidationError};
use frameit_export::ExportError;

use crate::state::ConfigError;

/// Error returned from CLI commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "PRECONDITION_FAILED",
///   "message": "Please add at least one item to create a bill!"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for CLI failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Item, product or gallery entry not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// The action is not possible in the current state
    /// (e.g. preview with no valid item)
    PreconditionFailed,

    /// Configuration could not be loaded
    ConfigError,

    /// PDF export failed; the export can be retried
    ExportFailed,

    /// Reading or writing the order file failed
    IoError,

    /// A bug rather than bad input: a crashed render task, or output
    /// that could not be serialized
    Internal,
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        AppError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

/// Result alias for commands.
pub type AppResult<T> = Result<T, AppError>;

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NoValidItems | CoreError::NotInPreview => {
                AppError::new(ErrorCode::PreconditionFailed, err.to_string())
            }
            CoreError::ProductNotFound(id) => AppError::not_found("Product", &id.to_string()),
            CoreError::GalleryItemNotFound(id) => {
                AppError::not_found("Gallery item", &id.to_string())
            }
            CoreError::OrderNotFound(id) => AppError::not_found("Order", &id),
            CoreError::UnknownField(_) => AppError::validation(err.to_string()),
            CoreError::Validation(e) => AppError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        if let ExportError::Task(_) = err {
            return AppError::internal(err.to_string());
        }
        let message = if err.is_retryable() {
            format!("{}. Please try again.", err)
        } else {
            err.to_string()
        };
        AppError::new(ErrorCode::ExportFailed, message)
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::new(ErrorCode::IoError, err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::internal(format!("JSON serialization failed: {}", err))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_valid_items_is_precondition() {
        let err = AppError::from(CoreError::NoValidItems);
        assert_eq!(err.code, ErrorCode::PreconditionFailed);
        assert_eq!(err.message, "Please add at least one item to create a bill!");

        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "PRECONDITION_FAILED");
    }

    #[test]
    fn test_retryable_export_error_suggests_retry() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = AppError::from(ExportError::Io(io));
        assert_eq!(err.code, ErrorCode::ExportFailed);
        assert!(err.message.ends_with("Please try again."));
    }

    #[test]
    fn test_crashed_render_task_is_internal() {
        let err = AppError::from(ExportError::Task("task panicked".to_string()));
        assert_eq!(err.code, ErrorCode::Internal);
        assert_eq!(err.message, "Export task failed: task panicked");

        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "INTERNAL");
    }

    #[test]
    fn test_product_not_found() {
        let err = AppError::from(CoreError::ProductNotFound(42));
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product not found: 42");
    }
}
