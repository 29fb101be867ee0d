//! # Error Types
//!
//! Domain-specific error types for frameit-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  frameit-core errors (this file)                                       │
//! │  ├── CoreError        - Billing preconditions, lookups                 │
//! │  └── ValidationError  - Config / invoice number / filename checks      │
//! │                                                                         │
//! │  frameit-export errors (separate crate)                                │
//! │  └── ExportError      - Layout, PDF and file output failures           │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── AppError         - What the user sees (code + message)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → terminal               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Parse failures of price, quantity or GST text are NOT errors: they
//! degrade to zero so the live preview always renders (see [`crate::parse`]).

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A bill preview was requested while no order item is valid.
    ///
    /// ## User Workflow
    /// ```text
    /// Create Bill Preview
    ///      │
    ///      ▼
    /// valid items (name + price) == 0
    ///      │
    ///      ▼
    /// NoValidItems ──► "Please add at least one item to create a bill!"
    ///      │
    ///      ▼
    /// Session stays in editing mode, nothing changed
    /// ```
    #[error("Please add at least one item to create a bill!")]
    NoValidItems,

    /// An operation needs the bill preview but the session is editing.
    #[error("No bill preview has been created yet")]
    NotInPreview,

    /// Catalog product cannot be found.
    #[error("Product not found: {0}")]
    ProductNotFound(u32),

    /// Gallery item cannot be found.
    #[error("Gallery item not found: {0}")]
    GalleryItemNotFound(u32),

    /// Past order cannot be found.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// Unknown editable field name.
    #[error("Unknown item field '{0}' (expected name, price, quantity or gst)")]
    UnknownField(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g., characters not allowed in a filename).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CoreError::NoValidItems.to_string(),
            "Please add at least one item to create a bill!"
        );
        assert_eq!(
            CoreError::ProductNotFound(9).to_string(),
            "Product not found: 9"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "brand".to_string(),
        };
        assert_eq!(err.to_string(), "brand is required");

        let err = ValidationError::Negative {
            field: "gst rate".to_string(),
        };
        assert_eq!(err.to_string(), "gst rate must not be negative");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "invoice number".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
