//! # Validation Module
//!
//! Checks for configuration values, customer-supplied invoice numbers and
//! export filenames.
//!
//! ## Where Validation Applies
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Boundaries                              │
//! │                                                                         │
//! │  Config load (app)                                                     │
//! │  ├── validate_brand_name   (goes into every PDF filename)              │
//! │  └── validate_gst_rate     (default rate for new items)                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Preview creation (core)                                               │
//! │  └── validate_bill_number  (customer-typed invoice number)             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Export (export crate)                                                 │
//! │  └── sanitize_filename     (never fails, always yields a name)         │
//! │                                                                         │
//! │  NOT HERE: price / quantity / GST text on order items.                 │
//! │  Those degrade to zero so the live preview keeps rendering.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use frameit_core::validation::{validate_brand_name, validate_gst_rate};
//!
//! assert!(validate_brand_name("FrameIt").is_ok());
//! assert!(validate_gst_rate(18.0).is_ok());
//! assert!(validate_gst_rate(-1.0).is_err());
//! ```

use crate::error::ValidationError;
use crate::GST_SLABS;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest brand name accepted for export filenames.
pub const MAX_BRAND_LEN: usize = 40;

/// Longest invoice number accepted from the customer form.
pub const MAX_BILL_NUMBER_LEN: usize = 32;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a GST percentage.
///
/// ## Rules
/// - Must be finite
/// - Must be non-negative
/// - Any such value is accepted; the standard slabs are a UI convenience
pub fn validate_gst_rate(rate: f64) -> ValidationResult<f64> {
    if !rate.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "gst rate".to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if rate < 0.0 {
        return Err(ValidationError::Negative {
            field: "gst rate".to_string(),
        });
    }

    Ok(rate)
}

/// True when `rate` is one of the slabs offered by the editing form.
///
/// ```rust
/// use frameit_core::validation::is_standard_gst_slab;
///
/// assert!(is_standard_gst_slab(18.0));
/// assert!(!is_standard_gst_slab(7.5));
/// ```
pub fn is_standard_gst_slab(rate: f64) -> bool {
    GST_SLABS.iter().any(|slab| *slab as f64 == rate)
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates the brand name used as the export filename prefix.
///
/// ## Rules
/// - Must not be empty
/// - At most [`MAX_BRAND_LEN`] characters
/// - ASCII letters, digits, `-` and `_` only
///
/// ## Returns
/// The trimmed brand.
pub fn validate_brand_name(brand: &str) -> ValidationResult<String> {
    let brand = brand.trim();

    if brand.is_empty() {
        return Err(ValidationError::Required {
            field: "brand".to_string(),
        });
    }

    if brand.len() > MAX_BRAND_LEN {
        return Err(ValidationError::TooLong {
            field: "brand".to_string(),
            max: MAX_BRAND_LEN,
        });
    }

    if !brand
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "brand".to_string(),
            reason: "only letters, numbers, hyphens and underscores allowed".to_string(),
        });
    }

    Ok(brand.to_string())
}

/// Validates an invoice number typed into the customer form.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Customer form: Invoice Number (optional)                               │
/// │                                                                         │
/// │  User enters: "PPS/2026/014"                                           │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_bill_number ← THIS FUNCTION                                  │
/// │       │                                                                 │
/// │       ├── blank?          → Error (caller generates INV-xxxxxx)        │
/// │       ├── > 32 chars?     → Error                                      │
/// │       ├── odd characters? → Error                                      │
/// │       │                                                                 │
/// │       └── OK → shown verbatim on the invoice                           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// Allowed characters: ASCII letters, digits, `-`, `_`, `/`, `.`
pub fn validate_bill_number(number: &str) -> ValidationResult<String> {
    let number = number.trim();

    if number.is_empty() {
        return Err(ValidationError::Required {
            field: "invoice number".to_string(),
        });
    }

    if number.len() > MAX_BILL_NUMBER_LEN {
        return Err(ValidationError::TooLong {
            field: "invoice number".to_string(),
            max: MAX_BILL_NUMBER_LEN,
        });
    }

    if !number
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '/' | '.'))
    {
        return Err(ValidationError::InvalidFormat {
            field: "invoice number".to_string(),
            reason: "only letters, numbers and - _ / . allowed".to_string(),
        });
    }

    Ok(number.to_string())
}

/// Makes `input` safe to use as a file name.
///
/// Anything outside ASCII letters, digits, `-`, `_` and `.` becomes `_`.
/// Never fails: an empty result falls back to `"invoice"`.
///
/// ```rust
/// use frameit_core::validation::sanitize_filename;
///
/// assert_eq!(sanitize_filename("PPS/2026/014"), "PPS_2026_014");
/// assert_eq!(sanitize_filename("   "), "invoice");
/// ```
pub fn sanitize_filename(input: &str) -> String {
    let cleaned: String = input
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();

    // ".." or "." alone would name a directory
    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        "invoice".to_string()
    } else {
        cleaned
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
