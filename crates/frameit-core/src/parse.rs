//! # Typed Parsing of Form Input
//!
//! Order items keep whatever the user typed (`"100"`, `""`, `"12abc"`).
//! Before any arithmetic the raw text goes through one explicit parse step
//! that says whether a usable number is present.
//!
//! ```text
//! raw text ──► parse_decimal / parse_count ──► ParsedNumber
//!                                               ├── Value(f64)
//!                                               ├── Empty
//!                                               └── Invalid(raw)
//!                                                     │
//!                         call site decides ◄─────────┘
//!                         (billing uses .or_zero())
//! ```
//!
//! Nothing here ever fails: an unusable value is reported, not raised.

use serde::{Deserialize, Serialize};

/// Result of parsing one numeric form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ParsedNumber {
    /// A finite, non-negative number.
    Value(f64),
    /// The field is blank.
    Empty,
    /// The field holds text that is not a usable number.
    Invalid(String),
}

impl ParsedNumber {
    /// Applies the zero fallback used by the billing calculator.
    #[inline]
    pub fn or_zero(&self) -> f64 {
        match self {
            ParsedNumber::Value(v) => *v,
            ParsedNumber::Empty | ParsedNumber::Invalid(_) => 0.0,
        }
    }

    /// True when a usable number was parsed.
    #[inline]
    pub fn is_value(&self) -> bool {
        matches!(self, ParsedNumber::Value(_))
    }
}

/// Parses a decimal amount or percentage (`"99.50"`, `" 18 "`).
///
/// ## Rules
/// - Surrounding whitespace is ignored
/// - Blank → `Empty`
/// - Not a number, not finite, or negative → `Invalid`
///
/// ## Example
/// ```rust
/// use frameit_core::parse::{parse_decimal, ParsedNumber};
///
/// assert_eq!(parse_decimal("99.5"), ParsedNumber::Value(99.5));
/// assert_eq!(parse_decimal(""), ParsedNumber::Empty);
/// assert!(!parse_decimal("abc").is_value());
/// ```
pub fn parse_decimal(raw: &str) -> ParsedNumber {
    let text = raw.trim();
    if text.is_empty() {
        return ParsedNumber::Empty;
    }

    match text.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => ParsedNumber::Value(v),
        _ => ParsedNumber::Invalid(raw.to_string()),
    }
}

/// Parses a whole-number count such as a quantity.
///
/// Decimal input is truncated toward zero (`"2.9"` → 2), matching how a
/// number field's text is read as an integer count.
///
/// ## Example
/// ```rust
/// use frameit_core::parse::{parse_count, ParsedNumber};
///
/// assert_eq!(parse_count("3"), ParsedNumber::Value(3.0));
/// assert_eq!(parse_count("2.9"), ParsedNumber::Value(2.0));
/// assert_eq!(parse_count("two").or_zero(), 0.0);
/// ```
pub fn parse_count(raw: &str) -> ParsedNumber {
    match parse_decimal(raw) {
        ParsedNumber::Value(v) => ParsedNumber::Value(v.trunc()),
        other => other,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
