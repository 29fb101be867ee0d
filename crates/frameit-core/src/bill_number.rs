//! # Bill Numbers
//!
//! Invoice identity shown on the bill and used in the export filename.
//!
//! ```text
//! now = 2026-10-16T10:15:42.318Z
//!        │
//!        ▼
//! timestamp_millis() = 1792145742318
//!                             └────┘ last six digits
//!        │
//!        ▼
//! BillNumber("INV-742318")
//! ```
//!
//! A bill number is fixed once when a preview is created and then reused
//! for every render and export of that preview. The clock is always passed
//! in; this module never reads it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;
use ts_rs::TS;

use crate::types::CustomerInfo;
use crate::validation::validate_bill_number;
use crate::BILL_NUMBER_PREFIX;

/// Display identifier of one invoice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BillNumber(String);

impl BillNumber {
    /// Derives `INV-` + the last six digits of the millisecond timestamp.
    ///
    /// ```rust
    /// use chrono::{TimeZone, Utc};
    /// use frameit_core::BillNumber;
    ///
    /// let now = Utc.timestamp_millis_opt(1_792_145_742_318).unwrap();
    /// assert_eq!(BillNumber::generate(now).as_str(), "INV-742318");
    /// ```
    pub fn generate(now: DateTime<Utc>) -> Self {
        let tail = now.timestamp_millis().rem_euclid(1_000_000);
        BillNumber(format!("{}{:06}", BILL_NUMBER_PREFIX, tail))
    }

    /// Picks the number for a new preview.
    ///
    /// The customer's own invoice number wins when present and well-formed.
    /// A malformed one is logged and replaced, since customer details never
    /// block bill creation.
    pub fn for_customer(customer: &CustomerInfo, now: DateTime<Utc>) -> Self {
        match customer.requested_invoice_number() {
            Some(requested) => match validate_bill_number(requested) {
                Ok(number) => BillNumber(number),
                Err(e) => {
                    warn!(requested, error = %e, "Ignoring invoice number, generating one");
                    Self::generate(now)
                }
            },
            None => Self::generate(now),
        }
    }

    /// Wraps an existing number without checks (e.g. when reloading).
    pub fn from_raw(number: impl Into<String>) -> Self {
        BillNumber(number.into())
    }

    /// Returns the number text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BillNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
