//! # frameit-core: Pure Billing Logic for FrameIt
//!
//! This crate is the **heart** of the FrameIt billing tool. It contains the
//! order item model, GST arithmetic and invoice shaping as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        FrameIt Billing Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    billing-cli (`frameit`)                      │   │
//! │  │   item add/update ──► summary ──► preview ──► export           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ frameit-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   store   │  │  billing  │  │  invoice  │  │  session  │  │   │
//! │  │   │ OrderItem │  │ BillTotals│  │ Invoice-  │  │ Editing / │  │   │
//! │  │   │  editing  │  │ GST split │  │ Document  │  │ Preview   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO FILES • PURE FUNCTIONS                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 frameit-export (Export Adapter)                 │   │
//! │  │            InvoiceDocument ──► A4 layout ──► PDF file           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Order items, customer info, editable fields
//! - [`parse`] - Typed parsing of raw form text
//! - [`money`] - Rupee amounts and 2-decimal display
//! - [`billing`] - Per-item and aggregate subtotal/GST/total
//! - [`store`] - The ordered, editable list of order items
//! - [`bill_number`] - Invoice identity
//! - [`invoice`] - Shaping a bill into a renderable invoice
//! - [`session`] - Page-level billing state (editing vs. preview)
//! - [`catalog`] - Static product and gallery data
//! - [`orders`] - Past orders, their search and text bills
//! - [`validation`] - Checks for config values, invoice numbers, filenames
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use frameit_core::store::OrderItemStore;
//! use frameit_core::types::ItemField;
//!
//! let mut store = OrderItemStore::new();
//! let id = store.add_item();
//! store.update_item(&id, ItemField::Name, "Frame A");
//! store.update_item(&id, ItemField::Price, "100");
//! store.update_item(&id, ItemField::Quantity, "2");
//!
//! let totals = store.bill_totals();
//! assert_eq!(totals.subtotal.fixed2(), "200.00");
//! assert_eq!(totals.gst.fixed2(), "36.00");
//! assert_eq!(totals.total.fixed2(), "236.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod bill_number;
pub mod billing;
pub mod catalog;
pub mod error;
pub mod invoice;
pub mod money;
pub mod orders;
pub mod parse;
pub mod session;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use bill_number::BillNumber;
pub use billing::{BillTotals, GstSplit, QuickSummary};
pub use error::{CoreError, CoreResult, ValidationError};
pub use invoice::{BusinessProfile, InvoiceDocument};
pub use money::Money;
pub use orders::{OrderQuery, OrderRecord, OrderSort};
pub use session::{BillingSession, BillingView, PreviewState};
pub use store::OrderItemStore;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// GST rate (percent) given to freshly added order items.
pub const DEFAULT_GST_RATE: u32 = 18;

/// GST slabs offered by the editing form.
///
/// Any non-negative rate is computationally valid; these are just the
/// choices the form presents.
pub const GST_SLABS: [u32; 5] = [0, 5, 12, 18, 28];

/// Quantity given to freshly added order items.
pub const DEFAULT_QUANTITY: u32 = 1;

/// Prefix of generated bill numbers (`INV-123456`).
pub const BILL_NUMBER_PREFIX: &str = "INV-";
