//! # Billing Calculator
//!
//! Pure GST arithmetic over order items. No side effects, no I/O, and no
//! failure path: unusable numbers count as zero.
//!
//! ## Per-Item Computation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  OrderItem { price: "100", quantity: "2", gst_rate: "18" }              │
//! │                                                                         │
//! │  price    = parse_decimal("100").or_zero()  = 100.0                     │
//! │  quantity = parse_count("2").or_zero()      =   2                       │
//! │  fraction = parse_decimal("18").or_zero()   =  0.18                     │
//! │                                                                         │
//! │  subtotal = price × quantity                = 200.00                    │
//! │  gst      = subtotal × fraction             =  36.00                    │
//! │  total    = subtotal + gst                  = 236.00                    │
//! │                                                                         │
//! │  CGST = SGST = gst / 2                      =  18.00                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Totals are derived on demand and never cached, so they always match the
//! current items.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{CustomerInfo, OrderItem};

/// Shown in the quick summary when no customer name was entered.
pub const UNSPECIFIED_CUSTOMER: &str = "Not specified";

// =============================================================================
// Totals
// =============================================================================

/// Subtotal, GST and total for one item or a whole bill.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BillTotals {
    pub subtotal: Money,
    pub gst: Money,
    pub total: Money,
}

impl BillTotals {
    /// Splits the GST amount into its central and state halves.
    pub fn gst_split(&self) -> GstSplit {
        GstSplit {
            cgst: self.gst.half(),
            sgst: self.gst.half(),
        }
    }
}

impl std::ops::Add for BillTotals {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        BillTotals {
            subtotal: self.subtotal + other.subtotal,
            gst: self.gst + other.gst,
            total: self.total + other.total,
        }
    }
}

/// Central / State GST halves. A presentation split, not a second tax.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GstSplit {
    pub cgst: Money,
    pub sgst: Money,
}

// =============================================================================
// Calculator
// =============================================================================

/// Computes subtotal, GST and total for one item.
///
/// Never fails. Empty or unparseable price, quantity or GST text counts
/// as zero, so a half-typed item yields zeros instead of an error.
///
/// ## Example
/// ```rust
/// use frameit_core::billing::compute_item_totals;
/// use frameit_core::types::{ItemField, OrderItem};
///
/// let mut item = OrderItem::blank();
/// item.set_field(ItemField::Price, "100");
/// item.set_field(ItemField::Quantity, "2");
///
/// let totals = compute_item_totals(&item);
/// assert_eq!(totals.total.fixed2(), "236.00");
/// ```
pub fn compute_item_totals(item: &OrderItem) -> BillTotals {
    let price = item.parsed_price().or_zero();
    let quantity = item.parsed_quantity().or_zero();
    let fraction = item.parsed_gst_rate().or_zero() / 100.0;

    let subtotal = Money::new(price) * quantity;
    let gst = subtotal * fraction;

    BillTotals {
        subtotal,
        gst,
        total: subtotal + gst,
    }
}

/// Sums [`compute_item_totals`] over every item given.
///
/// No filtering happens here. Callers that care about validity pass only
/// valid items (see [`crate::store::OrderItemStore::bill_totals`]).
pub fn compute_aggregate_totals<'a, I>(items: I) -> BillTotals
where
    I: IntoIterator<Item = &'a OrderItem>,
{
    items
        .into_iter()
        .map(compute_item_totals)
        .fold(BillTotals::default(), |acc, t| acc + t)
}

// =============================================================================
// Quick Summary
// =============================================================================

/// The side panel next to the editing form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuickSummary {
    /// Customer name, or "Not specified".
    pub customer: String,
    /// Items shown in the form, valid or not.
    pub items_added: usize,
    /// Items that will appear on the bill.
    pub valid_items: usize,
    /// Totals over valid items only.
    pub totals: BillTotals,
}

impl QuickSummary {
    /// Builds the summary from the items currently shown in the form.
    pub fn new(customer: &CustomerInfo, items: &[OrderItem]) -> Self {
        let valid: Vec<&OrderItem> = items.iter().filter(|i| i.is_valid()).collect();

        QuickSummary {
            customer: customer
                .display_name()
                .unwrap_or(UNSPECIFIED_CUSTOMER)
                .to_string(),
            items_added: items.len(),
            valid_items: valid.len(),
            totals: compute_aggregate_totals(valid),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ItemField;

    fn item(name: &str, price: &str, qty: &str, gst: &str) -> OrderItem {
        let mut item = OrderItem::blank();
        item.set_field(ItemField::Name, name);
        item.set_field(ItemField::Price, price);
        item.set_field(ItemField::Quantity, qty);
        item.set_field(ItemField::GstRate, gst);
        item
    }

    #[test]
    fn test_single_item_totals() {
        let totals = compute_item_totals(&item("Frame A", "100", "2", "18"));
        assert_eq!(totals.subtotal.fixed2(), "200.00");
        assert_eq!(totals.gst.fixed2(), "36.00");
        assert_eq!(totals.total.fixed2(), "236.00");

        let split = totals.gst_split();
        assert_eq!(split.cgst.fixed2(), "18.00");
        assert_eq!(split.sgst.fixed2(), "18.00");
    }

    #[test]
    fn test_unparseable_fields_give_zero() {
        for (price, qty, gst) in [("", "2", "18"), ("abc", "2", "18"), ("100", "", "18")] {
            let totals = compute_item_totals(&item("X", price, qty, gst));
            assert!(totals.subtotal.is_zero());
            assert!(totals.gst.is_zero());
            assert!(totals.total.is_zero());
        }

        // unusable GST only drops the tax
        let totals = compute_item_totals(&item("X", "50", "1", "n/a"));
        assert_eq!(totals.subtotal.fixed2(), "50.00");
        assert!(totals.gst.is_zero());
    }

    #[test]
    fn test_quantity_is_whole_units() {
        let totals = compute_item_totals(&item("X", "10", "2.9", "0"));
        assert_eq!(totals.subtotal.fixed2(), "20.00");
    }

    #[test]
    fn test_aggregate_does_not_filter() {
        let items = vec![item("A", "50", "1", "0"), item("", "30", "1", "18")];
        let totals = compute_aggregate_totals(&items);
        assert_eq!(totals.subtotal.fixed2(), "80.00");
        assert_eq!(totals.gst.fixed2(), "5.40");
    }

    #[test]
    fn test_aggregate_of_nothing_is_zero() {
        let totals = compute_aggregate_totals(std::iter::empty::<&OrderItem>());
        assert_eq!(totals, BillTotals::default());
    }

    #[test]
    fn test_quick_summary() {
        let items = vec![
            item("A", "50", "1", "0"),
            item("", "30", "1", "18"),
            item("B", "100", "1", "18"),
        ];
        let summary = QuickSummary::new(&CustomerInfo::default(), &items);

        assert_eq!(summary.customer, "Not specified");
        assert_eq!(summary.items_added, 3);
        assert_eq!(summary.valid_items, 2);
        assert_eq!(summary.totals.subtotal.fixed2(), "150.00");
        assert_eq!(summary.totals.gst.fixed2(), "18.00");
        assert_eq!(summary.totals.total.fixed2(), "168.00");
    }
}
