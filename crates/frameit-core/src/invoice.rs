//! # Bill Document Renderer
//!
//! Shapes customer details, valid order items and a bill number into an
//! [`InvoiceDocument`]: plain data that a terminal printer or the PDF
//! exporter can lay out without knowing any billing rules.
//!
//! ## Document Structure
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PPS Photo Frames                                  TAX INVOICE          │  header
//! │  Professional Photography & Framing Services       #INV-742318          │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │  Our Details                       │  Bill To                           │  seller
//! │  address / phone / email / web     │  name, Email:, Phone:, Address:    │  bill_to
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │  Bill Date │ Payment Method │ Status                                    │  details
//! ├──────┬──────────────────────┬─────┬───────────┬─────────┬───────────────┤
//! │ S.No │ Item Description     │ Qty │ Price (₹) │ GST (%) │ Total (₹)     │  body
//! │  1   │ Frame A              │  2  │   100.00  │   18    │    236.00     │
//! ├──────┴──────────────────────┴─────┴───────────┴─────────┴───────────────┤
//! │                                        Subtotal / CGST / SGST / Total   │  totals
//! │  Terms & Conditions                          Authorized Signature       │  terms
//! │  Thank you for your business! | ...                                     │  footer
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only valid items become rows, numbered from 1 in the order they appear.
//! With no valid item the body is a single "no items" placeholder.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::billing::{compute_aggregate_totals, compute_item_totals};
use crate::bill_number::BillNumber;
use crate::money::Money;
use crate::types::{non_blank, CustomerInfo, OrderItem};
use crate::validation::sanitize_filename;

/// Title shown above the bill number.
pub const INVOICE_TITLE: &str = "TAX INVOICE";

/// Shown in place of the customer name when none was entered.
pub const CUSTOMER_PLACEHOLDER: &str = "Customer Name";

/// Body text when the bill has no valid item.
pub const NO_ITEMS_MESSAGE: &str = "No items added to the bill";

/// Label under the signature line.
pub const SIGNATURE_LABEL: &str = "Authorized Signature";

/// Table column headings, in order.
pub const COLUMN_HEADERS: [&str; 6] = [
    "S.No",
    "Item Description",
    "Qty",
    "Price (₹)",
    "GST (%)",
    "Total (₹)",
];

// =============================================================================
// Business Profile
// =============================================================================

/// The seller printed at the top of every invoice.
///
/// Loaded from the `[business]` table of the configuration file; any key
/// left out keeps the shop's own details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessProfile {
    pub name: String,
    pub tagline: String,
    pub address_lines: Vec<String>,
    pub phone: String,
    pub email: String,
    pub website: String,
    pub payment_method: String,
    pub status: String,
    pub terms: Vec<String>,
    pub footer: String,
}

impl Default for BusinessProfile {
    fn default() -> Self {
        BusinessProfile {
            name: "PPS Photo Frames".to_string(),
            tagline: "Professional Photography & Framing Services".to_string(),
            address_lines: vec![
                "Opp DLF Phase 2, In Front of Metro Pillar No 67 A".to_string(),
                "Gurugram, Haryana 122002".to_string(),
                "India".to_string(),
            ],
            phone: "+91 9810774052".to_string(),
            email: "ppssharmaartgallery@gmail.com".to_string(),
            website: "www.PPSPhotoFrames.com".to_string(),
            payment_method: "Cash/Card/UPI".to_string(),
            status: "Pending".to_string(),
            terms: vec![
                "Payment should be made within 7 days of invoice date".to_string(),
                "Goods once sold will not be taken back".to_string(),
                "Subject to Mumbai jurisdiction".to_string(),
                "This is a computer-generated invoice".to_string(),
            ],
            footer: "Thank you for your business! | Visit us at www.frameitstudio.com"
                .to_string(),
        }
    }
}

// =============================================================================
// Invoice Document
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceHeader {
    pub business_name: String,
    pub tagline: String,
    pub title: String,
    pub bill_number: BillNumber,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SellerBlock {
    pub address_lines: Vec<String>,
    pub phone: String,
    pub email: String,
    pub website: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillToBlock {
    /// Customer name or the placeholder.
    pub name: String,
    /// `Email: ...`, `Phone: ...`, `Address: ...`, only those entered.
    pub lines: Vec<String>,
}

/// One labelled value in the bill details strip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailField {
    pub label: String,
    pub value: String,
}

/// One table row. `index` counts valid items from 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceRow {
    pub index: usize,
    pub description: String,
    pub quantity: u64,
    pub unit_price: Money,
    pub gst_rate: f64,
    pub total: Money,
}

impl InvoiceRow {
    /// The GST rate as shown in its column (`18`, `12.5`).
    pub fn gst_rate_label(&self) -> String {
        if self.gst_rate.fract() == 0.0 {
            format!("{}", self.gst_rate as u64)
        } else {
            format!("{}", self.gst_rate)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InvoiceBody {
    Rows { rows: Vec<InvoiceRow> },
    NoItems { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InvoiceTotals {
    pub subtotal: Money,
    pub cgst: Money,
    pub sgst: Money,
    pub grand_total: Money,
}

impl InvoiceTotals {
    /// Label/amount pairs in display order.
    pub fn lines(&self) -> [(&'static str, Money); 4] {
        [
            ("Subtotal:", self.subtotal),
            ("CGST:", self.cgst),
            ("SGST:", self.sgst),
            ("Grand Total:", self.grand_total),
        ]
    }
}

/// A fully shaped invoice, ready for layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceDocument {
    pub header: InvoiceHeader,
    pub seller: SellerBlock,
    pub bill_to: BillToBlock,
    pub details: Vec<DetailField>,
    pub body: InvoiceBody,
    pub totals: InvoiceTotals,
    pub terms: Vec<String>,
    pub signature_label: String,
    pub footer: String,
}

impl InvoiceDocument {
    /// The item rows; empty when the body is the placeholder.
    pub fn rows(&self) -> &[InvoiceRow] {
        match &self.body {
            InvoiceBody::Rows { rows } => rows,
            InvoiceBody::NoItems { .. } => &[],
        }
    }

    pub fn bill_number(&self) -> &BillNumber {
        &self.header.bill_number
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Formats a bill date like `16 October 2026`.
pub fn format_bill_date(date: NaiveDate) -> String {
    date.format("%-d %B %Y").to_string()
}

/// Export filename: `<brand>_Invoice_<bill number>.pdf`, made file-safe.
///
/// ```rust
/// use frameit_core::invoice::export_filename;
/// use frameit_core::BillNumber;
///
/// let number = BillNumber::from_raw("PPS/2026/014");
/// assert_eq!(export_filename("FrameIt", &number), "FrameIt_Invoice_PPS_2026_014.pdf");
/// ```
pub fn export_filename(brand: &str, bill_number: &BillNumber) -> String {
    sanitize_filename(&format!("{}_Invoice_{}.pdf", brand.trim(), bill_number))
}

/// Builds the invoice for `items`, keeping only the valid ones.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use frameit_core::invoice::{render_invoice, BusinessProfile};
/// use frameit_core::types::{CustomerInfo, ItemField, OrderItem};
/// use frameit_core::BillNumber;
///
/// let mut item = OrderItem::blank();
/// item.set_field(ItemField::Name, "Frame A");
/// item.set_field(ItemField::Price, "100");
/// item.set_field(ItemField::Quantity, "2");
///
/// let doc = render_invoice(
///     &BusinessProfile::default(),
///     &CustomerInfo::default(),
///     &[item, OrderItem::blank()],
///     &BillNumber::from_raw("INV-000001"),
///     NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
/// );
///
/// assert_eq!(doc.rows().len(), 1);
/// assert_eq!(doc.totals.grand_total.fixed2(), "236.00");
/// assert_eq!(doc.bill_to.name, "Customer Name");
/// ```
pub fn render_invoice(
    profile: &BusinessProfile,
    customer: &CustomerInfo,
    items: &[OrderItem],
    bill_number: &BillNumber,
    bill_date: NaiveDate,
) -> InvoiceDocument {
    let valid: Vec<&OrderItem> = items.iter().filter(|item| item.is_valid()).collect();

    let body = if valid.is_empty() {
        InvoiceBody::NoItems {
            message: NO_ITEMS_MESSAGE.to_string(),
        }
    } else {
        InvoiceBody::Rows {
            rows: valid
                .iter()
                .enumerate()
                .map(|(i, item)| render_row(i + 1, item))
                .collect(),
        }
    };

    let totals = compute_aggregate_totals(valid.iter().copied());
    let split = totals.gst_split();

    InvoiceDocument {
        header: InvoiceHeader {
            business_name: profile.name.clone(),
            tagline: profile.tagline.clone(),
            title: INVOICE_TITLE.to_string(),
            bill_number: bill_number.clone(),
        },
        seller: SellerBlock {
            address_lines: profile.address_lines.clone(),
            phone: profile.phone.clone(),
            email: profile.email.clone(),
            website: profile.website.clone(),
        },
        bill_to: render_bill_to(customer),
        details: vec![
            DetailField {
                label: "Bill Date".to_string(),
                value: format_bill_date(bill_date),
            },
            DetailField {
                label: "Payment Method".to_string(),
                value: profile.payment_method.clone(),
            },
            DetailField {
                label: "Status".to_string(),
                value: profile.status.clone(),
            },
        ],
        body,
        totals: InvoiceTotals {
            subtotal: totals.subtotal,
            cgst: split.cgst,
            sgst: split.sgst,
            grand_total: totals.total,
        },
        terms: profile.terms.clone(),
        signature_label: SIGNATURE_LABEL.to_string(),
        footer: profile.footer.clone(),
    }
}

fn render_row(index: usize, item: &OrderItem) -> InvoiceRow {
    InvoiceRow {
        index,
        description: item.name.trim().to_string(),
        quantity: item.parsed_quantity().or_zero() as u64,
        unit_price: Money::new(item.parsed_price().or_zero()),
        gst_rate: item.parsed_gst_rate().or_zero(),
        total: compute_item_totals(item).total,
    }
}

fn render_bill_to(customer: &CustomerInfo) -> BillToBlock {
    let lines = [
        ("Email", customer.email.as_str()),
        ("Phone", customer.phone.as_str()),
        ("Address", customer.address.as_str()),
    ]
    .into_iter()
    .filter_map(|(label, value)| non_blank(value).map(|v| format!("{}: {}", label, v)))
    .collect();

    BillToBlock {
        name: customer
            .display_name()
            .unwrap_or(CUSTOMER_PLACEHOLDER)
            .to_string(),
        lines,
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

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn render(customer: &CustomerInfo, items: &[OrderItem]) -> InvoiceDocument {
        render_invoice(
            &BusinessProfile::default(),
            customer,
            items,
            &BillNumber::from_raw("INV-742318"),
            date(),
        )
    }

    #[test]
    fn test_header_and_details() {
        let doc = render(&CustomerInfo::default(), &[]);
        assert_eq!(doc.header.business_name, "PPS Photo Frames");
        assert_eq!(doc.header.title, "TAX INVOICE");
        assert_eq!(doc.bill_number().as_str(), "INV-742318");
        assert_eq!(doc.details[0].value, "16 October 2026");
        assert_eq!(doc.details[1].value, "Cash/Card/UPI");
        assert_eq!(doc.details[2].value, "Pending");
        assert_eq!(doc.signature_label, "Authorized Signature");
        assert_eq!(doc.terms.len(), 4);
    }

    #[test]
    fn test_rows_are_renumbered_over_valid_items() {
        let items = vec![
            item("", "30", "1", "18"),
            item("Frame A", "100", "2", "18"),
            item("Frame B", "", "1", "18"),
            item("Frame C", "50", "1", "0"),
        ];
        let doc = render(&CustomerInfo::default(), &items);

        let rows = doc.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!((rows[0].index, rows[0].description.as_str()), (1, "Frame A"));
        assert_eq!((rows[1].index, rows[1].description.as_str()), (2, "Frame C"));
        assert_eq!(rows[0].quantity, 2);
        assert_eq!(rows[0].unit_price.fixed2(), "100.00");
        assert_eq!(rows[0].gst_rate_label(), "18");
        assert_eq!(rows[0].total.fixed2(), "236.00");
    }

    #[test]
    fn test_totals_cover_valid_items_only() {
        let items = vec![item("A", "50", "1", "0"), item("", "30", "1", "18")];
        let doc = render(&CustomerInfo::default(), &items);

        assert_eq!(doc.totals.subtotal.fixed2(), "50.00");
        assert_eq!(doc.totals.cgst.fixed2(), "0.00");
        assert_eq!(doc.totals.sgst.fixed2(), "0.00");
        assert_eq!(doc.totals.grand_total.fixed2(), "50.00");
    }

    #[test]
    fn test_no_valid_items_renders_placeholder() {
        let doc = render(&CustomerInfo::default(), &[OrderItem::blank()]);
        assert_eq!(
            doc.body,
            InvoiceBody::NoItems {
                message: "No items added to the bill".to_string()
            }
        );
        assert!(doc.rows().is_empty());
        assert!(doc.totals.grand_total.is_zero());
    }

    #[test]
    fn test_bill_to_shows_only_entered_fields() {
        let customer = CustomerInfo {
            name: "Asha Verma".to_string(),
            phone: "98100 00000".to_string(),
            address: "  ".to_string(),
            ..Default::default()
        };
        let doc = render(&customer, &[]);
        assert_eq!(doc.bill_to.name, "Asha Verma");
        assert_eq!(doc.bill_to.lines, vec!["Phone: 98100 00000".to_string()]);

        let doc = render(&CustomerInfo::default(), &[]);
        assert_eq!(doc.bill_to.name, "Customer Name");
        assert!(doc.bill_to.lines.is_empty());
    }

    #[test]
    fn test_gst_rate_label() {
        let doc = render(&CustomerInfo::default(), &[item("A", "10", "1", "12.5")]);
        assert_eq!(doc.rows()[0].gst_rate_label(), "12.5");
    }
}
