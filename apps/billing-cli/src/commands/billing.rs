//! # Billing Commands
//!
//! The billing page from the command line.
//!
//! ## Billing Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Billing Lifecycle                                    │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │   new    │────►│ editing  │────►│ preview  │────►│  export  │       │
//! │  │          │     │          │     │          │     │  (PDF)   │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                 │                              │
//! │                   customer          no valid item?                     │
//! │                   item ...          → "Please add at least one         │
//! │                   summary              item to create a bill!"         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use comfy_table::{Attribute, Cell, CellAlignment, Table};
use serde::Serialize;
use tracing::{debug, info};

use frameit_core::billing::compute_item_totals;
use frameit_core::invoice::{InvoiceBody, COLUMN_HEADERS};
use frameit_core::types::{CustomerInfo, ItemId};
use frameit_core::{BillTotals, InvoiceDocument, QuickSummary};

use crate::commands::amount;
use crate::error::{AppError, AppResult, ErrorCode};
use crate::state::{ConfigState, OrderFile, SessionState};

// =============================================================================
// new
// =============================================================================

/// Writes a fresh order file.
pub fn new_order(path: &Path, force: bool, config: &ConfigState) -> AppResult<String> {
    if path.exists() && !force {
        return Err(AppError::new(
            ErrorCode::ValidationError,
            format!("{} already exists (use --force to start over)", path.display()),
        ));
    }

    let order = OrderFile::blank(config.default_gst_rate);
    order.save(path)?;
    info!(path = %path.display(), "New bill started");

    let id = order.items.first().map(|i| i.id.to_string()).unwrap_or_default();
    Ok(format!(
        "Started a new bill in {}\nBlank item: {}",
        path.display(),
        id
    ))
}

// =============================================================================
// customer
// =============================================================================

/// Customer fields to change; `None` leaves a field as it is.
#[derive(Debug, Clone, Default)]
pub struct CustomerUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub invoice_number: Option<String>,
}

impl CustomerUpdate {
    fn apply(self, customer: &mut CustomerInfo) {
        if let Some(name) = self.name {
            customer.name = name;
        }
        if let Some(email) = self.email {
            customer.email = email;
        }
        if let Some(phone) = self.phone {
            customer.phone = phone;
        }
        if let Some(address) = self.address {
            customer.address = address;
        }
        if let Some(number) = self.invoice_number {
            customer.invoice_number = if number.trim().is_empty() {
                None
            } else {
                Some(number)
            };
        }
    }
}

/// Updates customer details. Nothing here is validated or required.
pub fn update_customer(session: &SessionState, update: CustomerUpdate) -> String {
    session.with_session_mut(|s| {
        update.apply(&mut s.customer);
        debug!(customer = ?s.customer.display_name(), "Customer details updated");
        format!("Customer: {}", s.quick_summary().customer)
    })
}

// =============================================================================
// summary
// =============================================================================

/// One row of the editing form.
#[derive(Debug, Clone, Serialize)]
pub struct ItemLine {
    pub id: ItemId,
    pub name: String,
    pub price: String,
    pub quantity: String,
    pub gst_rate: String,
    pub valid: bool,
    /// Present for valid items only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub totals: Option<BillTotals>,
}

/// Quick summary plus the per-item lines.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryView {
    #[serde(flatten)]
    pub summary: QuickSummary,
    pub items: Vec<ItemLine>,
}

pub fn summary_view(session: &SessionState) -> SummaryView {
    session.with_session(|s| SummaryView {
        summary: s.quick_summary(),
        items: s
            .store
            .visible_items()
            .iter()
            .map(|item| {
                let valid = item.is_valid();
                ItemLine {
                    id: item.id.clone(),
                    name: item.name.clone(),
                    price: item.price.clone(),
                    quantity: item.quantity.clone(),
                    gst_rate: item.gst_rate.clone(),
                    valid,
                    totals: valid.then(|| compute_item_totals(item)),
                }
            })
            .collect(),
    })
}

/// Prints the editing form and its quick summary.
pub fn summary(session: &SessionState, config: &ConfigState, json: bool) -> AppResult<String> {
    let view = summary_view(session);
    if json {
        return Ok(serde_json::to_string_pretty(&view)?);
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "Id", "Item", "Price", "Qty", "GST %", "Total"]);
    for (i, line) in view.items.iter().enumerate() {
        let total = match &line.totals {
            Some(t) => Cell::new(amount(config, t.total)),
            None => Cell::new("incomplete").add_attribute(Attribute::Dim),
        };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&line.id),
            Cell::new(&line.name),
            Cell::new(&line.price),
            Cell::new(&line.quantity),
            Cell::new(&line.gst_rate),
            total.set_alignment(CellAlignment::Right),
        ]);
    }

    let s = &view.summary;
    Ok(format!(
        "{table}\n\nCustomer:     {}\nItems added:  {}\nValid items:  {}\nSubtotal:     {}\nGST:          {}\nTotal:        {}",
        s.customer,
        s.items_added,
        s.valid_items,
        amount(config, s.totals.subtotal),
        amount(config, s.totals.gst),
        amount(config, s.totals.total),
    ))
}

// =============================================================================
// preview
// =============================================================================

/// Creates the bill preview and renders the invoice.
///
/// Fails with `PRECONDITION_FAILED` when no item is valid; the session
/// then stays in editing mode.
pub fn create_preview(
    session: &SessionState,
    config: &ConfigState,
    now: DateTime<Utc>,
    bill_date: NaiveDate,
) -> AppResult<InvoiceDocument> {
    session.with_session_mut(|s| -> AppResult<InvoiceDocument> {
        s.create_preview(now)?;
        Ok(s.render_preview(&config.business, bill_date)?)
    })
}

pub fn preview(
    session: &SessionState,
    config: &ConfigState,
    now: DateTime<Utc>,
    bill_date: NaiveDate,
) -> AppResult<String> {
    let doc = create_preview(session, config, now, bill_date)?;
    Ok(render_invoice_text(&doc, config))
}

/// The invoice as terminal text.
pub fn render_invoice_text(doc: &InvoiceDocument, config: &ConfigState) -> String {
    let mut out = String::new();
    let h = &doc.header;
    out.push_str(&format!("{}    {} #{}\n", h.business_name, h.title, h.bill_number));
    out.push_str(&format!("{}\n\n", h.tagline));

    out.push_str("Bill To\n");
    out.push_str(&format!("  {}\n", doc.bill_to.name));
    for line in &doc.bill_to.lines {
        out.push_str(&format!("  {}\n", line));
    }
    out.push('\n');

    let details: Vec<String> = doc
        .details
        .iter()
        .map(|d| format!("{}: {}", d.label, d.value))
        .collect();
    out.push_str(&details.join("  |  "));
    out.push_str("\n\n");

    match &doc.body {
        InvoiceBody::Rows { rows } => {
            let mut table = Table::new();
            table.set_header(COLUMN_HEADERS.to_vec());
            for row in rows {
                table.add_row(vec![
                    Cell::new(row.index),
                    Cell::new(&row.description),
                    Cell::new(row.quantity).set_alignment(CellAlignment::Center),
                    Cell::new(row.unit_price.fixed2()).set_alignment(CellAlignment::Right),
                    Cell::new(row.gst_rate_label()).set_alignment(CellAlignment::Right),
                    Cell::new(row.total.fixed2()).set_alignment(CellAlignment::Right),
                ]);
            }
            out.push_str(&format!("{table}\n"));
        }
        InvoiceBody::NoItems { message } => {
            out.push_str(&format!("{}\n", message));
        }
    }

    let mut totals = Table::new();
    for (label, value) in doc.totals.lines() {
        totals.add_row(vec![
            Cell::new(label).add_attribute(Attribute::Bold),
            Cell::new(amount(config, value)).set_alignment(CellAlignment::Right),
        ]);
    }
    out.push_str(&format!("{totals}\n"));

    if !doc.terms.is_empty() {
        out.push_str("\nTerms & Conditions:\n");
        for term in &doc.terms {
            out.push_str(&format!("  • {}\n", term));
        }
    }
    out.push_str(&format!("\n{}\n{}", doc.signature_label, doc.footer));
    out
}
