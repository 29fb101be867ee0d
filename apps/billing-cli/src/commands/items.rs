//! # Item Commands
//!
//! Order item editing. Every edit goes through the item store; nothing
//! here validates or rejects what the user types.
//!
//! ```text
//! item add          ──► store.add_item()           ──► new blank line
//! item update ID F V ──► store.update_item(ID, F, V) ──► one field replaced
//! item remove ID    ──► store.remove_item(ID)       ──► line gone
//! item add-product N ──► store.add_product(catalog #N)
//! ```

use frameit_core::catalog::get_product;
use frameit_core::parse::{parse_decimal, ParsedNumber};
use frameit_core::types::{ItemField, ItemId};
use frameit_core::validation::is_standard_gst_slab;
use frameit_core::GST_SLABS;

use crate::commands::amount;
use crate::error::{AppError, AppResult};
use crate::state::{ConfigState, SessionState};

/// Appends a blank item.
pub fn add_item(session: &SessionState) -> String {
    let id = session.with_session_mut(|s| s.store.add_item());
    format!("Added item {}", id)
}

/// Removes an item by id.
pub fn remove_item(session: &SessionState, id: &str) -> AppResult<String> {
    let id = ItemId::from(id);
    if !session.with_session_mut(|s| s.store.remove_item(&id)) {
        return Err(AppError::not_found("Item", id.as_str()));
    }

    let remaining = session.with_session(|s| s.store.len());
    Ok(if remaining == 0 {
        format!("Removed item {}; the bill is empty again", id)
    } else {
        format!("Removed item {} ({} left)", id, remaining)
    })
}

/// Replaces one field of an item with `value` as typed.
///
/// ## Returns
/// A confirmation, plus the line total when the item is now valid.
pub fn update_item(
    session: &SessionState,
    config: &ConfigState,
    id: &str,
    field: &str,
    value: &str,
) -> AppResult<String> {
    let field: ItemField = field.parse()?;
    let id = ItemId::from(id);

    session.with_session_mut(|s| {
        if !s.store.update_item(&id, field, value) {
            return Err(AppError::not_found("Item", id.as_str()));
        }

        let mut out = format!("Set {} of {} to \"{}\"", field, id, value);
        if field == ItemField::GstRate {
            if let ParsedNumber::Value(rate) = parse_decimal(value) {
                if !is_standard_gst_slab(rate) {
                    let slabs: Vec<String> = GST_SLABS.iter().map(|slab| slab.to_string()).collect();
                    out.push_str(&format!(
                        "\nNote: {}% is not a standard GST slab ({})",
                        value.trim(),
                        slabs.join(", ")
                    ));
                }
            }
        }
        match s.store.line_totals(&id) {
            Some(totals) => out.push_str(&format!(
                "\nSubtotal: {}  GST: {}  Total: {}",
                amount(config, totals.subtotal),
                amount(config, totals.gst),
                amount(config, totals.total)
            )),
            None => out.push_str("\nItem is incomplete: it needs a name and a price"),
        }
        Ok(out)
    })
}

/// Appends an item seeded from catalog product `product_id`.
pub fn add_product(session: &SessionState, product_id: u32) -> AppResult<String> {
    let product = get_product(product_id)?;
    let id = session.with_session_mut(|s| s.store.add_product(product));
    Ok(format!("Added {} ({}) as item {}", product.title, product.size, id))
}
