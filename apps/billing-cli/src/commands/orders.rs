//! # Order History Commands
//!
//! Searching past orders and saving the text bill of one of them.
//!
//! ```text
//! frameit orders [--search S] [--from DATE] [--to DATE] [--sort date|amount] [--desc]
//!      │
//!      └──► table + "Showing N of M orders"
//!
//! frameit orders bill ORD001 [--out DIR]
//!      │
//!      └──► bill text printed, bill_<id>_<customer>.txt saved
//! ```

use std::path::PathBuf;

use comfy_table::{Cell, CellAlignment, Table};
use tracing::info;

use frameit_core::orders::{get_order, order_history, query_orders, OrderQuery, NO_ORDERS_MESSAGE};
use frameit_export::{DirectorySink, DocumentSink};

use crate::commands::amount;
use crate::error::AppResult;
use crate::state::ConfigState;

/// Lists past orders matching `query`.
pub fn list_orders(query: &OrderQuery, config: &ConfigState, json: bool) -> AppResult<String> {
    let list = query_orders(query);

    if json {
        return Ok(serde_json::to_string_pretty(&list)?);
    }
    if list.is_empty() {
        return Ok(NO_ORDERS_MESSAGE.to_string());
    }

    let mut table = Table::new();
    table.set_header(vec!["Order", "Customer", "Date", "Products", "Total"]);
    for order in &list {
        table.add_row(vec![
            Cell::new(order.id),
            Cell::new(order.customer_name),
            Cell::new(order.date_of_purchase),
            Cell::new(order.products.join("\n")),
            Cell::new(amount(config, order.total_amount)).set_alignment(CellAlignment::Right),
        ]);
    }
    Ok(format!(
        "{}\nShowing {} of {} orders",
        table,
        list.len(),
        order_history().len()
    ))
}

/// A saved text bill.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedBill {
    pub text: String,
    pub path: PathBuf,
}

/// Prints the bill of order `id` and saves it as a text file.
pub async fn save_order_bill(
    id: &str,
    config: &ConfigState,
    out_dir: Option<PathBuf>,
) -> AppResult<SavedBill> {
    let order = get_order(id)?;
    let text = order.bill_text(&config.currency_symbol);

    let dir = out_dir.unwrap_or_else(|| config.resolved_output_dir());
    let filename = order.bill_filename();
    info!(order = order.id, dir = %dir.display(), %filename, "Saving order bill");

    let path = DirectorySink::new(dir)
        .save(&filename, text.clone().into_bytes())
        .await?;
    Ok(SavedBill { text, path })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use chrono::NaiveDate;
    use frameit_core::orders::OrderSort;

    #[test]
    fn test_listing_counts_matches() {
        let query = OrderQuery {
            search: Some("frame set".to_string()),
            ..Default::default()
        };
        let out = list_orders(&query, &ConfigState::default(), false).unwrap();
        assert!(out.contains("Sarah Johnson"));
        assert!(out.contains("Robert Brown"));
        assert!(out.contains("₹459.99"));
        assert!(out.ends_with("Showing 2 of 8 orders"));
    }

    #[test]
    fn test_nothing_found() {
        let query = OrderQuery {
            from: NaiveDate::from_ymd_opt(2025, 1, 1),
            ..Default::default()
        };
        let out = list_orders(&query, &ConfigState::default(), false).unwrap();
        assert_eq!(out, "No orders found matching your criteria.");
    }

    #[test]
    fn test_json_listing_follows_sort() {
        let query = OrderQuery {
            sort: Some(OrderSort::Amount),
            descending: true,
            ..Default::default()
        };
        let out = list_orders(&query, &ConfigState::default(), true).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json[0]["id"], "ORD004");
        assert_eq!(json[0]["customer_name"], "Emily Wilson");
        assert_eq!(json.as_array().unwrap().len(), 8);
    }

    #[tokio::test]
    async fn test_order_bill_saved_as_text() {
        let dir = tempfile::tempdir().unwrap();
        let saved = save_order_bill("ord001", &ConfigState::default(), Some(dir.path().to_path_buf()))
            .await
            .unwrap();

        assert_eq!(saved.path, dir.path().join("bill_ORD001_John_Smith.txt"));
        assert_eq!(std::fs::read_to_string(&saved.path).unwrap(), saved.text);
        assert!(saved.text.contains("- Metal Frame 8x10\n"));
        assert!(saved.text.contains("Total Amount: ₹299.97"));
    }

    #[tokio::test]
    async fn test_unknown_order_saves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let err = save_order_bill("ORD042", &ConfigState::default(), Some(dir.path().to_path_buf()))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Order not found: ORD042");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
