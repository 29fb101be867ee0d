//! # Order History
//!
//! Past orders bundled with the application, and the query the order
//! history page runs over them.
//!
//! ```text
//! order_history() ──► OrderQuery::matches (search, from..=to) ──► sort
//!                                                                  │
//!                                  date / amount, asc / desc, or as listed
//!
//! get_order(id) ──► bill_text(currency) + bill_filename()
//! ```
//!
//! Dates are ISO `YYYY-MM-DD` text, so comparing the text compares the days.

use chrono::NaiveDate;
use serde::Serialize;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

/// Shown instead of an empty order list.
pub const NO_ORDERS_MESSAGE: &str = "No orders found matching your criteria.";

// =============================================================================
// Records
// =============================================================================

/// One past order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderRecord {
    pub id: &'static str,
    pub customer_name: &'static str,
    /// ISO date, e.g. `"2024-01-15"`.
    pub date_of_purchase: &'static str,
    pub products: &'static [&'static str],
    pub total_amount: Money,
}

static ORDERS: [OrderRecord; 8] = [
    OrderRecord {
        id: "ORD001",
        customer_name: "John Smith",
        date_of_purchase: "2024-01-15",
        products: &["Wooden Frame A4", "Glass Frame 5x7", "Metal Frame 8x10"],
        total_amount: Money::new(299.97),
    },
    OrderRecord {
        id: "ORD002",
        customer_name: "Sarah Johnson",
        date_of_purchase: "2024-01-14",
        products: &["Premium Frame Set", "Custom Frame 11x14"],
        total_amount: Money::new(459.99),
    },
    OrderRecord {
        id: "ORD003",
        customer_name: "Michael Davis",
        date_of_purchase: "2024-01-13",
        products: &["Basic Frame A3", "Photo Print Package"],
        total_amount: Money::new(189.50),
    },
    OrderRecord {
        id: "ORD004",
        customer_name: "Emily Wilson",
        date_of_purchase: "2024-01-12",
        products: &["Luxury Frame Gold", "LED Frame Light"],
        total_amount: Money::new(699.99),
    },
    OrderRecord {
        id: "ORD005",
        customer_name: "Robert Brown",
        date_of_purchase: "2024-01-11",
        products: &["Wall Frame Set", "Table Frame Small"],
        total_amount: Money::new(125.00),
    },
    OrderRecord {
        id: "ORD006",
        customer_name: "Jessica Martinez",
        date_of_purchase: "2024-01-10",
        products: &["Custom Frame Large", "Matte Finish"],
        total_amount: Money::new(350.75),
    },
    OrderRecord {
        id: "ORD007",
        customer_name: "David Anderson",
        date_of_purchase: "2024-01-09",
        products: &["Frame Bundle", "Cleaning Kit"],
        total_amount: Money::new(275.80),
    },
    OrderRecord {
        id: "ORD008",
        customer_name: "Lisa Thompson",
        date_of_purchase: "2024-01-08",
        products: &["Vintage Frame", "Stand Pack"],
        total_amount: Money::new(420.00),
    },
];

/// All past orders, newest first.
pub fn order_history() -> &'static [OrderRecord] {
    &ORDERS
}

/// Looks up an order by id, ignoring ASCII case.
pub fn find_order(id: &str) -> Option<&'static OrderRecord> {
    let id = id.trim();
    ORDERS.iter().find(|o| o.id.eq_ignore_ascii_case(id))
}

/// Like [`find_order`], but a miss is an error.
pub fn get_order(id: &str) -> CoreResult<&'static OrderRecord> {
    find_order(id).ok_or_else(|| CoreError::OrderNotFound(id.trim().to_string()))
}

impl OrderRecord {
    /// Case-insensitive match on the customer, the order id or any product.
    pub fn mentions(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.customer_name.to_lowercase().contains(&needle)
            || self.id.to_lowercase().contains(&needle)
            || self
                .products
                .iter()
                .any(|p| p.to_lowercase().contains(&needle))
    }

    /// Plain-text bill for a past order.
    ///
    /// ```rust
    /// use frameit_core::orders::get_order;
    ///
    /// let bill = get_order("ORD005").unwrap().bill_text("₹");
    /// assert!(bill.starts_with("ORDER BILL - ORD005\n"));
    /// assert!(bill.contains("Total Amount: ₹125.00"));
    /// ```
    pub fn bill_text(&self, currency: &str) -> String {
        let mut out = format!(
            "ORDER BILL - {}\n\
             ========================\n\
             Customer: {}\n\
             Date: {}\n\
             ------------------------\n\
             Products:\n",
            self.id, self.customer_name, self.date_of_purchase
        );
        for product in self.products {
            out.push_str(&format!("- {}\n", product));
        }
        out.push_str(&format!(
            "------------------------\n\
             Total Amount: {}\n\
             ========================\n\
             Thank you for your purchase!\n",
            self.total_amount.with_label(currency)
        ));
        out
    }

    /// `bill_<id>_<customer>.txt`, with whitespace runs in the name as `_`.
    pub fn bill_filename(&self) -> String {
        let name = self.customer_name.split_whitespace().collect::<Vec<_>>().join("_");
        format!("bill_{}_{}.txt", self.id, name)
    }
}

// =============================================================================
// Query
// =============================================================================

/// Sort keys offered by the order history page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSort {
    Date,
    Amount,
}

impl FromStr for OrderSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date" => Ok(OrderSort::Date),
            "amount" => Ok(OrderSort::Amount),
            other => Err(format!("unknown sort '{}' (expected date or amount)", other)),
        }
    }
}

/// Search, date range and ordering for [`query_orders`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderQuery {
    /// Blank matches everything.
    pub search: Option<String>,
    /// First day to include.
    pub from: Option<NaiveDate>,
    /// Last day to include.
    pub to: Option<NaiveDate>,
    /// `None` keeps the listed order.
    pub sort: Option<OrderSort>,
    pub descending: bool,
}

impl OrderQuery {
    /// True when `order` passes the search and the date range.
    pub fn matches(&self, order: &OrderRecord) -> bool {
        let search_ok = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(needle) => order.mentions(needle),
        };
        let day = order.date_of_purchase;
        let from_ok = self
            .from
            .map_or(true, |from| day >= from.format("%Y-%m-%d").to_string().as_str());
        let to_ok = self
            .to
            .map_or(true, |to| day <= to.format("%Y-%m-%d").to_string().as_str());
        search_ok && from_ok && to_ok
    }
}

/// Applies the filters of `query`, then its sort. Sorting is stable.
///
/// ```rust
/// use frameit_core::orders::{query_orders, OrderQuery, OrderSort};
///
/// let query = OrderQuery { sort: Some(OrderSort::Amount), ..Default::default() };
/// let cheapest = query_orders(&query)[0];
/// assert_eq!(cheapest.id, "ORD005");
/// ```
pub fn query_orders(query: &OrderQuery) -> Vec<&'static OrderRecord> {
    let mut list: Vec<&'static OrderRecord> = ORDERS.iter().filter(|o| query.matches(o)).collect();

    if let Some(sort) = query.sort {
        list.sort_by(|a, b| {
            let ordering = match sort {
                OrderSort::Date => a.date_of_purchase.cmp(b.date_of_purchase),
                OrderSort::Amount => a.total_amount.amount().total_cmp(&b.total_amount.amount()),
            };
            if query.descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
    }
    list
}

// =============================================================================
// Unit Tests
// =============================================================================
