//! # OrderItem Store
//!
//! The ordered, editable list of bill lines.
//!
//! ## Editing Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    OrderItem Store Operations                           │
//! │                                                                         │
//! │  Form Action              Store Method            Change                │
//! │  ───────────              ────────────            ──────                │
//! │                                                                         │
//! │  "+ Add Item" ───────────► add_item() ──────────► push(blank)          │
//! │                                                                         │
//! │  Pick catalog frame ─────► add_product() ───────► push(seeded)         │
//! │                                                                         │
//! │  Type in a field ────────► update_item() ───────► items[id].field = v  │
//! │                                                                         │
//! │  Click remove ───────────► remove_item() ───────► retain(id != x)      │
//! │                                                                         │
//! │  Render form ────────────► visible_items() ─────► (read only)          │
//! │                                                                         │
//! │  NOTE: Unknown ids are silently ignored. Insertion order is kept;      │
//! │        there is no reordering.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Blank Fallback
//! The form never shows an empty list. When the store holds no items,
//! [`OrderItemStore::visible_items`] yields one blank placeholder item. That
//! placeholder keeps a stable id, and editing it turns it into a real item.

use tracing::debug;

use crate::billing::{compute_aggregate_totals, compute_item_totals, BillTotals};
use crate::catalog::Product;
use crate::types::{ItemField, ItemId, OrderItem};
use crate::DEFAULT_GST_RATE;

/// The bill lines being edited.
///
/// ## Invariants
/// - Items keep insertion order
/// - Ids are unique and never change
/// - Nothing here fails: unknown ids are no-ops
#[derive(Debug, Clone)]
pub struct OrderItemStore {
    items: Vec<OrderItem>,
    fallback: OrderItem,
    default_gst_rate: f64,
}

impl OrderItemStore {
    /// Creates an empty store. New items get 18% GST.
    pub fn new() -> Self {
        Self::with_default_gst(DEFAULT_GST_RATE as f64)
    }

    /// Creates an empty store whose new items carry `rate` percent GST.
    pub fn with_default_gst(rate: f64) -> Self {
        OrderItemStore {
            items: Vec::new(),
            fallback: OrderItem::blank_with_gst(rate),
            default_gst_rate: rate,
        }
    }

    /// Rebuilds a store from previously saved items.
    pub fn from_items(items: Vec<OrderItem>, default_gst_rate: f64) -> Self {
        let mut store = Self::with_default_gst(default_gst_rate);
        store.items = items;
        store
    }

    /// GST percentage given to new items.
    pub fn default_gst_rate(&self) -> f64 {
        self.default_gst_rate
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Appends a blank item and returns its id.
    ///
    /// On an empty store the shown placeholder is kept as the first item,
    /// so the form gains a row instead of swapping one blank for another.
    pub fn add_item(&mut self) -> ItemId {
        self.materialize_fallback();
        let item = OrderItem::blank_with_gst(self.default_gst_rate);
        let id = item.id.clone();
        self.items.push(item);

        debug!(item_id = %id, count = self.items.len(), "Order item added");
        id
    }

    /// Appends an item seeded from a catalog product and returns its id.
    ///
    /// Like [`add_item`](Self::add_item), the placeholder row stays.
    pub fn add_product(&mut self, product: &Product) -> ItemId {
        self.materialize_fallback();
        let item = OrderItem::from_product(product, self.default_gst_rate);
        let id = item.id.clone();
        self.items.push(item);

        debug!(
            item_id = %id,
            product_id = product.id,
            count = self.items.len(),
            "Catalog product added to order"
        );
        id
    }

    /// Removes the item with `id`. Returns whether anything was removed.
    ///
    /// Removing the last item leaves the store empty; the form then shows
    /// a fresh blank placeholder.
    pub fn remove_item(&mut self, id: &ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.id != id);
        let removed = self.items.len() != before;

        if removed {
            if self.items.is_empty() {
                self.fallback = OrderItem::blank_with_gst(self.default_gst_rate);
            }
            debug!(item_id = %id, count = self.items.len(), "Order item removed");
        } else {
            debug!(item_id = %id, "Remove ignored: unknown item");
        }
        removed
    }

    /// Replaces one field of one item. Returns whether an item matched.
    ///
    /// ## Example
    /// ```rust
    /// use frameit_core::store::OrderItemStore;
    /// use frameit_core::types::{ItemField, ItemId};
    ///
    /// let mut store = OrderItemStore::new();
    /// let id = store.add_item();
    /// assert!(store.update_item(&id, ItemField::Price, "250"));
    /// assert!(!store.update_item(&ItemId::from("nope"), ItemField::Price, "1"));
    /// assert_eq!(store.get(&id).unwrap().price, "250");
    /// ```
    pub fn update_item(&mut self, id: &ItemId, field: ItemField, value: &str) -> bool {
        if self.items.is_empty() && &self.fallback.id == id {
            self.materialize_fallback();
        }

        match self.items.iter_mut().find(|item| &item.id == id) {
            Some(item) => {
                item.set_field(field, value);
                debug!(item_id = %id, %field, "Order item updated");
                true
            }
            None => {
                debug!(item_id = %id, %field, "Update ignored: unknown item");
                false
            }
        }
    }

    /// Turns the blank placeholder into a stored item.
    fn materialize_fallback(&mut self) {
        if self.items.is_empty() {
            self.items.push(self.fallback.clone());
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Looks up a shown item by id, including the blank placeholder.
    pub fn get(&self, id: &ItemId) -> Option<&OrderItem> {
        self.visible_items().iter().find(|item| &item.id == id)
    }

    /// The stored items, possibly empty.
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// The items the form shows: the stored items, or one blank
    /// placeholder when there are none.
    pub fn visible_items(&self) -> &[OrderItem] {
        if self.items.is_empty() {
            std::slice::from_ref(&self.fallback)
        } else {
            &self.items
        }
    }

    /// Items that count toward the bill, in order.
    pub fn valid_items(&self) -> Vec<&OrderItem> {
        self.items.iter().filter(|item| item.is_valid()).collect()
    }

    /// Totals shown under one item in the form.
    ///
    /// `None` when the item is unknown or not yet valid.
    pub fn line_totals(&self, id: &ItemId) -> Option<BillTotals> {
        self.get(id)
            .filter(|item| item.is_valid())
            .map(compute_item_totals)
    }

    /// Totals of the whole bill, over valid items only.
    pub fn bill_totals(&self) -> BillTotals {
        compute_aggregate_totals(self.valid_items())
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when nothing is stored (the form shows the placeholder).
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for OrderItemStore {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
