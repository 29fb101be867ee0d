//! # Domain Types
//!
//! Core domain types used throughout FrameIt billing.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   OrderItem     │   │  CustomerInfo   │   │   ItemField     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (ItemId)    │   │  name           │   │  Name           │       │
//! │  │  name    (text) │   │  email          │   │  Price          │       │
//! │  │  price   (text) │   │  phone          │   │  Quantity       │       │
//! │  │  quantity(text) │   │  address        │   │  GstRate        │       │
//! │  │  gst_rate(text) │   │  invoice_number?│   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Raw Text Fields
//! An order item stores exactly what was typed. `"12a"` in the price box is
//! a legitimate mid-edit state, so numbers are parsed on read (see
//! [`crate::parse`]) and never on write.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;
use uuid::Uuid;

use crate::catalog::Product;
use crate::error::CoreError;
use crate::parse::{parse_count, parse_decimal, ParsedNumber};
use crate::{DEFAULT_GST_RATE, DEFAULT_QUANTITY};

// =============================================================================
// Item Identity
// =============================================================================

/// Opaque, stable identifier of an order item.
///
/// Generated once when the item is added; used as the editing and removal
/// key for the item's whole lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemId(String);

impl ItemId {
    /// Generates a fresh UUID v4 identifier.
    pub fn generate() -> Self {
        ItemId(Uuid::new_v4().to_string())
    }

    /// Returns the identifier text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        ItemId(s.to_string())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        ItemId(s)
    }
}

// =============================================================================
// Order Item
// =============================================================================

/// One line of a bill being edited.
///
/// ## Validity
/// An item counts toward the bill only when its name is non-blank AND its
/// price parses to a number. Invalid items stay editable but are excluded
/// from totals and from the invoice table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderItem {
    /// Stable identifier.
    pub id: ItemId,

    /// Free-text description. Empty while the user has not typed it yet.
    #[serde(default)]
    pub name: String,

    /// Unit price as typed.
    #[serde(default, deserialize_with = "text_or_number")]
    pub price: String,

    /// Quantity as typed. Missing from a saved item means 1.
    #[serde(default = "default_quantity", deserialize_with = "text_or_number")]
    pub quantity: String,

    /// GST percentage as typed. Missing from a saved item means 18.
    #[serde(default = "default_gst_rate", deserialize_with = "text_or_number")]
    pub gst_rate: String,
}

impl OrderItem {
    /// Creates a blank item: no name, no price, quantity 1, default GST.
    pub fn blank() -> Self {
        Self::blank_with_gst(DEFAULT_GST_RATE as f64)
    }

    /// Creates a blank item carrying a caller-chosen GST rate.
    pub fn blank_with_gst(gst_rate: f64) -> Self {
        OrderItem {
            id: ItemId::generate(),
            name: String::new(),
            price: String::new(),
            quantity: DEFAULT_QUANTITY.to_string(),
            gst_rate: format_number(gst_rate),
        }
    }

    /// Seeds an item from a catalog product.
    ///
    /// ## Example
    /// ```rust
    /// use frameit_core::catalog::find_product;
    /// use frameit_core::types::OrderItem;
    ///
    /// let product = find_product(1).unwrap();
    /// let item = OrderItem::from_product(product, 18.0);
    /// assert_eq!(item.name, "Premium Wooden Frame (12x18 inches)");
    /// assert_eq!(item.price, "899");
    /// assert!(item.is_valid());
    /// ```
    pub fn from_product(product: &Product, gst_rate: f64) -> Self {
        OrderItem {
            id: ItemId::generate(),
            name: format!("{} ({})", product.title, product.size),
            price: format_number(product.price as f64),
            quantity: DEFAULT_QUANTITY.to_string(),
            gst_rate: format_number(gst_rate),
        }
    }

    /// Parsed unit price.
    #[inline]
    pub fn parsed_price(&self) -> ParsedNumber {
        parse_decimal(&self.price)
    }

    /// Parsed quantity (whole units).
    #[inline]
    pub fn parsed_quantity(&self) -> ParsedNumber {
        parse_count(&self.quantity)
    }

    /// Parsed GST percentage.
    #[inline]
    pub fn parsed_gst_rate(&self) -> ParsedNumber {
        parse_decimal(&self.gst_rate)
    }

    /// True when the item has a name and a parseable price.
    ///
    /// A price of `"0"` is a real price; only blank or unparseable text
    /// disqualifies the item.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty() && self.parsed_price().is_value()
    }

    /// Replaces exactly one field with new raw text.
    pub fn set_field(&mut self, field: ItemField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ItemField::Name => self.name = value,
            ItemField::Price => self.price = value,
            ItemField::Quantity => self.quantity = value,
            ItemField::GstRate => self.gst_rate = value,
        }
    }

    /// Returns the raw text of one field.
    pub fn field(&self, field: ItemField) -> &str {
        match field {
            ItemField::Name => &self.name,
            ItemField::Price => &self.price,
            ItemField::Quantity => &self.quantity,
            ItemField::GstRate => &self.gst_rate,
        }
    }
}

impl Default for OrderItem {
    fn default() -> Self {
        OrderItem::blank()
    }
}

/// Formats a number the way a number input shows it (`18`, `99.5`).
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn default_quantity() -> String {
    DEFAULT_QUANTITY.to_string()
}

fn default_gst_rate() -> String {
    DEFAULT_GST_RATE.to_string()
}

/// Accepts `"100"`, `100`, `99.5` or `null` and keeps it as text.
fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
        Null(()),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(f) => format_number(f),
        Raw::Null(()) => String::new(),
    })
}

// =============================================================================
// Item Field
// =============================================================================

/// The editable fields of an order item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ItemField {
    Name,
    Price,
    Quantity,
    GstRate,
}

impl FromStr for ItemField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(ItemField::Name),
            "price" => Ok(ItemField::Price),
            "quantity" | "qty" => Ok(ItemField::Quantity),
            "gst" | "gst_rate" | "gstrate" => Ok(ItemField::GstRate),
            other => Err(CoreError::UnknownField(other.to_string())),
        }
    }
}

impl fmt::Display for ItemField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ItemField::Name => "name",
            ItemField::Price => "price",
            ItemField::Quantity => "quantity",
            ItemField::GstRate => "gst",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Customer Info
// =============================================================================

/// Who the bill is for. Free text; nothing here blocks bill creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomerInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    /// Invoice number typed by the user; a generated one is used otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
}

impl CustomerInfo {
    /// The trimmed name, or `None` when blank.
    pub fn display_name(&self) -> Option<&str> {
        non_blank(&self.name)
    }

    /// The trimmed invoice number, or `None` when absent or blank.
    pub fn requested_invoice_number(&self) -> Option<&str> {
        self.invoice_number.as_deref().and_then(non_blank)
    }
}

/// Trims `s` and returns it unless nothing is left.
pub(crate) fn non_blank(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_item_defaults() {
        let item = OrderItem::blank();
        assert_eq!(item.name, "");
        assert_eq!(item.price, "");
        assert_eq!(item.quantity, "1");
        assert_eq!(item.gst_rate, "18");
        assert!(!item.is_valid());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = OrderItem::blank();
        let b = OrderItem::blank();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_validity_rules() {
        let mut item = OrderItem::blank();
        item.set_field(ItemField::Name, "Frame A");
        assert!(!item.is_valid(), "missing price");

        item.set_field(ItemField::Price, "abc");
        assert!(!item.is_valid(), "unparseable price");

        item.set_field(ItemField::Price, "0");
        assert!(item.is_valid(), "zero is a price");

        item.set_field(ItemField::Name, "   ");
        assert!(!item.is_valid(), "blank name");
    }

    #[test]
    fn test_set_field_touches_one_field() {
        let mut item = OrderItem::blank();
        let before = item.clone();
        item.set_field(ItemField::Quantity, "3");
        assert_eq!(item.quantity, "3");
        assert_eq!(item.name, before.name);
        assert_eq!(item.price, before.price);
        assert_eq!(item.gst_rate, before.gst_rate);
        assert_eq!(item.id, before.id);
    }

    #[test]
    fn test_item_field_from_str() {
        assert_eq!("name".parse::<ItemField>().unwrap(), ItemField::Name);
        assert_eq!("QTY".parse::<ItemField>().unwrap(), ItemField::Quantity);
        assert_eq!("gst".parse::<ItemField>().unwrap(), ItemField::GstRate);
        assert!(matches!(
            "colour".parse::<ItemField>(),
            Err(CoreError::UnknownField(_))
        ));
    }

    #[test]
    fn test_deserialize_accepts_numbers_or_text() {
        let json = r#"{"id":"a","name":"Frame","price":100,"quantity":"2","gst_rate":12.5}"#;
        let item: OrderItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.price, "100");
        assert_eq!(item.quantity, "2");
        assert_eq!(item.gst_rate, "12.5");

        let json = r#"{"id":"b","price":null}"#;
        let item: OrderItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.price, "");
        assert_eq!(item.name, "");
    }

    #[test]
    fn test_missing_quantity_and_gst_use_form_defaults() {
        let json = r#"{"id":"c","name":"Frame A","price":"100"}"#;
        let item: OrderItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.quantity, "1");
        assert_eq!(item.gst_rate, "18");
        assert_eq!(item.parsed_quantity(), ParsedNumber::Value(1.0));
        assert_eq!(crate::billing::compute_item_totals(&item).total.fixed2(), "118.00");
    }

    #[test]
    fn test_customer_helpers() {
        let mut customer = CustomerInfo::default();
        assert_eq!(customer.display_name(), None);
        customer.name = "  Asha ".to_string();
        assert_eq!(customer.display_name(), Some("Asha"));

        customer.invoice_number = Some("  ".to_string());
        assert_eq!(customer.requested_invoice_number(), None);
        customer.invoice_number = Some("PPS-42".to_string());
        assert_eq!(customer.requested_invoice_number(), Some("PPS-42"));
    }
}
