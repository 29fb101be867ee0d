//! # Commands Module
//!
//! Everything the `frameit` binary can do.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports, shared formatting)
//! ├── billing.rs  ◄─── new, customer, summary, preview
//! ├── items.rs    ◄─── item add / remove / update / add-product
//! ├── export.rs   ◄─── PDF export
//! ├── catalog.rs  ◄─── products, product, gallery
//! └── orders.rs   ◄─── orders, orders bill
//! ```
//!
//! Commands return the text to print instead of printing it, so that
//! tests can check the output and `main` decides where it goes.

pub mod billing;
pub mod catalog;
pub mod export;
pub mod items;
pub mod orders;

use frameit_core::Money;

use crate::state::ConfigState;

/// Formats an amount with the configured currency symbol, e.g. `₹236.00`.
pub(crate) fn amount(config: &ConfigState, money: Money) -> String {
    money.with_label(&config.currency_symbol)
}
