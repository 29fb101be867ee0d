//! # Session State
//!
//! The billing session behind every command, plus the JSON order file it
//! is loaded from and written back to.
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One CLI Invocation                                   │
//! │                                                                         │
//! │  bill.json ──► OrderFile::load ──► SessionState (BillingSession)        │
//! │                                          │                              │
//! │                               with_session_mut(|s| ...)                 │
//! │                                          │                              │
//! │  bill.json ◄── OrderFile::save ◄─────────┘   (editing commands only)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The order file holds the customer details and the items exactly as the
//! form shows them. Preview state is never written; it lives only for the
//! command that creates it.

use std::path::Path;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::debug;

use frameit_core::types::{CustomerInfo, OrderItem};
use frameit_core::{BillingSession, OrderItemStore};

use crate::error::{AppError, AppResult, ErrorCode};

/// JSON snapshot of the billing form.
///
/// ```json
/// {
///   "customer": { "name": "Asha Verma", "phone": "98765 43210" },
///   "items": [
///     { "id": "…", "name": "Frame A", "price": "100", "quantity": "2", "gst_rate": "18" }
///   ]
/// }
/// ```
///
/// Numeric fields may also be written as JSON numbers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OrderFile {
    #[serde(default)]
    pub customer: CustomerInfo,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

impl OrderFile {
    /// A fresh form: no customer details, one blank item.
    pub fn blank(default_gst_rate: f64) -> Self {
        OrderFile {
            customer: CustomerInfo::default(),
            items: vec![OrderItem::blank_with_gst(default_gst_rate)],
        }
    }

    pub fn load(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let order: OrderFile = serde_json::from_str(&content).map_err(|e| {
            AppError::new(
                ErrorCode::IoError,
                format!("Invalid order file {}: {}", path.display(), e),
            )
        })?;
        debug!(path = %path.display(), items = order.items.len(), "Order file loaded");
        Ok(order)
    }

    pub fn save(&self, path: &Path) -> AppResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        debug!(path = %path.display(), items = self.items.len(), "Order file saved");
        Ok(())
    }

    /// Snapshot of what the form currently shows.
    ///
    /// An empty store is saved with its placeholder item, so ids printed
    /// by `summary` keep working in the next command.
    pub fn from_session(session: &BillingSession) -> Self {
        OrderFile {
            customer: session.customer.clone(),
            items: session.store.visible_items().to_vec(),
        }
    }

    pub fn into_session(self, default_gst_rate: f64) -> BillingSession {
        BillingSession::from_parts(
            self.customer,
            OrderItemStore::from_items(self.items, default_gst_rate),
        )
    }
}

/// The billing session one command works on.
///
/// Commands only see `&SessionState` and go through `with_session` /
/// `with_session_mut`; the lock is held for the closure only. The export
/// pipeline never touches the session: it gets a rendered document.
#[derive(Debug, Clone)]
pub struct SessionState {
    session: Arc<Mutex<BillingSession>>,
}

impl SessionState {
    pub fn new(session: BillingSession) -> Self {
        SessionState {
            session: Arc::new(Mutex::new(session)),
        }
    }

    /// Loads the order file at `path` into a new editing session.
    pub fn load(path: &Path, default_gst_rate: f64) -> AppResult<Self> {
        Ok(SessionState::new(
            OrderFile::load(path)?.into_session(default_gst_rate),
        ))
    }

    /// Writes the current form back to `path`.
    pub fn save(&self, path: &Path) -> AppResult<()> {
        self.with_session(OrderFile::from_session).save(path)
    }

    /// Executes a function with read access to the session.
    ///
    /// ## Panics
    /// If a previous holder of the lock panicked.
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&BillingSession) -> R,
    {
        let session = self.session.lock().expect("Session mutex poisoned");
        f(&session)
    }

    /// Executes a function with write access to the session.
    ///
    /// ## Panics
    /// If a previous holder of the lock panicked.
    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut BillingSession) -> R,
    {
        let mut session = self.session.lock().expect("Session mutex poisoned");
        f(&mut session)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(BillingSession::new())
    }
}
