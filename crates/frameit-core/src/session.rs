//! # Billing Session
//!
//! Everything the billing page owns: customer details, the order items and
//! whether the user is editing or looking at a bill preview. The session is
//! an explicit value passed to whoever drives it; there is no global state.
//!
//! ## View Transitions
//! ```text
//!                    create_preview(now)
//!                    valid items > 0
//!   ┌───────────┐  ─────────────────────────►  ┌────────────────────────┐
//!   │  Editing  │                               │ Preview { bill_number, │
//!   │           │  ◄─────────────────────────   │           created_at } │
//!   └───────────┘        back_to_form()         └────────────────────────┘
//!        │
//!        │ create_preview(now), valid items == 0
//!        ▼
//!   Err(NoValidItems), still Editing
//! ```
//!
//! The bill number is chosen once on entering preview. Re-rendering the same
//! preview reuses it, so the on-screen number and the export filename agree.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use ts_rs::TS;

use crate::bill_number::BillNumber;
use crate::billing::QuickSummary;
use crate::error::{CoreError, CoreResult};
use crate::invoice::{export_filename, render_invoice, BusinessProfile, InvoiceDocument};
use crate::store::OrderItemStore;
use crate::types::CustomerInfo;

/// A preview in progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PreviewState {
    pub bill_number: BillNumber,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// What the billing page is showing.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum BillingView {
    #[default]
    Editing,
    Preview(PreviewState),
}

/// Page-level billing state.
#[derive(Debug, Clone, Default)]
pub struct BillingSession {
    pub customer: CustomerInfo,
    pub store: OrderItemStore,
    view: BillingView,
}

impl BillingSession {
    /// Starts an editing session with no customer details and no items.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts an editing session from existing details and items.
    pub fn from_parts(customer: CustomerInfo, store: OrderItemStore) -> Self {
        BillingSession {
            customer,
            store,
            view: BillingView::Editing,
        }
    }

    pub fn view(&self) -> &BillingView {
        &self.view
    }

    pub fn is_previewing(&self) -> bool {
        matches!(self.view, BillingView::Preview(_))
    }

    /// The current preview, if any.
    pub fn preview(&self) -> Option<&PreviewState> {
        match &self.view {
            BillingView::Preview(state) => Some(state),
            BillingView::Editing => None,
        }
    }

    /// Enters preview mode and fixes the bill number.
    ///
    /// ## User Workflow
    /// ```text
    /// Click "Create Bill Preview"
    ///      │
    ///      ├── no valid item → Err(NoValidItems), nothing changes
    ///      │
    ///      ├── already previewing → same preview returned
    ///      │
    ///      └── otherwise → bill number chosen, view = Preview
    /// ```
    pub fn create_preview(&mut self, now: DateTime<Utc>) -> CoreResult<&PreviewState> {
        if self.store.valid_items().is_empty() {
            warn!(items = self.store.len(), "Bill preview blocked: no valid items");
            return Err(CoreError::NoValidItems);
        }

        if !self.is_previewing() {
            let bill_number = BillNumber::for_customer(&self.customer, now);
            info!(
                bill_number = %bill_number,
                valid_items = self.store.valid_items().len(),
                "Bill preview created"
            );
            self.view = BillingView::Preview(PreviewState {
                bill_number,
                created_at: now,
            });
        }

        self.preview().ok_or(CoreError::NotInPreview)
    }

    /// Leaves preview mode. Items and customer details are kept.
    pub fn back_to_form(&mut self) {
        if let BillingView::Preview(state) = &self.view {
            info!(bill_number = %state.bill_number, "Back to bill form");
        }
        self.view = BillingView::Editing;
    }

    /// Renders the current preview from the current items.
    ///
    /// Every call is a fresh render; only the bill number is carried over.
    pub fn render_preview(
        &self,
        profile: &BusinessProfile,
        bill_date: NaiveDate,
    ) -> CoreResult<InvoiceDocument> {
        let state = self.preview().ok_or(CoreError::NotInPreview)?;
        Ok(render_invoice(
            profile,
            &self.customer,
            self.store.visible_items(),
            &state.bill_number,
            bill_date,
        ))
    }

    /// The side panel shown while editing.
    pub fn quick_summary(&self) -> QuickSummary {
        QuickSummary::new(&self.customer, self.store.visible_items())
    }

    /// `<brand>_Invoice_<bill number>.pdf` for the current preview.
    pub fn export_filename(&self, brand: &str) -> CoreResult<String> {
        let state = self.preview().ok_or(CoreError::NotInPreview)?;
        Ok(export_filename(brand, &state.bill_number))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ItemField;
    use chrono::TimeZone;

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn session_with_frame() -> BillingSession {
        let mut session = BillingSession::new();
        let id = session.store.visible_items()[0].id.clone();
        session.store.update_item(&id, ItemField::Name, "Frame A");
        session.store.update_item(&id, ItemField::Price, "100");
        session.store.update_item(&id, ItemField::Quantity, "2");
        session
    }

    #[test]
    fn test_preview_blocked_without_valid_items() {
        let mut session = BillingSession::new();
        session.store.add_item();

        let err = session.create_preview(at(1_792_145_742_318)).unwrap_err();
        assert!(matches!(err, CoreError::NoValidItems));
        assert!(!session.is_previewing());
        assert_eq!(session.view(), &BillingView::Editing);
    }

    #[test]
    fn test_bill_number_fixed_for_preview_lifetime() {
        let mut session = session_with_frame();
        let first = session
            .create_preview(at(1_792_145_742_318))
            .unwrap()
            .bill_number
            .clone();

        // later clicks and renders keep the same number
        let again = session
            .create_preview(at(1_792_145_799_999))
            .unwrap()
            .bill_number
            .clone();
        assert_eq!(first, again);

        let profile = BusinessProfile::default();
        let a = session.render_preview(&profile, date()).unwrap();
        let b = session.render_preview(&profile, date()).unwrap();
        assert_eq!(a.bill_number(), &first);
        assert_eq!(b.bill_number(), &first);
    }

    #[test]
    fn test_back_to_form_then_new_preview_gets_new_number() {
        let mut session = session_with_frame();
        let first = session
            .create_preview(at(1_792_145_742_318))
            .unwrap()
            .bill_number
            .clone();

        session.back_to_form();
        assert!(!session.is_previewing());
        assert_eq!(session.store.valid_items().len(), 1);

        let second = session
            .create_preview(at(1_792_145_799_999))
            .unwrap()
            .bill_number
            .clone();
        assert_ne!(first, second);
    }

    #[test]
    fn test_render_requires_preview() {
        let session = session_with_frame();
        let result = session.render_preview(&BusinessProfile::default(), date());
        assert!(matches!(result, Err(CoreError::NotInPreview)));
        assert!(matches!(
            session.export_filename("FrameIt"),
            Err(CoreError::NotInPreview)
        ));
    }

    #[test]
    fn test_render_reflects_current_items() {
        let mut session = session_with_frame();
        session.create_preview(at(1_792_145_742_318)).unwrap();

        let id = session.store.items()[0].id.clone();
        session.store.update_item(&id, ItemField::Quantity, "3");

        let doc = session
            .render_preview(&BusinessProfile::default(), date())
            .unwrap();
        assert_eq!(doc.totals.subtotal.fixed2(), "300.00");
    }

    #[test]
    fn test_export_filename() {
        let mut session = session_with_frame();
        session.create_preview(at(1_792_145_742_318)).unwrap();
        assert_eq!(
            session.export_filename("FrameIt").unwrap(),
            "FrameIt_Invoice_INV-742318.pdf"
        );
    }

    #[test]
    fn test_quick_summary_counts_placeholder() {
        let session = BillingSession::new();
        let summary = session.quick_summary();
        assert_eq!(summary.items_added, 1);
        assert_eq!(summary.valid_items, 0);
        assert_eq!(summary.customer, "Not specified");
    }
}
