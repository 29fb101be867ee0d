//! End-to-end billing scenarios: editing, preview gating and invoice shape.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use frameit_core::invoice::{BusinessProfile, InvoiceBody};
use frameit_core::session::BillingSession;
use frameit_core::types::{ItemField, ItemId};
use frameit_core::CoreError;

fn now() -> DateTime<Utc> {
    Utc.timestamp_millis_opt(1_792_145_742_318).unwrap()
}

fn bill_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

/// Fills in the next form row: the blank row shown on a fresh form, then
/// a row added with "+ Add Item".
fn add(session: &mut BillingSession, name: &str, price: &str, qty: &str, gst: &str) -> ItemId {
    let id = if session.store.is_empty() {
        session.store.visible_items()[0].id.clone()
    } else {
        session.store.add_item()
    };
    session.store.update_item(&id, ItemField::Name, name);
    session.store.update_item(&id, ItemField::Price, price);
    session.store.update_item(&id, ItemField::Quantity, qty);
    session.store.update_item(&id, ItemField::GstRate, gst);
    id
}

#[test]
fn incomplete_items_never_reach_the_invoice() {
    let mut session = BillingSession::new();
    add(&mut session, "Frame A", "100", "1", "18");
    add(&mut session, "", "500", "4", "28");
    add(&mut session, "Frame B", "", "9", "5");

    session.create_preview(now()).unwrap();
    let doc = session
        .render_preview(&BusinessProfile::default(), bill_date())
        .unwrap();

    let names: Vec<&str> = doc.rows().iter().map(|r| r.description.as_str()).collect();
    assert_eq!(names, vec!["Frame A"]);
    assert_eq!(doc.totals.subtotal.fixed2(), "100.00");
    assert_eq!(doc.totals.grand_total.fixed2(), "118.00");
}

#[test]
fn default_blank_item_blocks_preview() {
    let mut session = BillingSession::new();

    // the form shows one blank item
    assert_eq!(session.store.visible_items().len(), 1);

    let err = session.create_preview(now()).unwrap_err();
    assert!(matches!(err, CoreError::NoValidItems));
    assert_eq!(
        err.to_string(),
        "Please add at least one item to create a bill!"
    );
    assert!(!session.is_previewing());
    assert!(session.preview().is_none());
}

#[test]
fn single_item_bill() {
    let mut session = BillingSession::new();
    add(&mut session, "Frame A", "100", "2", "18");

    let totals = session.store.bill_totals();
    assert_eq!(totals.subtotal.fixed2(), "200.00");
    assert_eq!(totals.gst.fixed2(), "36.00");
    assert_eq!(totals.total.fixed2(), "236.00");

    session.create_preview(now()).unwrap();
    let doc = session
        .render_preview(&BusinessProfile::default(), bill_date())
        .unwrap();
    assert_eq!(doc.totals.cgst.fixed2(), "18.00");
    assert_eq!(doc.totals.sgst.fixed2(), "18.00");
    assert_eq!(doc.header.bill_number.as_str(), "INV-742318");
}

#[test]
fn mixed_valid_and_invalid_items() {
    let mut session = BillingSession::new();
    add(&mut session, "A", "50", "1", "0");
    add(&mut session, "", "30", "1", "18");

    let totals = session.store.bill_totals();
    assert_eq!(totals.subtotal.fixed2(), "50.00");
    assert_eq!(totals.gst.fixed2(), "0.00");
    assert_eq!(totals.total.fixed2(), "50.00");

    let summary = session.quick_summary();
    assert_eq!(summary.items_added, 2);
    assert_eq!(summary.valid_items, 1);
    assert_eq!(summary.totals, totals);
}

#[test]
fn adding_a_row_keeps_the_blank_row_on_screen() {
    let mut session = BillingSession::new();
    let shown = session.store.visible_items()[0].id.clone();
    session.store.add_item();

    let summary = session.quick_summary();
    assert_eq!(summary.items_added, 2);
    assert_eq!(session.store.items()[0].id, shown);
}

#[test]
fn removing_every_item_returns_to_placeholder() {
    let mut session = BillingSession::new();
    let a = add(&mut session, "A", "50", "1", "0");
    session.store.remove_item(&a);

    assert!(session.store.is_empty());
    assert_eq!(session.store.visible_items().len(), 1);
    assert!(session.create_preview(now()).is_err());
}

#[test]
fn empty_preview_body_is_placeholder() {
    // a preview whose only valid item was blanked afterwards
    let mut session = BillingSession::new();
    let id = add(&mut session, "A", "50", "1", "0");
    session.create_preview(now()).unwrap();
    session.store.update_item(&id, ItemField::Name, "");

    let doc = session
        .render_preview(&BusinessProfile::default(), bill_date())
        .unwrap();
    assert!(matches!(doc.body, InvoiceBody::NoItems { .. }));
    assert!(doc.totals.grand_total.is_zero());
}
