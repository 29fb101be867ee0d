//! # Export Command
//!
//! "Download PDF" from the bill preview.
//!
//! ## User Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  frameit export --order bill.json                                       │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  ┌────────────────────────────────────────────────────────────────┐    │
//! │  │  1. Create the preview (needs at least one valid item)         │    │
//! │  │  2. Render the invoice document                                │    │
//! │  │  3. Disable the control ("Generating PDF...")                  │    │
//! │  │  4. Lay out + render PDF, save <Brand>_Invoice_<number>.pdf    │    │
//! │  │  5. Control restored, success or failure                       │    │
//! │  └────────────────────────────────────────────────────────────────┘    │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  Bill number and path printed, or the error (run again to retry)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `frameit preview --export` prints the invoice and saves the same
//! preview, so the number on screen is the number in the PDF.

use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::info;

use frameit_core::{BillNumber, InvoiceDocument};
use frameit_export::{DirectorySink, ExportControl, InvoiceExporter};

use crate::commands::billing::create_preview;
use crate::error::AppResult;
use crate::state::{ConfigState, SessionState};

/// A saved invoice PDF.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedInvoice {
    pub bill_number: BillNumber,
    pub path: PathBuf,
}

impl SavedInvoice {
    pub fn message(&self) -> String {
        format!("Invoice {} saved to {}", self.bill_number, self.path.display())
    }
}

/// Creates the bill preview and exports it as a PDF.
pub async fn export_invoice(
    session: &SessionState,
    config: &ConfigState,
    out_dir: Option<PathBuf>,
    now: DateTime<Utc>,
    bill_date: NaiveDate,
) -> AppResult<SavedInvoice> {
    let document = create_preview(session, config, now, bill_date)?;
    save_pdf(session, config, &document, out_dir).await
}

/// Exports a document rendered from the current preview.
///
/// The filename comes from the same preview, so the PDF name and the
/// number printed inside it always agree.
pub async fn save_pdf(
    session: &SessionState,
    config: &ConfigState,
    document: &InvoiceDocument,
    out_dir: Option<PathBuf>,
) -> AppResult<SavedInvoice> {
    let filename = session.with_session(|s| s.export_filename(&config.brand))?;

    let dir = out_dir.unwrap_or_else(|| config.resolved_output_dir());
    info!(dir = %dir.display(), %filename, "Exporting bill");

    let exporter = InvoiceExporter::new(DirectorySink::new(dir))
        .with_currency_label(config.currency_label.clone());
    let mut control = ExportControl::default();

    let path = exporter.export(&mut control, document, &filename).await?;
    Ok(SavedInvoice {
        bill_number: document.bill_number().clone(),
        path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use chrono::TimeZone;
    use frameit_core::types::ItemField;

    fn now() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_792_145_742_318).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[tokio::test]
    async fn test_export_writes_named_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let session = SessionState::default();
        session.with_session_mut(|s| {
            let id = s.store.add_item();
            s.store.update_item(&id, ItemField::Name, "Frame A");
            s.store.update_item(&id, ItemField::Price, "100");
        });

        let saved = export_invoice(
            &session,
            &ConfigState::default(),
            Some(dir.path().to_path_buf()),
            now(),
            date(),
        )
        .await
        .unwrap();

        assert_eq!(saved.path, dir.path().join("FrameIt_Invoice_INV-742318.pdf"));
        assert_eq!(saved.bill_number.as_str(), "INV-742318");
        assert!(std::fs::read(&saved.path).unwrap().starts_with(b"%PDF"));
        assert!(saved.message().starts_with("Invoice INV-742318 saved to "));
    }

    #[tokio::test]
    async fn test_pdf_keeps_previewed_number() {
        let dir = tempfile::tempdir().unwrap();
        let session = SessionState::default();
        session.with_session_mut(|s| {
            let id = s.store.visible_items()[0].id.clone();
            s.store.update_item(&id, ItemField::Name, "Frame A");
            s.store.update_item(&id, ItemField::Price, "100");
        });
        let config = ConfigState::default();

        let shown = create_preview(&session, &config, now(), date()).unwrap();
        let later = Utc.timestamp_millis_opt(1_792_145_999_001).unwrap();
        let saved = export_invoice(&session, &config, Some(dir.path().to_path_buf()), later, date())
            .await
            .unwrap();

        assert_eq!(&saved.bill_number, shown.bill_number());
        assert_eq!(saved.path, dir.path().join("FrameIt_Invoice_INV-742318.pdf"));
    }

    #[tokio::test]
    async fn test_export_needs_valid_items() {
        let dir = tempfile::tempdir().unwrap();
        let err = export_invoice(
            &SessionState::default(),
            &ConfigState::default(),
            Some(dir.path().to_path_buf()),
            now(),
            date(),
        )
        .await
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::PreconditionFailed);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
