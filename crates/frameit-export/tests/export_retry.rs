//! Export failures leave the control usable and the directory clean, and a
//! second attempt succeeds once the cause is gone.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::NaiveDate;
use frameit_core::invoice::{render_invoice, BusinessProfile};
use frameit_core::types::{CustomerInfo, ItemField, OrderItem};
use frameit_core::{BillNumber, InvoiceDocument};
use frameit_export::{
    export_filename, DirectorySink, DocumentSink, ExportControl, ExportError, ExportResult,
    InvoiceExporter,
};

fn invoice() -> InvoiceDocument {
    let mut item = OrderItem::blank();
    item.set_field(ItemField::Name, "Wooden Frame (12x18)");
    item.set_field(ItemField::Price, "899");
    render_invoice(
        &BusinessProfile::default(),
        &CustomerInfo {
            name: "Asha Verma".to_string(),
            ..Default::default()
        },
        &[item],
        &BillNumber::from_raw("INV-742318"),
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
    )
}

#[tokio::test]
async fn failed_save_can_be_retried() {
    let dir = tempfile::tempdir().unwrap();
    let doc = invoice();
    let filename = export_filename("FrameIt", doc.bill_number());
    assert_eq!(filename, "FrameIt_Invoice_INV-742318.pdf");

    // a non-empty directory where the PDF should go makes the rename fail
    let blocker = dir.path().join(&filename);
    std::fs::create_dir(&blocker).unwrap();
    std::fs::write(blocker.join("keep"), b"x").unwrap();

    let exporter = InvoiceExporter::new(DirectorySink::new(dir.path()));
    let mut control = ExportControl::default();

    let err = exporter
        .export(&mut control, &doc, &filename)
        .await
        .unwrap_err();
    assert!(matches!(err, ExportError::Io(_)));
    assert!(err.is_retryable());
    assert_eq!(control.label(), "Download PDF");
    assert!(control.is_enabled());
    assert!(!dir.path().join(format!("{}.part", filename)).exists());

    std::fs::remove_dir_all(&blocker).unwrap();

    let path = exporter
        .export(&mut control, &doc, &filename)
        .await
        .unwrap();
    assert_eq!(path, dir.path().join(&filename));
    assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF"));
    assert!(control.is_enabled());
}

/// Fails the first save, then succeeds.
#[derive(Default)]
struct FlakySink {
    attempts: AtomicUsize,
}

impl DocumentSink for FlakySink {
    async fn save(&self, filename: &str, _bytes: Vec<u8>) -> ExportResult<PathBuf> {
        if self.attempts.fetch_add(1, Ordering::SeqCst) == 0 {
            return Err(ExportError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "downloads folder is read-only",
            )));
        }
        Ok(PathBuf::from(filename))
    }
}

#[tokio::test]
async fn control_is_restored_after_each_attempt() {
    let exporter = InvoiceExporter::new(FlakySink::default());
    let mut control = ExportControl::default();
    let doc = invoice();

    assert!(exporter.export(&mut control, &doc, "a.pdf").await.is_err());
    assert_eq!(control.label(), "Download PDF");
    assert!(control.is_enabled());

    assert!(exporter.export(&mut control, &doc, "a.pdf").await.is_ok());
    assert_eq!(exporter.sink().attempts.load(Ordering::SeqCst), 2);
}
