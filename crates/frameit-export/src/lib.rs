//! # frameit-export: PDF Export for FrameIt Invoices
//!
//! Takes the [`InvoiceDocument`](frameit_core::InvoiceDocument) shown in the
//! bill preview and turns it into an A4 PDF file.
//!
//! ## Export Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           Invoice Export                                │
//! │                                                                         │
//! │   ExportControl ──begin()──► "Generating PDF...", disabled              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │   layout::layout_invoice     A4 portrait, 10 mm margin, paginated       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │   pdf::render_pdf            printpdf on a blocking task                │
//! │         │                                                               │
//! │         ▼                                                               │
//! │   sink::DocumentSink         <brand>_Invoice_<bill number>.pdf          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │   guard dropped ──► "Download PDF", enabled (success or failure)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## User Workflow
//! 1. Preview the bill.
//! 2. Press "Download PDF"; the control disables itself.
//! 3. The file lands in the downloads directory, or an error is reported.
//! 4. Either way the control is usable again, so a failed export can be
//!    retried straight away.

pub mod control;
pub mod error;
pub mod exporter;
pub mod layout;
pub mod pdf;
pub mod sink;

pub use control::{ExportControl, ExportGuard};
pub use error::{ExportError, ExportResult};
pub use exporter::{InvoiceExporter, DEFAULT_CURRENCY_LABEL};
pub use frameit_core::invoice::export_filename;
pub use layout::{layout_invoice, Page, PageSpec};
pub use sink::{DirectorySink, DocumentSink, MemorySink};
