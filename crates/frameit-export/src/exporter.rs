//! # Invoice Exporter
//!
//! Runs one export from start to finish:
//!
//! ```text
//! control.begin() ──► layout_invoice ──► spawn_blocking(render_pdf) ──► sink.save
//!       │                                                                  │
//!       └──────────── guard dropped on every exit path ◄───────────────────┘
//! ```
//!
//! A failed export leaves nothing to clean up; calling [`InvoiceExporter::export`]
//! again is the retry.

use std::path::PathBuf;

use tracing::{error, info};

use frameit_core::InvoiceDocument;

use crate::control::ExportControl;
use crate::error::{ExportError, ExportResult};
use crate::layout::{layout_invoice, PageSpec};
use crate::pdf::render_pdf;
use crate::sink::DocumentSink;

/// Label used in place of the rupee sign in PDF text.
pub const DEFAULT_CURRENCY_LABEL: &str = "Rs.";

/// Exports invoices as PDFs into a [`DocumentSink`].
#[derive(Debug, Clone)]
pub struct InvoiceExporter<S> {
    sink: S,
    page: PageSpec,
    currency_label: String,
}

impl<S: DocumentSink> InvoiceExporter<S> {
    /// A4 portrait, "Rs." amounts.
    pub fn new(sink: S) -> Self {
        InvoiceExporter {
            sink,
            page: PageSpec::a4_portrait(),
            currency_label: DEFAULT_CURRENCY_LABEL.to_string(),
        }
    }

    pub fn with_currency_label(mut self, label: impl Into<String>) -> Self {
        self.currency_label = label.into();
        self
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Renders `document` and saves it as `filename`.
    ///
    /// The control stays disabled and shows "Generating PDF..." until this
    /// returns, whatever the outcome.
    pub async fn export(
        &self,
        control: &mut ExportControl,
        document: &InvoiceDocument,
        filename: &str,
    ) -> ExportResult<PathBuf> {
        let _guard = control.begin()?;
        let bill_number = document.bill_number().to_string();

        info!("Exporting invoice {} as {}", bill_number, filename);

        let result = self.run(document, filename).await;
        match &result {
            Ok(path) => info!("Invoice {} saved to {}", bill_number, path.display()),
            Err(e) => error!("Invoice {} export failed: {}", bill_number, e),
        }
        result
    }

    async fn run(&self, document: &InvoiceDocument, filename: &str) -> ExportResult<PathBuf> {
        let pages = layout_invoice(document, &self.page, &self.currency_label);
        let spec = self.page;
        let title = format!("{} {}", document.header.title, document.header.bill_number);

        let bytes = tokio::task::spawn_blocking(move || render_pdf(&pages, &spec, &title))
            .await
            .map_err(|e| ExportError::Task(e.to_string()))??;

        self.sink.save(filename, bytes).await
    }
}
