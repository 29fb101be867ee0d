//! # Export Control
//!
//! The "Download PDF" button, modelled as data.
//!
//! ```text
//!   ExportControl { label: "Download PDF", enabled: true }
//!         │
//!         │ begin()
//!         ▼
//!   ExportGuard alive ──► label: "Generating PDF...", enabled: false
//!         │
//!         │ drop (success, error or unwind)
//!         ▼
//!   ExportControl { label: "Download PDF", enabled: true }
//! ```
//!
//! The guard holds `&mut ExportControl`, so a second export cannot start
//! while one is running.

use serde::{Deserialize, Serialize};

use crate::error::{ExportError, ExportResult};

/// Label shown while an export runs.
pub const IN_PROGRESS_LABEL: &str = "Generating PDF...";

/// Label of an idle control.
pub const DEFAULT_LABEL: &str = "Download PDF";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportControl {
    label: String,
    enabled: bool,
}

impl ExportControl {
    /// An enabled control with `label`.
    pub fn new(label: impl Into<String>) -> Self {
        ExportControl {
            label: label.into(),
            enabled: true,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Disables the control for the duration of one export.
    ///
    /// Fails with [`ExportError::InProgress`] if the control is already
    /// disabled.
    pub fn begin(&mut self) -> ExportResult<ExportGuard<'_>> {
        if !self.enabled {
            return Err(ExportError::InProgress);
        }

        let original_label = std::mem::replace(&mut self.label, IN_PROGRESS_LABEL.to_string());
        self.enabled = false;

        Ok(ExportGuard {
            control: self,
            original_label,
        })
    }
}

impl Default for ExportControl {
    fn default() -> Self {
        ExportControl::new(DEFAULT_LABEL)
    }
}

/// Restores the control when dropped.
#[derive(Debug)]
pub struct ExportGuard<'a> {
    control: &'a mut ExportControl,
    original_label: String,
}

impl ExportGuard<'_> {
    /// The label shown while the export runs.
    pub fn label(&self) -> &str {
        self.control.label()
    }
}

impl Drop for ExportGuard<'_> {
    fn drop(&mut self) {
        self.control.label = std::mem::take(&mut self.original_label);
        self.control.enabled = true;
    }
}
