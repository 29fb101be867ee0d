//! # Export Errors
//!
//! Every export failure is recoverable: the control is re-enabled and the
//! user can simply try again. [`ExportError::is_retryable`] tells whether a
//! retry can be expected to behave differently.

use thiserror::Error;

/// Errors from the invoice export pipeline.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The export control is already busy.
    #[error("An export is already in progress")]
    InProgress,

    /// Building the PDF failed.
    #[error("Failed to generate PDF: {0}")]
    Render(String),

    /// Writing the file failed.
    #[error("Failed to save invoice: {0}")]
    Io(#[from] std::io::Error),

    /// The background render task died.
    #[error("Export task failed: {0}")]
    Task(String),
}

impl ExportError {
    /// True when trying again may succeed.
    ///
    /// Rendering is deterministic, so a render failure repeats until the
    /// invoice changes.
    pub fn is_retryable(&self) -> bool {
        match self {
            ExportError::InProgress | ExportError::Io(_) | ExportError::Task(_) => true,
            ExportError::Render(_) => false,
        }
    }
}

/// Convenience type alias for Results with ExportError.
pub type ExportResult<T> = Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable() {
        let io = ExportError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only",
        ));
        assert!(io.is_retryable());
        assert!(ExportError::InProgress.is_retryable());
        assert!(!ExportError::Render("bad font".to_string()).is_retryable());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ExportError::InProgress.to_string(),
            "An export is already in progress"
        );
    }
}
