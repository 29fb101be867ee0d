//! # Document Sinks
//!
//! Where finished PDFs go. The exporter only needs "save these bytes under
//! this name"; the CLI writes into a directory, tests keep bytes in memory.
//!
//! [`DirectorySink`] writes `<name>.part` first and renames it into place.
//! A failed write or rename removes the part file, so no half-written
//! invoice is left behind.

use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, warn};

use frameit_core::validation::sanitize_filename;

use crate::error::ExportResult;

/// Destination for exported documents.
pub trait DocumentSink: Send + Sync {
    /// Stores `bytes` as `filename` and returns where it ended up.
    fn save(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> impl Future<Output = ExportResult<PathBuf>> + Send;
}

// =============================================================================
// Directory Sink
// =============================================================================

/// Saves documents into one directory, creating it when missing.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirectorySink { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DocumentSink for DirectorySink {
    async fn save(&self, filename: &str, bytes: Vec<u8>) -> ExportResult<PathBuf> {
        let name = sanitize_filename(filename);
        let target = self.dir.join(&name);
        let len = bytes.len();

        tokio::fs::create_dir_all(&self.dir).await?;
        commit_via_part(&target, |partial| async move {
            tokio::fs::write(partial, bytes).await
        })
        .await?;

        debug!("Saved {} ({} bytes)", target.display(), len);
        Ok(target)
    }
}

/// `<target>.part`
fn part_path(target: &Path) -> PathBuf {
    let mut name = target.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}

/// Runs `write` against `<target>.part`, then renames it to `target`.
///
/// If either step fails the part file is removed before the error is
/// returned.
async fn commit_via_part<F, Fut>(target: &Path, write: F) -> io::Result<()>
where
    F: FnOnce(PathBuf) -> Fut,
    Fut: Future<Output = io::Result<()>>,
{
    let partial = part_path(target);
    let result = match write(partial.clone()).await {
        Ok(()) => tokio::fs::rename(&partial, target).await,
        Err(e) => Err(e),
    };

    if let Err(e) = &result {
        warn!("Could not save {}: {}", target.display(), e);
        match tokio::fs::remove_file(&partial).await {
            Ok(()) => debug!("Removed {}", partial.display()),
            Err(cleanup) if cleanup.kind() == io::ErrorKind::NotFound => {}
            Err(cleanup) => warn!("Leftover {} not removed: {}", partial.display(), cleanup),
        }
    }
    result
}

// =============================================================================
// Memory Sink
// =============================================================================

/// Keeps saved documents in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    saved: Mutex<Vec<(String, Vec<u8>)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `(filename, bytes)` pair saved so far.
    pub fn saved(&self) -> Vec<(String, Vec<u8>)> {
        match self.saved.lock() {
            Ok(saved) => saved.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl DocumentSink for MemorySink {
    async fn save(&self, filename: &str, bytes: Vec<u8>) -> ExportResult<PathBuf> {
        let mut saved = match self.saved.lock() {
            Ok(saved) => saved,
            Err(poisoned) => poisoned.into_inner(),
        };
        saved.push((filename.to_string(), bytes));
        Ok(PathBuf::from(filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_directory_sink_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path().join("invoices"));

        let path = sink
            .save("FrameIt_Invoice_INV-000001.pdf", b"%PDF-1.3".to_vec())
            .await
            .unwrap();

        assert_eq!(path, dir.path().join("invoices/FrameIt_Invoice_INV-000001.pdf"));
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.3");
        assert!(!dir
            .path()
            .join("invoices/FrameIt_Invoice_INV-000001.pdf.part")
            .exists());
    }

    #[tokio::test]
    async fn test_interrupted_write_leaves_no_part_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("big.pdf");

        // half the document lands on disk, then the write gives up
        let err = commit_via_part(&target, |partial| async move {
            tokio::fs::write(&partial, vec![0u8; 64 * 1024]).await.unwrap();
            Err(io::Error::new(io::ErrorKind::Other, "file size limit exceeded"))
        })
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), "file size limit exceeded");
        assert!(!target.exists());
        assert!(!dir.path().join("big.pdf.part").exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_part_path() {
        assert_eq!(
            part_path(Path::new("/tmp/a/FrameIt_Invoice_INV-1.pdf")),
            PathBuf::from("/tmp/a/FrameIt_Invoice_INV-1.pdf.part")
        );
    }

    #[tokio::test]
    async fn test_directory_sink_sanitizes_name() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path());

        let path = sink.save("../escape.pdf", vec![1, 2, 3]).await.unwrap();
        assert_eq!(path.parent().unwrap(), dir.path());
    }

    #[tokio::test]
    async fn test_memory_sink_records() {
        let sink = MemorySink::new();
        sink.save("a.pdf", vec![1]).await.unwrap();
        assert_eq!(sink.saved(), vec![("a.pdf".to_string(), vec![1])]);
    }
}
