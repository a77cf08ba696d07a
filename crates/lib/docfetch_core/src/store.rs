// @awa-component: DOC-DocumentStore
//
//! Persistence for decoded certificates.
//!
//! [`LocalDocumentStore`] writes each file through a temporary sibling and
//! renames it into place, so a failed write never leaves a truncated PDF.
//! Existing files are replaced unconditionally.

use std::io::Write;
use std::path::Path;

use async_trait::async_trait;
use tempfile::NamedTempFile;
use thiserror::Error;

/// Errors that can occur while writing a document.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The write never ran to completion (worker panicked or was cancelled).
    #[error("Store worker failed: {0}")]
    Internal(String),
}

/// Byte sink addressed by filesystem path.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Write `contents` to `path`, replacing whatever is there.
    async fn write(&self, path: &Path, contents: Vec<u8>) -> Result<(), StoreError>;
}

/// Local-filesystem store. Parent directories are created on demand.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalDocumentStore;

#[async_trait]
impl DocumentStore for LocalDocumentStore {
    async fn write(&self, path: &Path, contents: Vec<u8>) -> Result<(), StoreError> {
        let path = path.to_path_buf();
        tokio::task::spawn_blocking(move || write_atomic(&path, &contents))
            .await
            .map_err(|e| StoreError::Internal(e.to_string()))??;
        Ok(())
    }
}

fn write_atomic(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;

    // NamedTempFile is created 0600; stored documents should be readable.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))?;
    }

    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/doc_1.pdf");

        LocalDocumentStore
            .write(&path, b"pdf".to_vec())
            .await
            .unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"pdf");
    }

    #[tokio::test]
    async fn overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc_1.pdf");
        std::fs::write(&path, b"old contents that are longer").unwrap();

        LocalDocumentStore.write(&path, b"new".to_vec()).await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"new");
    }

    #[tokio::test]
    async fn leaves_no_temporary_files_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc_1.pdf");

        LocalDocumentStore.write(&path, b"a".to_vec()).await.unwrap();
        LocalDocumentStore.write(&path, b"b".to_vec()).await.unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("doc_1.pdf")]);
    }

    #[tokio::test]
    async fn fails_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();

        let err = LocalDocumentStore
            .write(&blocker.join("doc_1.pdf"), b"x".to_vec())
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Io(_)), "unexpected error: {err}");
    }
}
