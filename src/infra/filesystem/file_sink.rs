use std::path::Path;

use async_trait::async_trait;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use crate::core::export::{DocumentSink, ExportError};

/// Writes exports straight to local paths. Parent directories are not
/// created; a missing directory is reported like any other write failure.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsDocumentSink;

impl FsDocumentSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DocumentSink for FsDocumentSink {
    async fn write(&self, path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
        let write_error = |e: std::io::Error| ExportError::Write {
            path: path.to_path_buf(),
            reason: e.to_string(),
        };

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .await
            .map_err(write_error)?;

        file.write_all(bytes).await.map_err(write_error)?;
        file.sync_all().await.map_err(write_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Resume.pdf");

        FsDocumentSink::new().write(&path, b"%PDF").await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF");
    }

    #[tokio::test]
    async fn test_write_truncates_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Resume.pdf");
        std::fs::write(&path, b"older and much longer content").unwrap();

        FsDocumentSink::new().write(&path, b"new").await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"new");
    }

    #[tokio::test]
    async fn test_missing_directory_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent").join("Resume.pdf");

        let err = FsDocumentSink::new().write(&path, b"x").await.unwrap_err();

        match err {
            ExportError::Write { path: failed, .. } => assert_eq!(failed, path),
            other => panic!("expected write error, got {other:?}"),
        }
        assert!(!path.exists());
    }
}
