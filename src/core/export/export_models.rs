use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

/// Errors that abort a run before the publish step.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Authentication failed: {0}")]
    Authentication(String),
    #[error("Document export failed: {0}")]
    Export(String),
    #[error("Failed to write {}: {reason}", path.display())]
    Write { path: PathBuf, reason: String },
}

// ============================================================================
// DOCUMENT REFERENCE
// ============================================================================

/// Opaque id of the source document.
///
/// Accepts either a bare id or a full Google Docs URL; the URL is reduced to
/// the id segment after `/document/d/`. Bare ids are taken verbatim and must
/// be escaped by whoever puts them into a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef(String);

impl DocumentRef {
    pub fn parse(input: &str) -> Result<Self, ExportError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ExportError::Configuration(
                "document reference must not be empty".to_string(),
            ));
        }

        Self::extract_id(trimmed).map(Self).ok_or_else(|| {
            ExportError::Configuration(format!(
                "could not extract a document id from '{}'",
                trimmed
            ))
        })
    }

    fn extract_id(url_or_id: &str) -> Option<String> {
        if url_or_id.contains("docs.google.com") {
            let start = url_or_id.find("/document/d/")?;
            let after_d = &url_or_id[start + "/document/d/".len()..];
            let end = after_d
                .find(|c: char| c == '/' || c == '?' || c == '#')
                .unwrap_or(after_d.len());
            let id = &after_d[..end];
            return (!id.is_empty()).then(|| id.to_string());
        }

        Some(url_or_id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// EXPORT FORMAT & PAYLOAD
// ============================================================================

/// Output formats the export service is asked for. Only PDF is used today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
}

impl ExportFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
        }
    }
}

/// The export stream, fully buffered so it can be copied to every destination.
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    pub format: ExportFormat,
    bytes: Arc<[u8]>,
}

impl ExportedDocument {
    pub fn new(format: ExportFormat, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            format,
            bytes: bytes.into(),
        }
    }

    /// Cheap handle to the buffer for handing to concurrent writers.
    pub fn shared_bytes(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// ============================================================================
// DESTINATIONS
// ============================================================================

/// Ordered, non-empty list of paths that each receive a full copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationSet {
    paths: Vec<PathBuf>,
}

impl DestinationSet {
    pub fn new<I, P>(paths: I) -> Result<Self, ExportError>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let paths: Vec<PathBuf> = paths.into_iter().map(Into::into).collect();
        if paths.is_empty() {
            return Err(ExportError::Configuration(
                "at least one destination path is required".to_string(),
            ));
        }

        // Two concurrent writers on one file would interleave.
        let mut seen = HashSet::new();
        for path in &paths {
            if !seen.insert(path) {
                return Err(ExportError::Configuration(format!(
                    "destination {} is listed more than once",
                    path.display()
                )));
            }
        }

        Ok(Self { paths })
    }

    /// Resolves every relative entry against `base`.
    pub fn resolved_against(&self, base: &Path) -> Result<Self, ExportError> {
        Self::new(self.paths.iter().map(|p| {
            if p.is_absolute() {
                p.clone()
            } else {
                base.join(p)
            }
        }))
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

}
