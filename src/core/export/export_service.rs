// Export and fan-out logic. Nothing in here knows about Google, HTTP or the
// real filesystem; those live behind the two ports below and are implemented
// in the infra layer.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinSet;

use super::export_models::{
    DestinationSet, DocumentRef, ExportError, ExportFormat, ExportedDocument,
};

// ============================================================================
// PORTS
// ============================================================================

/// Remote service that renders a document into a byte stream.
#[async_trait]
pub trait DocumentExporter: Send + Sync {
    /// Establishes credentials. Called once before any export.
    async fn authenticate(&self) -> Result<(), ExportError>;

    /// Requests the document converted to `format`. The whole body is returned.
    async fn export(
        &self,
        document: &DocumentRef,
        format: ExportFormat,
    ) -> Result<Vec<u8>, ExportError>;
}

/// Somewhere a finished export can be written to.
#[async_trait]
pub trait DocumentSink: Send + Sync + 'static {
    /// Replaces whatever is at `path` with `bytes`.
    async fn write(&self, path: &Path, bytes: &[u8]) -> Result<(), ExportError>;
}

// ============================================================================
// SERVICE
// ============================================================================

pub struct ExportService<E: DocumentExporter, S: DocumentSink> {
    exporter: E,
    sink: Arc<S>,
}

impl<E: DocumentExporter, S: DocumentSink> ExportService<E, S> {
    pub fn new(exporter: E, sink: S) -> Self {
        Self {
            exporter,
            sink: Arc::new(sink),
        }
    }

    pub async fn authenticate(&self) -> Result<(), ExportError> {
        self.exporter.authenticate().await?;
        tracing::info!("Authenticated against the export service");
        Ok(())
    }

    /// Fetches the document and buffers it. Nothing is written here, so a
    /// failed export leaves every destination untouched.
    pub async fn export(
        &self,
        document: &DocumentRef,
        format: ExportFormat,
    ) -> Result<ExportedDocument, ExportError> {
        tracing::info!(document = %document, mime = format.mime_type(), "Exporting document");

        let bytes = self.exporter.export(document, format).await?;
        let exported = ExportedDocument::new(format, bytes);
        if exported.is_empty() {
            return Err(ExportError::Export(format!(
                "export of {} returned an empty body",
                document
            )));
        }

        tracing::debug!(document = %document, bytes = exported.len(), "Export buffered");
        Ok(exported)
    }

    /// Writes `exported` to every destination concurrently and waits for all
    /// of them. Completed writes are kept even when a sibling fails; the
    /// first failure in destination order is returned.
    pub async fn persist(
        &self,
        exported: &ExportedDocument,
        destinations: &DestinationSet,
    ) -> Result<Vec<PathBuf>, ExportError> {
        tracing::info!(
            destinations = destinations.paths().len(),
            mime = exported.format.mime_type(),
            bytes = exported.len(),
            "Writing export"
        );

        let mut tasks = JoinSet::new();

        for (index, path) in destinations.paths().iter().enumerate() {
            let sink = Arc::clone(&self.sink);
            let bytes = exported.shared_bytes();
            let path = path.clone();
            tasks.spawn(async move {
                let result = sink.write(&path, &bytes).await;
                (index, path, result)
            });
        }

        let mut outcomes: Vec<Option<Result<PathBuf, ExportError>>> =
            (0..destinations.paths().len()).map(|_| None).collect();

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, path, Ok(()))) => {
                    tracing::info!("Written to {}", path.display());
                    outcomes[index] = Some(Ok(path));
                }
                Ok((index, path, Err(e))) => {
                    tracing::error!(path = %path.display(), "Destination write failed: {}", e);
                    outcomes[index] = Some(Err(e));
                }
                Err(join_error) => {
                    // The slot stays empty and is reported below.
                    tracing::error!("Destination write task panicked: {}", join_error);
                }
            }
        }

        let mut written = Vec::with_capacity(outcomes.len());
        for (outcome, path) in outcomes.into_iter().zip(destinations.paths()) {
            match outcome {
                Some(Ok(path)) => written.push(path),
                Some(Err(e)) => return Err(e),
                None => {
                    return Err(ExportError::Write {
                        path: path.clone(),
                        reason: "write task did not complete".to_string(),
                    })
                }
            }
        }

        Ok(written)
    }
}
