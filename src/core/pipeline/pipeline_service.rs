// Sequences one run: authenticate -> export -> persist -> publish.
// Steps 1-3 abort the run on error. Step 4 is caught and recorded.

use std::path::PathBuf;

use crate::core::export::{
    DestinationSet, DocumentExporter, DocumentRef, DocumentSink, ExportError, ExportFormat,
    ExportService,
};
use crate::core::publish::{CommandRunner, PublishError, PublishReport, PublishService};

/// How the publish step ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishStatus {
    Published(PublishReport),
    Failed(PublishError),
}

/// Summary of a run that got past the write phase.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub document: DocumentRef,
    pub written: Vec<PathBuf>,
    pub bytes: usize,
    pub publish: PublishStatus,
}

pub struct PipelineService<E: DocumentExporter, S: DocumentSink, R: CommandRunner> {
    export: ExportService<E, S>,
    publish: PublishService<R>,
}

impl<E, S, R> PipelineService<E, S, R>
where
    E: DocumentExporter,
    S: DocumentSink,
    R: CommandRunner,
{
    pub fn new(export: ExportService<E, S>, publish: PublishService<R>) -> Self {
        Self { export, publish }
    }

    pub async fn run(
        &self,
        document: &DocumentRef,
        format: ExportFormat,
        destinations: &DestinationSet,
    ) -> Result<RunReport, ExportError> {
        self.export.authenticate().await?;
        let exported = self.export.export(document, format).await?;
        let written = self.export.persist(&exported, destinations).await?;

        let publish = match self.publish.publish().await {
            Ok(report) => {
                tracing::info!(
                    "Pushed updated document to {}",
                    report.working_dir.display()
                );
                PublishStatus::Published(report)
            }
            Err(e) => {
                tracing::error!("Publish (build/commit/push) failed: {}", e);
                PublishStatus::Failed(e)
            }
        };

        Ok(RunReport {
            document: document.clone(),
            written,
            bytes: exported.len(),
            publish,
        })
    }
}
