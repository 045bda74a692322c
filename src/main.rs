// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Run the pipeline once and map the result to an exit code

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;

use doc_publisher::core::export::{ExportError, ExportService};
use doc_publisher::core::pipeline::{PipelineService, PublishStatus, RunConfig, RunReport};
use doc_publisher::core::publish::PublishService;
use doc_publisher::infra::filesystem::FsDocumentSink;
use doc_publisher::infra::google_drive::{DriveExportClient, ServiceAccountAuth};
use doc_publisher::infra::shell::ShellCommandRunner;
use doc_publisher::logger;

/// How one invocation ended.
enum RunOutcome {
    /// Nothing was attempted; the environment is incomplete.
    Misconfigured(ExportError),
    /// Authentication, export or a destination write failed.
    Failed(anyhow::Error),
    Finished(RunReport),
}

impl RunOutcome {
    /// Only a configuration problem changes the exit code.
    fn exit_code(&self) -> u8 {
        match self {
            RunOutcome::Misconfigured(_) => 1,
            RunOutcome::Failed(_) | RunOutcome::Finished(_) => 0,
        }
    }

    fn log(&self) {
        match self {
            RunOutcome::Misconfigured(e) => tracing::error!("{}", e),
            RunOutcome::Failed(e) => tracing::error!("Document export failed: {:#}", e),
            RunOutcome::Finished(report) => tracing::info!(
                document = %report.document,
                destinations = report.written.len(),
                bytes = report.bytes,
                published = matches!(report.publish, PublishStatus::Published(_)),
                "Run finished"
            ),
        }
    }
}

async fn run(config: RunConfig) -> anyhow::Result<RunReport> {
    let cwd = std::env::current_dir().context("Failed to read the working directory")?;
    let destinations = config.destinations.resolved_against(&cwd)?;

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================

    let auth = ServiceAccountAuth::from_source(&config.credentials).await?;
    let exporter = DriveExportClient::new(auth);
    let export_service = ExportService::new(exporter, FsDocumentSink::new());
    let publish_service = PublishService::new(ShellCommandRunner::new(), config.publish.clone());
    let pipeline = PipelineService::new(export_service, publish_service);

    let report = pipeline
        .run(&config.document, config.format, &destinations)
        .await?;
    Ok(report)
}

async fn execute<F>(lookup: F, home: Option<&Path>) -> RunOutcome
where
    F: Fn(&str) -> Option<String>,
{
    let config = match RunConfig::from_lookup(lookup, home) {
        Ok(config) => config,
        Err(e) => return RunOutcome::Misconfigured(e),
    };

    match run(config).await {
        Ok(report) => RunOutcome::Finished(report),
        Err(e) => RunOutcome::Failed(e),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();
    logger::init_cli_logger(false);

    let home = std::env::var_os("HOME").map(PathBuf::from);
    let outcome = execute(|key| std::env::var(key).ok(), home.as_deref()).await;
    outcome.log();

    ExitCode::from(outcome.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_doc_id_exits_with_one() {
        let outcome = execute(|_| None, None).await;
        assert!(matches!(outcome, RunOutcome::Misconfigured(_)));
        assert_eq!(outcome.exit_code(), 1);
    }

    #[tokio::test]
    async fn test_credential_failure_exits_with_zero() {
        let dir = tempfile::tempdir().unwrap();
        let key_path = dir.path().join("missing.json").display().to_string();
        let lookup = move |key: &str| match key {
            "DOC_ID" => Some("doc-123".to_string()),
            "GOOGLE_SERVICE_ACCOUNT_KEY" => Some(key_path.clone()),
            _ => None,
        };

        let outcome = execute(lookup, None).await;

        assert!(matches!(outcome, RunOutcome::Failed(_)));
        assert_eq!(outcome.exit_code(), 0);
    }
}
