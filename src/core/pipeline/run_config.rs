use std::path::{Path, PathBuf};

use crate::core::export::{DestinationSet, DocumentRef, ExportError, ExportFormat};
use crate::core::publish::PublishCommand;

/// Where the document lives; required.
pub const DOC_ID_VAR: &str = "DOC_ID";
/// Path to a service account key file, overriding `DEFAULT_CREDENTIALS_PATH`.
pub const CREDENTIALS_PATH_VAR: &str = "GOOGLE_SERVICE_ACCOUNT_KEY";
/// Inline service account JSON, used when no key path is configured.
pub const CREDENTIALS_JSON_VAR: &str = "GOOGLE_SERVICE_ACCOUNT_JSON";

pub const DEFAULT_CREDENTIALS_PATH: &str = "credentials.json";

/// Every run writes to exactly these paths, relative to the working directory.
pub const DESTINATIONS: [&str; 3] = [
    "../../job_docs/Resume.pdf",
    "../portfolio/public/Resume.pdf",
    "./Resume.pdf",
];

pub const PUBLISH_WORKING_DIR: &str = "~/Documents/Projects/portfolio";
pub const PUBLISH_SCRIPT: &str = "npm run build && git add ./public/Resume.pdf && git commit -m 'Chore: Update Resume' && git push";

/// How the service account key reaches us.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    File(PathBuf),
    Inline(String),
}

/// Everything one run needs, read from the environment once at startup.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub document: DocumentRef,
    pub format: ExportFormat,
    pub credentials: CredentialSource,
    pub destinations: DestinationSet,
    pub publish: PublishCommand,
}

impl RunConfig {
    pub fn from_env() -> Result<Self, ExportError> {
        let home = std::env::var_os("HOME").map(PathBuf::from);
        Self::from_lookup(|key| std::env::var(key).ok(), home.as_deref())
    }

    /// Builds the config from any key lookup. Relative destinations are kept
    /// relative; callers resolve them against the working directory.
    pub fn from_lookup<F>(lookup: F, home: Option<&Path>) -> Result<Self, ExportError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let doc_id = lookup(DOC_ID_VAR)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                ExportError::Configuration(format!("{} environment variable not set.", DOC_ID_VAR))
            })?;
        let document = DocumentRef::parse(&doc_id)?;

        let credentials = if let Some(path) = lookup(CREDENTIALS_PATH_VAR) {
            CredentialSource::File(PathBuf::from(path))
        } else if let Some(json) = lookup(CREDENTIALS_JSON_VAR) {
            CredentialSource::Inline(json)
        } else {
            CredentialSource::File(PathBuf::from(DEFAULT_CREDENTIALS_PATH))
        };

        Ok(Self {
            document,
            format: ExportFormat::Pdf,
            credentials,
            destinations: DestinationSet::new(DESTINATIONS)?,
            publish: PublishCommand::new(PUBLISH_SCRIPT, PUBLISH_WORKING_DIR, home),
        })
    }
}
