use async_trait::async_trait;
use reqwest::{Client, Url};

use super::service_account::ServiceAccountAuth;
use crate::core::export::{DocumentExporter, DocumentRef, ExportError, ExportFormat};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com";

/// Drive v3 `files.export` client. Google Docs files can only be downloaded
/// through export, which converts them on the fly.
pub struct DriveExportClient {
    client: Client,
    auth: ServiceAccountAuth,
    base_url: String,
}

impl DriveExportClient {
    pub fn new(auth: ServiceAccountAuth) -> Self {
        Self::with_base_url(auth, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(auth: ServiceAccountAuth, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            auth,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// `files/{id}/export` with the id as one percent-encoded path segment,
    /// so `#`, `?` or `/` in an id can never reach another endpoint.
    fn export_url(&self, document: &DocumentRef) -> Result<Url, ExportError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            ExportError::Export(format!("invalid Drive base URL {}: {}", self.base_url, e))
        })?;

        url.path_segments_mut()
            .map_err(|_| {
                ExportError::Export(format!("Drive base URL {} cannot take a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(["drive", "v3", "files", document.as_str(), "export"]);

        Ok(url)
    }
}

#[async_trait]
impl DocumentExporter for DriveExportClient {
    async fn authenticate(&self) -> Result<(), ExportError> {
        self.auth.get_access_token().await?;
        tracing::debug!(account = self.auth.client_email(), "Service account authorized");
        Ok(())
    }

    async fn export(
        &self,
        document: &DocumentRef,
        format: ExportFormat,
    ) -> Result<Vec<u8>, ExportError> {
        let url = self.export_url(document)?;
        let token = self.auth.get_access_token().await?;

        tracing::debug!("Exporting Google Doc via Drive API: {}", document);

        let response = self
            .client
            .get(url)
            .query(&[("mimeType", format.mime_type())])
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ExportError::Export(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(ExportError::Export(format!(
                "Drive API error ({}): {}. \
                 Make sure the document is shared with {}.",
                status,
                text,
                self.auth.client_email()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ExportError::Export(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}
