use super::resume_models::{LinkAnchor, ResumeError, ResumeOutline};
use super::resume_parser::ResumeParser;

// ============================================================================
// PORTS
// ============================================================================

/// Reads text and link annotations out of a PDF.
pub trait PdfTextSource: Send + Sync {
    /// Plain text of each page, in page order.
    fn pages(&self, pdf: &[u8]) -> Result<Vec<String>, ResumeError>;

    /// Every URI link annotation with the text it covers.
    fn links(&self, pdf: &[u8]) -> Result<Vec<LinkAnchor>, ResumeError>;
}

// ============================================================================
// SERVICE
// ============================================================================

pub struct ResumeOutlineService<P: PdfTextSource> {
    source: P,
    parser: ResumeParser,
}

impl<P: PdfTextSource> ResumeOutlineService<P> {
    pub fn new(source: P) -> Self {
        Self {
            source,
            parser: ResumeParser::new(),
        }
    }

    /// Missing links only cost the anchor replacement; unreadable text is fatal.
    pub fn outline(&self, pdf: &[u8]) -> Result<ResumeOutline, ResumeError> {
        let links = match self.source.links(pdf) {
            Ok(links) => links,
            Err(e) => {
                tracing::warn!("Could not extract hyperlinks: {}", e);
                Vec::new()
            }
        };

        let pages = self.source.pages(pdf)?;
        tracing::debug!(pages = pages.len(), links = links.len(), "Parsing resume text");

        self.parser.parse(&pages, &links)
    }
}
