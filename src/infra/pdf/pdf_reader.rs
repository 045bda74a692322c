// Text comes from pdf-extract; link annotations are read straight from the
// object tree with lopdf. An annotation's anchor text is its `/Contents`
// entry, the only text a link annotation carries itself.

use lopdf::{Document, Object};

use crate::core::resume::{LinkAnchor, PdfTextSource, ResumeError};

const PAGE_SEPARATOR: char = '\x0c';

#[derive(Debug, Default, Clone, Copy)]
pub struct PdfReader;

impl PdfReader {
    pub fn new() -> Self {
        Self
    }
}

impl PdfTextSource for PdfReader {
    fn pages(&self, pdf: &[u8]) -> Result<Vec<String>, ResumeError> {
        let text = pdf_extract::extract_text_from_mem(pdf)
            .map_err(|e| ResumeError::Pdf(e.to_string()))?;
        Ok(text.split(PAGE_SEPARATOR).map(str::to_string).collect())
    }

    fn links(&self, pdf: &[u8]) -> Result<Vec<LinkAnchor>, ResumeError> {
        let doc = Document::load_mem(pdf).map_err(|e| ResumeError::Pdf(e.to_string()))?;

        let mut links = Vec::new();
        for page_id in doc.get_pages().into_values() {
            let page = doc
                .get_dictionary(page_id)
                .map_err(|e| ResumeError::Pdf(e.to_string()))?;
            let Ok(annots) = page.get(b"Annots") else {
                continue;
            };
            let (_, annots) = doc
                .dereference(annots)
                .map_err(|e| ResumeError::Pdf(e.to_string()))?;
            let annots = annots
                .as_array()
                .map_err(|e| ResumeError::Pdf(e.to_string()))?;

            links.extend(annots.iter().filter_map(|annot| uri_link(&doc, annot)));
        }

        tracing::debug!(links = links.len(), "Read link annotations");
        Ok(links)
    }
}

/// `Some` only for `/Link` annotations with a `/URI` action.
fn uri_link(doc: &Document, annot: &Object) -> Option<LinkAnchor> {
    let (_, annot) = doc.dereference(annot).ok()?;
    let annot = annot.as_dict().ok()?;
    if annot.get(b"Subtype").and_then(Object::as_name).ok()? != b"Link" {
        return None;
    }

    let (_, action) = doc.dereference(annot.get(b"A").ok()?).ok()?;
    let uri = action.as_dict().ok()?.get(b"URI").and_then(Object::as_str).ok()?;
    let anchor = annot
        .get(b"Contents")
        .and_then(Object::as_str)
        .map(decode_text)
        .unwrap_or_default();

    Some(LinkAnchor::new(anchor.trim(), decode_text(uri)))
}

/// PDF text strings are UTF-16BE when they start with a byte order mark.
fn decode_text(bytes: &[u8]) -> String {
    match bytes {
        [0xFE, 0xFF, rest @ ..] => {
            let units: Vec<u16> = rest
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16_lossy(&units)
        }
        _ => String::from_utf8_lossy(bytes).into_owned(),
    }
}
