use std::sync::Arc;

use async_trait::async_trait;
use lopdf::Document;

use crate::errors::{AppError, AppResult};

/// Fallback conversion collaborator for PDFs with no extractable text
/// layer (scanned or image-only documents).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PdfTextConverter: Send + Sync {
    async fn convert_pdf_to_text(&self, bytes: &[u8]) -> AppResult<String>;
}

pub struct PdfExtractConverter;

#[async_trait]
impl PdfTextConverter for PdfExtractConverter {
    async fn convert_pdf_to_text(&self, bytes: &[u8]) -> AppResult<String> {
        pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| AppError::DocumentParse(format!("fallback conversion failed: {e}")))
    }
}

pub struct PdfExtractor {
    fallback: Arc<dyn PdfTextConverter>,
}

impl PdfExtractor {
    pub fn new(fallback: Arc<dyn PdfTextConverter>) -> Self {
        Self { fallback }
    }

    /// Extract the text of every page in page order, with no separator
    /// between pages. If the document opens but yields no text at all,
    /// the fallback converter is handed the full original byte slice.
    /// A document that cannot be opened fails immediately.
    pub async fn extract_text(&self, bytes: &[u8]) -> AppResult<String> {
        let document = Document::load_mem(bytes)
            .map_err(|e| AppError::DocumentParse(format!("could not open PDF: {e}")))?;

        let mut text = String::new();
        for (page_number, _) in document.get_pages() {
            // A page with no decodable text layer contributes nothing.
            if let Ok(page_text) = document.extract_text(&[page_number]) {
                text.push_str(&page_text);
            }
        }

        if text.trim().is_empty() {
            log::warn!("no text layer found in PDF, invoking fallback conversion");
            return self.fallback.convert_pdf_to_text(bytes).await;
        }

        Ok(text)
    }
}
