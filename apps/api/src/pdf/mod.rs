//! PDF text extraction.
//!
//! Extraction is best-effort: pages without text are skipped, and a document that cannot be
//! opened or parsed at all yields an empty string after logging. The caller decides whether an
//! empty result is fatal.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("failed to read PDF: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse PDF: {0}")]
    Parse(String),
}

/// Text extracted from one page, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageText {
    Text(String),
    Empty,
}

impl From<String> for PageText {
    fn from(text: String) -> Self {
        if text.is_empty() {
            PageText::Empty
        } else {
            PageText::Text(text)
        }
    }
}

/// Reads the per-page text of a PDF file. An `Err` means the document as a whole is unusable.
///
/// Implementations are blocking; `extract_text` runs them on the blocking pool.
pub trait PdfReader: Send + Sync {
    fn read_pages(&self, path: &Path) -> Result<Vec<PageText>, PdfError>;
}

/// `pdf-extract` backed reader.
pub struct PdfExtractReader;

impl PdfReader for PdfExtractReader {
    fn read_pages(&self, path: &Path) -> Result<Vec<PageText>, PdfError> {
        let bytes = std::fs::read(path)?;
        let pages = pdf_extract::extract_text_from_mem_by_pages(&bytes)
            .map_err(|e| PdfError::Parse(e.to_string()))?;
        Ok(pages.into_iter().map(PageText::from).collect())
    }
}

/// Joins page texts in order, each followed by a newline. Empty pages contribute nothing.
pub fn join_pages(pages: &[PageText]) -> String {
    let mut text = String::new();
    for page in pages {
        if let PageText::Text(page_text) = page {
            text.push_str(page_text);
            text.push('\n');
        }
    }
    text
}

/// Extracts the text of the PDF at `path`, swallowing every failure.
///
/// Failures (unreadable file, malformed PDF, or a panic inside the PDF library) are logged
/// and produce an empty string.
pub async fn extract_text(reader: Arc<dyn PdfReader>, path: PathBuf) -> String {
    let shown = path.display().to_string();
    match tokio::task::spawn_blocking(move || reader.read_pages(&path)).await {
        Ok(Ok(pages)) => {
            let text = join_pages(&pages);
            debug!(
                "Extracted {} chars from {} page(s) of {shown}",
                text.len(),
                pages.len()
            );
            text
        }
        Ok(Err(e)) => {
            warn!("Error reading PDF {shown}: {e}");
            String::new()
        }
        Err(e) => {
            warn!("PDF extraction task for {shown} did not complete: {e}");
            String::new()
        }
    }
}
