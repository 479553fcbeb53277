use std::collections::BTreeMap;

use crate::PdfError;

/// A page identifier mirroring `lopdf::ObjectId`: (object number, generation number).
pub type PageId = (u32, u16);

// ---------------------------------------------------------------------------
// PdfBackend trait
// ---------------------------------------------------------------------------

/// Source of per-page text.
///
/// Text assembly in [`crate::extract_text`] only goes through this trait, so
/// page ordering and concatenation can be tested against in-memory pages.
pub trait PdfBackend {
    /// 1-based page number to [`PageId`].
    fn pages(&self) -> BTreeMap<u32, PageId>;

    /// Plain text of a single page, identified by its 1-based number.
    fn page_text(&self, page_number: u32) -> Result<String, PdfError>;
}

// ---------------------------------------------------------------------------
// LopdfBackend
// ---------------------------------------------------------------------------

pub struct LopdfBackend {
    doc: lopdf::Document,
}

impl LopdfBackend {
    /// Parse a PDF from memory. Encrypted documents are refused.
    pub fn load_bytes(data: &[u8]) -> Result<Self, PdfError> {
        let doc = lopdf::Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        if doc.is_encrypted() {
            return Err(PdfError::Encrypted);
        }

        Ok(Self { doc })
    }
}

impl PdfBackend for LopdfBackend {
    fn pages(&self) -> BTreeMap<u32, PageId> {
        self.doc.get_pages()
    }

    fn page_text(&self, page_number: u32) -> Result<String, PdfError> {
        self.doc
            .extract_text(&[page_number])
            .map_err(|e| PdfError::Parse(format!("cannot extract text of page {page_number}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn load_bytes_rejects_garbage() {
        let result = LopdfBackend::load_bytes(b"definitely not a pdf");
        assert!(matches!(result, Err(PdfError::Parse(_))));
    }

    #[test]
    fn pages_are_numbered_from_one() {
        let bytes = fixtures::text_pdf(&["one", "two", "three"]).unwrap();
        let backend = LopdfBackend::load_bytes(&bytes).unwrap();

        let numbers: Vec<u32> = backend.pages().keys().copied().collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn page_text_reads_single_page() {
        let bytes = fixtures::text_pdf(&["first page", "second page"]).unwrap();
        let backend = LopdfBackend::load_bytes(&bytes).unwrap();

        let text = backend.page_text(2).unwrap();
        assert!(text.contains("second page"));
        assert!(!text.contains("first page"));
    }
}
