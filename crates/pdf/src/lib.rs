use thiserror::Error;

use backend::PdfBackend;

pub mod backend;
#[cfg(any(test, feature = "test-fixtures"))]
pub mod fixtures;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("PDF parsing error: {0}")]
    Parse(String),
    #[error("Document is encrypted")]
    Encrypted,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Extract the plain text of every page, concatenated in page order.
///
/// Any page that cannot be decoded fails the whole document; callers that
/// need a best-effort string decide how to degrade.
pub fn extract_text(bytes: &[u8]) -> Result<String, PdfError> {
    let backend = backend::LopdfBackend::load_bytes(bytes)?;
    collect_pages(&backend)
}

/// Read a PDF from disk and extract its text.
pub fn extract_text_from_path(path: impl AsRef<std::path::Path>) -> Result<String, PdfError> {
    let bytes = std::fs::read(path)?;
    extract_text(&bytes)
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn collect_pages(backend: &impl PdfBackend) -> Result<String, PdfError> {
    let mut text = String::new();
    for page_number in backend.pages().keys() {
        text.push_str(&backend.page_text(*page_number)?);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::backend::PageId;
    use super::*;

    struct FakeBackend {
        pages: BTreeMap<u32, String>,
        broken: Option<u32>,
    }

    impl PdfBackend for FakeBackend {
        fn pages(&self) -> BTreeMap<u32, PageId> {
            self.pages.keys().map(|&n| (n, (n, 0))).collect()
        }

        fn page_text(&self, page_number: u32) -> Result<String, PdfError> {
            if self.broken == Some(page_number) {
                return Err(PdfError::Parse("broken page".to_string()));
            }
            Ok(self.pages[&page_number].clone())
        }
    }

    #[test]
    fn test_collect_pages_in_page_order() {
        let backend = FakeBackend {
            pages: BTreeMap::from([
                (2, "second\n".to_string()),
                (1, "first\n".to_string()),
                (3, "third\n".to_string()),
            ]),
            broken: None,
        };

        assert_eq!(collect_pages(&backend).unwrap(), "first\nsecond\nthird\n");
    }

    #[test]
    fn test_collect_pages_empty_document() {
        let backend = FakeBackend {
            pages: BTreeMap::new(),
            broken: None,
        };

        assert_eq!(collect_pages(&backend).unwrap(), "");
    }

    #[test]
    fn test_collect_pages_fails_on_broken_page() {
        let backend = FakeBackend {
            pages: BTreeMap::from([(1, "ok".to_string()), (2, "lost".to_string())]),
            broken: Some(2),
        };

        assert!(matches!(collect_pages(&backend), Err(PdfError::Parse(_))));
    }

    #[test]
    fn test_extract_text_rejects_empty_bytes() {
        assert!(extract_text(&[]).is_err());
    }

    #[test]
    fn test_extract_text_from_missing_path() {
        let result = extract_text_from_path("/nonexistent/wordlight/missing.pdf");
        assert!(matches!(result, Err(PdfError::Io(_))));
    }

    #[test]
    fn test_extract_text_from_fixture() {
        let bytes = fixtures::text_pdf(&["Apple pie and apple cider", "Second page"]).unwrap();
        let text = extract_text(&bytes).unwrap();

        assert!(text.contains("Apple pie and apple cider"));
        assert!(text.contains("Second page"));
        let first = text.find("Apple").unwrap();
        let second = text.find("Second").unwrap();
        assert!(first < second);
    }
}
