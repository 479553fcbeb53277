use serde::Serialize;

use crate::highlight::{highlight, OverflowPolicy, Palette};
use crate::matcher::{match_words, WordCounts};
use crate::normalize::dehyphenate;

/// Suffix appended to a PDF's file name to name its highlighted rendering.
pub const HIGHLIGHTED_SUFFIX: &str = "_highlighted_text.html";

/// How matched words are styled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOptions {
    pub palette: Palette,
    pub overflow: OverflowPolicy,
}

/// Matches and highlighted text for one PDF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordOccurrenceResult {
    pub file_name: String,
    pub word_occurrences: WordCounts,
    pub highlighted_text: String,
}

impl WordOccurrenceResult {
    pub fn empty(file_name: impl Into<String>) -> Self {
        WordOccurrenceResult {
            file_name: file_name.into(),
            word_occurrences: WordCounts::default(),
            highlighted_text: String::new(),
        }
    }
}

/// Run normalization, matching and highlighting over a document's raw text.
///
/// The text is lower-cased first; an empty extraction gives an empty result.
pub fn process_document(
    file_name: &str,
    raw_text: &str,
    words: &[String],
    options: &ProcessOptions,
) -> WordOccurrenceResult {
    if raw_text.is_empty() {
        return WordOccurrenceResult::empty(file_name);
    }

    let lowered = raw_text.to_lowercase();
    let text = dehyphenate(&lowered);
    let summary = match_words(&text, words);
    let highlighted_text = highlight(&text, &summary.ranked, &options.palette, options.overflow);

    WordOccurrenceResult {
        file_name: file_name.to_string(),
        word_occurrences: summary.counts,
        highlighted_text,
    }
}

/// `report.pdf` -> `report.pdf_highlighted_text.html`
pub fn highlighted_file_name(file_name: &str) -> String {
    format!("{file_name}{HIGHLIGHTED_SUFFIX}")
}

/// Case-insensitive `.pdf` suffix check.
pub fn is_pdf_file_name(name: &str) -> bool {
    name.to_lowercase().ends_with(".pdf")
}

/// Wrap highlighted text into the standalone HTML document offered for download.
pub fn render_highlighted_document(highlighted_text: &str) -> String {
    let mut html = String::with_capacity(highlighted_text.len() + 96);
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<title>Highlighted Text</title>\n</head>\n");
    html.push_str("<body>\n");
    html.push_str(highlighted_text);
    html.push_str("\n</body>\n</html>");
    html
}
