use std::collections::HashMap;

use crate::matcher::tokenize;

/// What to do with ranked words once the palette runs out of styles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Start over from the first style.
    #[default]
    Cycle,
    /// Leave the remaining words unwrapped.
    Unstyled,
}

/// Ordered list of inline CSS styles, assigned to matched words by rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette(Vec<String>);

impl Default for Palette {
    fn default() -> Self {
        Palette::new([
            "background-color: yellow;",
            "background-color: pink;",
            "background-color: lightblue;",
        ])
    }
}

impl Palette {
    pub fn new<I, S>(styles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Palette(styles.into_iter().map(Into::into).collect())
    }

    pub fn styles(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Style for the word at `rank`, or `None` if it stays unstyled.
    pub fn style_for(&self, rank: usize, policy: OverflowPolicy) -> Option<&str> {
        if self.0.is_empty() {
            return None;
        }

        let idx = match policy {
            OverflowPolicy::Cycle => rank % self.0.len(),
            OverflowPolicy::Unstyled => rank,
        };

        self.0.get(idx).map(String::as_str)
    }
}

/// Wrap every token whose lower-case form is one of `ranked` in a styled span.
///
/// Works in a single pass over the same token stream the matcher counts, so
/// every counted occurrence is wrapped exactly once and spans never nest.
/// Text outside spans is HTML-escaped.
pub fn highlight(
    text: &str,
    ranked: &[String],
    palette: &Palette,
    policy: OverflowPolicy,
) -> String {
    let styles: HashMap<&str, &str> = ranked
        .iter()
        .enumerate()
        .filter_map(|(rank, word)| {
            palette
                .style_for(rank, policy)
                .map(|style| (word.as_str(), style))
        })
        .collect();

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    for token in tokenize(text) {
        html_escape::encode_text_to_string(&text[cursor..token.start], &mut out);

        match styles.get(token.text.to_lowercase().as_str()) {
            Some(style) => {
                out.push_str("<span style=\"");
                html_escape::encode_double_quoted_attribute_to_string(style, &mut out);
                out.push_str("\">");
                html_escape::encode_text_to_string(token.text, &mut out);
                out.push_str("</span>");
            }
            None => {
                html_escape::encode_text_to_string(token.text, &mut out);
            }
        }

        cursor = token.end();
    }

    html_escape::encode_text_to_string(&text[cursor..], &mut out);
    out
}
