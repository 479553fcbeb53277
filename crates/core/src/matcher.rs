use std::collections::{HashMap, HashSet};

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use unicode_segmentation::UnicodeSegmentation;

/// Suffixes split off a word the way English tokenizers separate clitics
/// (`apple's` -> `apple` + `'s`).
const CLITICS: &[&str] = &["'s", "\u{2019}s", "n't", "n\u{2019}t", "'re", "'ll", "'ve", "'d", "'m"];

/// A word token and its byte offset in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub start: usize,
    pub text: &'a str,
}

impl Token<'_> {
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }
}

/// Occurrence counts keyed by word, in first-seen order.
///
/// Serializes as a JSON object so the ordering survives in the output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordCounts(Vec<(String, usize)>);

impl WordCounts {
    pub fn get(&self, word: &str) -> Option<usize> {
        self.0.iter().find(|(w, _)| w == word).map(|(_, c)| *c)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(w, c)| (w.as_str(), *c))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all occurrences.
    pub fn total(&self) -> usize {
        self.0.iter().map(|(_, c)| c).sum()
    }
}

impl Serialize for WordCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (word, count) in &self.0 {
            map.serialize_entry(word, count)?;
        }
        map.end()
    }
}

/// Result of matching a word list against a text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSummary {
    pub counts: WordCounts,
    /// Distinct matched words in first-seen order. A word's position here is
    /// its palette rank.
    pub ranked: Vec<String>,
}

/// Split the raw contents of a word-list file on commas.
///
/// Without `trim` the entries are kept literally, so `"apple, pear"` yields
/// `" pear"` which never matches a token.
pub fn parse_word_list(raw: &str, trim: bool) -> Vec<String> {
    raw.split(',')
        .map(|w| if trim { w.trim() } else { w })
        .map(str::to_string)
        .collect()
}

/// Tokenize text on Unicode word boundaries (UAX #29).
///
/// Whitespace and punctuation segments are dropped; trailing English clitics
/// become tokens of their own.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();

    for (start, segment) in text.split_word_bound_indices() {
        if !segment.chars().any(char::is_alphanumeric) {
            continue;
        }

        match split_clitic(segment) {
            Some(at) => {
                tokens.push(Token {
                    start,
                    text: &segment[..at],
                });
                tokens.push(Token {
                    start: start + at,
                    text: &segment[at..],
                });
            }
            None => tokens.push(Token {
                start,
                text: segment,
            }),
        }
    }

    tokens
}

fn split_clitic(segment: &str) -> Option<usize> {
    let lower = segment.to_lowercase();
    // Offsets below are only valid if lower-casing kept the byte length.
    if lower.len() != segment.len() {
        return None;
    }

    CLITICS
        .iter()
        .find(|c| lower.len() > c.len() && lower.ends_with(*c))
        .map(|c| segment.len() - c.len())
}

/// Count the tokens of `text` that equal one of `words`, ignoring case.
///
/// Matching is exact per token: no stemming and no plural folding.
pub fn match_words(text: &str, words: &[String]) -> MatchSummary {
    let targets: HashSet<String> = words.iter().map(|w| w.to_lowercase()).collect();

    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for token in tokenize(text) {
        let lower = token.text.to_lowercase();
        if !targets.contains(&lower) {
            continue;
        }

        match positions.get(&lower) {
            Some(&idx) => counts[idx].1 += 1,
            None => {
                positions.insert(lower.clone(), counts.len());
                counts.push((lower, 1));
            }
        }
    }

    let ranked = counts.iter().map(|(w, _)| w.clone()).collect();

    MatchSummary {
        counts: WordCounts(counts),
        ranked,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    fn token_texts(text: &str) -> Vec<&str> {
        tokenize(text).into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_parse_word_list_literal() {
        assert_eq!(
            parse_word_list("apple, pear,plum", false),
            vec!["apple", " pear", "plum"]
        );
    }

    #[test]
    fn test_parse_word_list_trimmed() {
        assert_eq!(
            parse_word_list("apple, pear ,plum\n", true),
            vec!["apple", "pear", "plum"]
        );
    }

    #[test]
    fn test_parse_word_list_empty_entries_kept() {
        assert_eq!(parse_word_list("a,,b,", false), vec!["a", "", "b", ""]);
    }

    #[test]
    fn test_tokenize_drops_punctuation_and_spaces() {
        assert_eq!(
            token_texts("Hello, world! It works."),
            vec!["Hello", "world", "It", "works"]
        );
    }

    #[test]
    fn test_tokenize_offsets_point_into_source() {
        let text = "one  two\nthree";
        for token in tokenize(text) {
            assert_eq!(&text[token.start..token.end()], token.text);
        }
    }

    #[test]
    fn test_tokenize_splits_hyphenated_compound() {
        assert_eq!(token_texts("well-known"), vec!["well", "known"]);
    }

    #[test]
    fn test_tokenize_splits_clitics() {
        assert_eq!(token_texts("the apple's core"), vec!["the", "apple", "'s", "core"]);
        assert_eq!(token_texts("don't"), vec!["do", "n't"]);
    }

    #[test]
    fn test_tokenize_keeps_numbers() {
        assert_eq!(token_texts("pi is 3.14"), vec!["pi", "is", "3.14"]);
    }

    #[test]
    fn test_match_words_case_insensitive() {
        let summary = match_words("Apple apple APPLE pineapple", &words(&["apple"]));

        assert_eq!(summary.counts.get("apple"), Some(3));
        assert_eq!(summary.ranked, vec!["apple"]);
    }

    #[test]
    fn test_match_words_whole_token_only() {
        let summary = match_words("category cat cats", &words(&["cat"]));

        assert_eq!(summary.counts.get("cat"), Some(1));
        assert_eq!(summary.counts.total(), 1);
    }

    #[test]
    fn test_match_words_no_plural_folding() {
        let summary = match_words("apples and more apples", &words(&["apple"]));
        assert!(summary.counts.is_empty());
        assert!(summary.ranked.is_empty());
    }

    #[test]
    fn test_match_words_first_seen_rank() {
        let summary = match_words("pear apple pear plum", &words(&["plum", "apple", "pear"]));

        assert_eq!(summary.ranked, vec!["pear", "apple", "plum"]);
        let counts: Vec<(&str, usize)> = summary.counts.iter().collect();
        assert_eq!(counts, vec![("pear", 2), ("apple", 1), ("plum", 1)]);
    }

    #[test]
    fn test_match_words_duplicate_targets_harmless() {
        let summary = match_words("apple apple", &words(&["apple", "APPLE", "apple"]));
        assert_eq!(summary.counts.get("apple"), Some(2));
        assert_eq!(summary.counts.len(), 1);
    }

    #[test]
    fn test_match_words_untrimmed_entry_never_matches() {
        let summary = match_words("apple pear", &words(&["apple", " pear"]));
        assert_eq!(summary.counts.get("apple"), Some(1));
        assert_eq!(summary.counts.get("pear"), None);
        assert_eq!(summary.counts.get(" pear"), None);
    }

    #[test]
    fn test_match_words_possessive() {
        let summary = match_words("the apple's skin", &words(&["apple"]));
        assert_eq!(summary.counts.get("apple"), Some(1));
    }

    #[test]
    fn test_match_words_empty_text() {
        assert_eq!(match_words("", &words(&["apple"])), MatchSummary::default());
    }

    #[test]
    fn test_word_counts_serialize_as_ordered_object() {
        let summary = match_words("b a b", &words(&["a", "b"]));
        let json = serde_json::to_string(&summary.counts).unwrap();
        assert_eq!(json, r#"{"b":2,"a":1}"#);
    }
}
