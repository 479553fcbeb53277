//! Core library for wordlight
//!
//! This crate implements the **Functional Core** of the wordlight application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! - **`wordlight_core`** (this crate): Pure transformation functions with zero I/O
//! - **`pdf`**: Text extraction from PDF bytes
//! - **`wordlight`**: File system, HTTP and CLI (the Imperative Shell)
//!
//! Everything here takes strings in and gives strings or plain data back, so it
//! is tested with fixture text and no mocking.
//!
//! # Module Organization
//!
//! - [`normalize`]: Repair of words split across line breaks
//! - [`matcher`]: Word-list parsing, tokenization and occurrence counting
//! - [`highlight`]: Palette assignment and highlighted markup
//! - [`report`]: Per-document pipeline and the downloadable HTML artifact
//! - [`page`]: The upload form and results page
//!
//! # Example Usage
//!
//! ```rust
//! use wordlight_core::report::{process_document, ProcessOptions};
//!
//! let words = vec!["apple".to_string()];
//! let options = ProcessOptions::default();
//! let result = process_document("fruit.pdf", "An Apple a day", &words, &options);
//!
//! assert_eq!(result.word_occurrences.get("apple"), Some(1));
//! assert!(result
//!     .highlighted_text
//!     .contains("<span style=\"background-color: yellow;\">apple</span>"));
//! ```

pub mod highlight;
pub mod matcher;
pub mod normalize;
pub mod page;
pub mod report;
