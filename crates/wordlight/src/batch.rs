use std::path::{Path, PathBuf};

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use wordlight_core::matcher::parse_word_list;
use wordlight_core::report::{
    highlighted_file_name, is_pdf_file_name, process_document, render_highlighted_document,
    ProcessOptions, WordOccurrenceResult,
};

use crate::config::ProcessArgs;
use crate::prelude::{println, *};

#[derive(Debug, clap::Args)]
pub struct BatchOptions {
    /// Directory containing the PDF files
    pub dir: PathBuf,

    /// Comma separated word list file
    #[arg(short, long, env = "WORDLIGHT_WORDS")]
    pub words: PathBuf,

    /// Where to write the highlighted HTML files (default: the PDF directory)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    #[clap(flatten)]
    pub process: ProcessArgs,
}

/// Names of the files in `dir` with a `.pdf` suffix (any case), sorted.
pub fn list_pdfs(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut names: Vec<String> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| is_pdf_file_name(name))
        .collect();
    names.sort();
    Ok(names)
}

/// Text of the PDF at `path`, or an empty string if it cannot be read.
pub fn extract_or_empty(path: &Path) -> String {
    match pdf::extract_text_from_path(path) {
        Ok(text) => text,
        Err(e) => {
            log::warn!("Error while processing {}: {e}", path.display());
            String::new()
        }
    }
}

pub fn process_file(
    dir: &Path,
    file_name: &str,
    words: &[String],
    options: &ProcessOptions,
) -> WordOccurrenceResult {
    let text = extract_or_empty(&dir.join(file_name));
    let result = process_document(file_name, &text, words, options);
    log::debug!(
        "{file_name}: {} distinct word(s), {} occurrence(s)",
        result.word_occurrences.len(),
        result.word_occurrences.total()
    );
    result
}

/// Process every PDF of `dir` in order. A file that cannot be extracted gives
/// an empty entry and the batch continues.
pub fn process_directory(
    dir: &Path,
    words: &[String],
    options: &ProcessOptions,
) -> std::io::Result<Vec<WordOccurrenceResult>> {
    let names = list_pdfs(dir)?;
    log::info!("Processing {} PDF file(s) in {}", names.len(), dir.display());

    Ok(names
        .iter()
        .map(|name| process_file(dir, name, words, options))
        .collect())
}

/// Write the downloadable HTML document for `result` into `dir`.
pub fn write_highlighted(dir: &Path, result: &WordOccurrenceResult) -> std::io::Result<PathBuf> {
    let path = dir.join(highlighted_file_name(&result.file_name));
    std::fs::write(&path, render_highlighted_document(&result.highlighted_text))?;
    Ok(path)
}

/// Process and write every PDF of `dir`, advancing `progress` per file.
fn highlight_all(
    dir: &Path,
    out_dir: &Path,
    words: &[String],
    options: &ProcessOptions,
    progress: &ProgressBar,
) -> Result<Vec<(WordOccurrenceResult, PathBuf)>> {
    let names = list_pdfs(dir).wrap_err_with(|| f!("Failed to list {}", dir.display()))?;
    progress.set_length(names.len() as u64);

    let mut outcome = Vec::with_capacity(names.len());
    for name in &names {
        progress.set_message(name.clone());
        let result = process_file(dir, name, words, options);
        let path = write_highlighted(out_dir, &result)?;
        outcome.push((result, path));
        progress.inc(1);
    }
    progress.finish_and_clear();

    Ok(outcome)
}

fn render_json(outcome: &[(WordOccurrenceResult, PathBuf)]) -> serde_json::Result<String> {
    let results: Vec<&WordOccurrenceResult> = outcome.iter().map(|(r, _)| r).collect();
    serde_json::to_string_pretty(&results)
}

pub async fn run(options: BatchOptions, _global: crate::Global) -> Result<()> {
    let raw = std::fs::read_to_string(&options.words)
        .wrap_err_with(|| f!("Failed to read word list {}", options.words.display()))?;
    let words = parse_word_list(&raw, options.process.trim_words);
    let process = options.process.process_options();
    let out_dir = options.out.clone().unwrap_or_else(|| options.dir.clone());
    std::fs::create_dir_all(&out_dir)?;

    let json = options.json;
    let dir = options.dir.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        let progress = if json {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(0)
        };
        if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}") {
            progress.set_style(style);
        }
        highlight_all(&dir, &out_dir, &words, &process, &progress)
    })
    .await??;

    if json {
        println!("{}", render_json(&outcome)?);
        return Ok(());
    }

    if outcome.is_empty() {
        println!("{}", "No PDF files found.".yellow());
        return Ok(());
    }

    for (result, path) in &outcome {
        println!("\n{}", result.file_name.bright_cyan().bold());

        if result.word_occurrences.is_empty() {
            println!("  {}", "No matching words found.".yellow());
        } else {
            let mut table = new_table();
            table.add_row(prettytable::row!["Word", "Occurrences"]);
            for (word, count) in result.word_occurrences.iter() {
                table.add_row(prettytable::row![word, count]);
            }
            table.printstd();
        }

        println!("  {}: {}", "Highlighted".green(), path.display());
    }

    Ok(())
}
