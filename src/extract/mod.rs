//! Document text extractor.
//!
//! Pulls paragraph text, then table cell text, out of a DOCX file and writes
//! the non-blank fragments to a UTF-8 text file, one per line.

pub mod document;
pub mod docx;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

pub use document::{Document, Table};
pub use docx::load_docx;

use crate::error::ExtractError;

/// Default output file, relative to the working directory.
pub const DEFAULT_OUTPUT_PATH: &str = "exam_content.txt";

/// Number of lines echoed after a run.
pub const DEFAULT_PREVIEW_LINES: usize = 10;

/// Maximum characters shown per preview line.
pub const DEFAULT_PREVIEW_WIDTH: usize = 100;

/// Inputs for one extractor run.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub source: PathBuf,
    pub output: PathBuf,
    pub preview_lines: usize,
    pub preview_width: usize,
}

impl ExtractOptions {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            output: PathBuf::from(DEFAULT_OUTPUT_PATH),
            preview_lines: DEFAULT_PREVIEW_LINES,
            preview_width: DEFAULT_PREVIEW_WIDTH,
        }
    }
}

/// What an extractor run produced.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractReport {
    pub source: PathBuf,
    pub output: PathBuf,
    pub line_count: usize,
    pub preview: Vec<String>,
}

/// Collects the document's non-blank fragments in reading order.
pub fn extract_fragments(document: &Document) -> Vec<String> {
    document.fragments().map(str::to_owned).collect()
}

/// Writes `lines` joined by `\n`, replacing any existing file.
pub fn write_lines(path: &Path, lines: &[String]) -> Result<(), ExtractError> {
    fs::write(path, lines.join("\n"))?;
    Ok(())
}

/// First `count` lines, each cut to at most `width` characters.
pub fn preview(lines: &[String], count: usize, width: usize) -> Vec<String> {
    lines
        .iter()
        .take(count)
        .map(|line| line.chars().take(width).collect())
        .collect()
}

/// Runs the extractor end to end.
pub fn extract_document(options: &ExtractOptions) -> Result<ExtractReport, ExtractError> {
    let document = load_docx(&options.source)?;
    let lines = extract_fragments(&document);

    write_lines(&options.output, &lines)?;
    info!(
        source = %options.source.display(),
        output = %options.output.display(),
        lines = lines.len(),
        "Extracted document text"
    );

    Ok(ExtractReport {
        source: options.source.clone(),
        output: options.output.clone(),
        line_count: lines.len(),
        preview: preview(&lines, options.preview_lines, options.preview_width),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_extract_fragments_scenario() {
        let doc = Document::new(
            strings(&["Hello", "  "]),
            vec![Table::new(vec![strings(&["World"])])],
        );
        assert_eq!(extract_fragments(&doc), strings(&["Hello", "World"]));
    }

    #[test]
    fn test_write_lines_overwrites_without_trailing_newline() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("exam_content.txt");
        fs::write(&path, "stale content that is longer than the new one").unwrap();

        write_lines(&path, &strings(&["Soru 1", "Cevap: ğüşıöç"])).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "Soru 1\nCevap: ğüşıöç");
    }

    #[test]
    fn test_write_lines_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");
        write_lines(&path, &[]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_preview_limits_count_and_width() {
        let lines: Vec<String> = (1..=15).map(|i| format!("line {}", i)).collect();
        let shown = preview(&lines, 10, 100);
        assert_eq!(shown.len(), 10);
        assert_eq!(shown[9], "line 10");

        let long = vec!["x".repeat(250)];
        assert_eq!(preview(&long, 10, 100)[0].len(), 100);
    }

    #[test]
    fn test_preview_counts_characters_not_bytes() {
        let lines = vec!["ş".repeat(120)];
        let shown = preview(&lines, 10, 100);
        assert_eq!(shown[0].chars().count(), 100);
        assert_eq!(shown[0].len(), 200);
    }

    #[test]
    fn test_extract_document_missing_source() {
        let dir = TempDir::new().unwrap();
        let mut options = ExtractOptions::new(dir.path().join("missing.docx"));
        options.output = dir.path().join("out.txt");

        let err = extract_document(&options).unwrap_err();
        assert!(matches!(err, ExtractError::NotFound(_)));
        assert!(!options.output.exists());
    }
}
