//! DOCX loading: reads `word/document.xml` out of the package and walks it
//! with `quick-xml`.
//!
//! Only direct children of `w:body` count. Body paragraphs become
//! [`Document::paragraphs`]; body tables become [`Table`]s whose cells hold
//! the cell's own paragraphs joined with `\n`. Run text comes from `w:t`,
//! with `w:tab` as `\t` and `w:br`/`w:cr` as `\n`. Paragraphs nested in text
//! boxes or inner tables are skipped.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use super::document::{Document, Table};
use crate::error::ExtractError;

const MAIN_PART: &str = "word/document.xml";

const BODY: &[u8] = b"w:body";
const PARAGRAPH: &[u8] = b"w:p";
const HYPERLINK: &[u8] = b"w:hyperlink";
const RUN: &[u8] = b"w:r";
const TEXT: &[u8] = b"w:t";
const TABLE: &[u8] = b"w:tbl";
const ROW: &[u8] = b"w:tr";
const CELL: &[u8] = b"w:tc";

/// Loads body paragraphs and tables from a `.docx` file.
pub fn load_docx(path: &Path) -> Result<Document, ExtractError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ExtractError::NotFound(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    let format_error = |reason: String| ExtractError::Format {
        path: path.to_path_buf(),
        reason,
    };

    let mut archive = zip::ZipArchive::new(file)
        .map_err(|e| format_error(format!("not a DOCX package: {}", e)))?;
    let mut xml = String::new();
    archive
        .by_name(MAIN_PART)
        .map_err(|e| format_error(format!("missing {}: {}", MAIN_PART, e)))?
        .read_to_string(&mut xml)
        .map_err(|e| format_error(format!("unreadable {}: {}", MAIN_PART, e)))?;

    let document = parse_document_xml(&xml).map_err(format_error)?;

    debug!(
        path = %path.display(),
        paragraphs = document.paragraphs.len(),
        tables = document.tables.len(),
        "Loaded DOCX"
    );
    Ok(document)
}

/// Where the paragraph being collected will end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Owner {
    Body,
    Cell,
}

#[derive(Debug)]
struct OpenParagraph {
    /// Stack depth of the `w:p` element itself.
    depth: usize,
    owner: Owner,
    text: String,
}

#[derive(Default)]
struct Walker {
    stack: Vec<Vec<u8>>,
    paragraphs: Vec<String>,
    tables: Vec<Table>,
    table: Option<Table>,
    row: Option<Vec<String>>,
    cell: Option<Vec<String>>,
    paragraph: Option<OpenParagraph>,
}

impl Walker {
    fn path_ends_with(&self, tail: &[&[u8]]) -> bool {
        self.stack.len() >= tail.len()
            && self.stack[self.stack.len() - tail.len()..]
                .iter()
                .zip(tail)
                .all(|(name, want)| name.as_slice() == *want)
    }

    /// Owner for a paragraph starting at the current position, if collected.
    fn paragraph_owner(&self) -> Option<Owner> {
        if self.path_ends_with(&[BODY]) {
            Some(Owner::Body)
        } else if self.path_ends_with(&[BODY, TABLE, ROW, CELL]) {
            Some(Owner::Cell)
        } else {
            None
        }
    }

    /// True when `stack` ends in a run of the paragraph being collected.
    fn is_collected_run(&self, stack: &[Vec<u8>]) -> bool {
        let Some(open) = &self.paragraph else {
            return false;
        };
        let len = stack.len();
        if len < open.depth + 2 || stack[len - 1].as_slice() != RUN {
            return false;
        }
        // w:p > w:r, or w:p > w:hyperlink > w:r
        len == open.depth + 2
            || (len == open.depth + 3 && stack[len - 2].as_slice() == HYPERLINK)
    }

    fn in_collected_run(&self) -> bool {
        self.is_collected_run(&self.stack)
    }

    fn in_collected_text(&self) -> bool {
        match self.stack.split_last() {
            Some((last, rest)) if last.as_slice() == TEXT => self.is_collected_run(rest),
            _ => false,
        }
    }

    fn push_text(&mut self, text: &str) {
        if let Some(open) = self.paragraph.as_mut() {
            open.text.push_str(text);
        }
    }

    fn start(&mut self, name: &[u8]) {
        match name {
            PARAGRAPH if self.paragraph.is_none() => {
                if let Some(owner) = self.paragraph_owner() {
                    self.paragraph = Some(OpenParagraph {
                        depth: self.stack.len(),
                        owner,
                        text: String::new(),
                    });
                }
            }
            TABLE if self.path_ends_with(&[BODY]) => self.table = Some(Table::default()),
            ROW if self.path_ends_with(&[BODY, TABLE]) => self.row = Some(Vec::new()),
            CELL if self.path_ends_with(&[BODY, TABLE, ROW]) => self.cell = Some(Vec::new()),
            _ => {}
        }
        self.stack.push(name.to_vec());
    }

    fn end(&mut self) {
        let Some(name) = self.stack.pop() else {
            return;
        };
        match name.as_slice() {
            PARAGRAPH => {
                if self
                    .paragraph
                    .as_ref()
                    .is_some_and(|open| open.depth == self.stack.len())
                {
                    if let Some(open) = self.paragraph.take() {
                        self.finish_paragraph(open.owner, open.text);
                    }
                }
            }
            TABLE if self.path_ends_with(&[BODY]) => {
                if let Some(table) = self.table.take() {
                    self.tables.push(table);
                }
            }
            ROW if self.path_ends_with(&[BODY, TABLE]) => {
                if let (Some(row), Some(table)) = (self.row.take(), self.table.as_mut()) {
                    table.rows.push(row);
                }
            }
            CELL if self.path_ends_with(&[BODY, TABLE, ROW]) => {
                if let (Some(cell), Some(row)) = (self.cell.take(), self.row.as_mut()) {
                    row.push(cell.join("\n"));
                }
            }
            _ => {}
        }
    }

    /// Self-closing element, e.g. `<w:tab/>` or an empty `<w:p/>`.
    fn empty(&mut self, name: &[u8]) {
        match name {
            PARAGRAPH if self.paragraph.is_none() => {
                if let Some(owner) = self.paragraph_owner() {
                    self.finish_paragraph(owner, String::new());
                }
            }
            b"w:tab" if self.in_collected_run() => self.push_text("\t"),
            b"w:br" | b"w:cr" if self.in_collected_run() => self.push_text("\n"),
            _ => {
                self.start(name);
                self.end();
            }
        }
    }

    fn finish_paragraph(&mut self, owner: Owner, text: String) {
        match owner {
            Owner::Body => self.paragraphs.push(text),
            Owner::Cell => {
                if let Some(cell) = self.cell.as_mut() {
                    cell.push(text);
                }
            }
        }
    }
}

fn element_name(e: &BytesStart<'_>) -> Vec<u8> {
    e.name().as_ref().to_vec()
}

/// Parses the main document part into paragraphs and tables.
fn parse_document_xml(xml: &str) -> Result<Document, String> {
    let mut reader = Reader::from_str(xml);
    let mut walker = Walker::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => walker.start(&element_name(&e)),
            Ok(Event::End(_)) => walker.end(),
            Ok(Event::Empty(e)) => walker.empty(&element_name(&e)),
            Ok(Event::Text(t)) if walker.in_collected_text() => {
                let text = t.unescape().map_err(|e| format!("bad text in document.xml: {}", e))?;
                walker.push_text(&text);
            }
            Ok(Event::CData(t)) if walker.in_collected_text() => {
                walker.push_text(&String::from_utf8_lossy(&t));
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(format!(
                    "malformed document.xml at byte {}: {}",
                    reader.buffer_position(),
                    e
                ))
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(Document::new(walker.paragraphs, walker.tables))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use tempfile::TempDir;

    fn body(inner: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}<w:sectPr/></w:body></w:document>"#,
            inner
        )
    }

    fn write_docx(path: &Path, document_xml: &str) {
        let file = fs::File::create(path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated);
        zip.start_file("word/document.xml", options).unwrap();
        zip.write_all(document_xml.as_bytes()).unwrap();
        zip.finish().unwrap();
    }

    #[test]
    fn test_body_paragraphs_in_order() {
        let xml = body(
            r#"<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr><w:r><w:t>Soru</w:t></w:r><w:r><w:t xml:space="preserve"> 1</w:t></w:r></w:p>
<w:p/>
<w:p><w:r><w:t>A)</w:t><w:tab/><w:t>however</w:t><w:br/><w:t>B) so</w:t></w:r></w:p>"#,
        );
        let doc = parse_document_xml(&xml).unwrap();
        assert_eq!(doc.paragraphs, vec!["Soru 1", "", "A)\thowever\nB) so"]);
        assert!(doc.tables.is_empty());
    }

    #[test]
    fn test_cell_paragraphs_joined_with_newline() {
        let xml = body(
            r#"<w:tbl><w:tblPr/><w:tr>
<w:tc><w:tcPr/><w:p><w:r><w:t>Soru 1</w:t></w:r></w:p><w:p><w:r><w:t>A) however</w:t></w:r></w:p></w:tc>
<w:tc><w:p/></w:tc>
</w:tr><w:tr><w:tc><w:p><w:hyperlink><w:r><w:t>link</w:t></w:r></w:hyperlink></w:p></w:tc></w:tr></w:tbl>"#,
        );
        let doc = parse_document_xml(&xml).unwrap();
        assert!(doc.paragraphs.is_empty());
        assert_eq!(doc.tables.len(), 1);
        assert_eq!(
            doc.tables[0].rows,
            vec![
                vec!["Soru 1\nA) however".to_string(), String::new()],
                vec!["link".to_string()],
            ]
        );
    }

    #[test]
    fn test_nested_content_is_skipped() {
        let xml = body(
            r#"<w:p><w:r><w:t>Outer</w:t><w:drawing><w:txbxContent><w:p><w:r><w:t>Box</w:t></w:r></w:p></w:txbxContent></w:drawing></w:r></w:p>
<w:tbl><w:tr><w:tc><w:p><w:r><w:t>Cell</w:t></w:r></w:p>
<w:tbl><w:tr><w:tc><w:p><w:r><w:t>Inner</w:t></w:r></w:p></w:tc></w:tr></w:tbl></w:tc></w:tr></w:tbl>
<w:p><w:r><w:instrText>PAGE</w:instrText><w:t>After</w:t></w:r></w:p>"#,
        );
        let doc = parse_document_xml(&xml).unwrap();
        assert_eq!(doc.paragraphs, vec!["Outer", "After"]);
        assert_eq!(doc.tables.len(), 1);
        assert_eq!(doc.tables[0].rows, vec![vec!["Cell".to_string()]]);
    }

    #[test]
    fn test_escaped_text_is_unescaped() {
        let xml = body(r#"<w:p><w:r><w:t>Tom &amp; Jerry &lt;3</w:t></w:r></w:p>"#);
        let doc = parse_document_xml(&xml).unwrap();
        assert_eq!(doc.paragraphs, vec!["Tom & Jerry <3"]);
    }

    #[test]
    fn test_load_docx_from_package() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("exam.docx");
        write_docx(
            &path,
            &body(r#"<w:p><w:r><w:t>Okuma parçası</w:t></w:r></w:p>"#),
        );

        let doc = load_docx(&path).unwrap();
        assert_eq!(doc.paragraphs, vec!["Okuma parçası"]);
    }

    #[test]
    fn test_missing_document_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = load_docx(&dir.path().join("missing.docx")).unwrap_err();
        assert!(matches!(err, ExtractError::NotFound(_)));
    }

    #[test]
    fn test_non_docx_file_is_format_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.docx");
        fs::write(&path, "plain text, not a zip package").unwrap();

        let err = load_docx(&path).unwrap_err();
        assert!(matches!(err, ExtractError::Format { .. }));
    }

    #[test]
    fn test_zip_without_document_part_is_format_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.docx");
        let mut zip = zip::ZipWriter::new(fs::File::create(&path).unwrap());
        zip.start_file("readme.txt", zip::write::SimpleFileOptions::default())
            .unwrap();
        zip.write_all(b"hi").unwrap();
        zip.finish().unwrap();

        let err = load_docx(&path).unwrap_err();
        assert!(matches!(err, ExtractError::Format { .. }));
    }
}
