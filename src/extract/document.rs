//! In-memory document model used by the extractor.

/// A table as rows of cell texts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Cell texts in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().flatten().map(String::as_str)
    }
}

/// Body paragraphs and tables of a loaded document, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub paragraphs: Vec<String>,
    pub tables: Vec<Table>,
}

impl Document {
    pub fn new(paragraphs: Vec<String>, tables: Vec<Table>) -> Self {
        Self { paragraphs, tables }
    }

    /// Non-blank text fragments: every paragraph first, then every table cell.
    ///
    /// Blank means empty after trimming. Kept fragments are returned untrimmed.
    pub fn fragments(&self) -> impl Iterator<Item = &str> {
        self.paragraphs
            .iter()
            .map(String::as_str)
            .chain(self.tables.iter().flat_map(|table| table.cells()))
            .filter(|text| !text.trim().is_empty())
    }
}
