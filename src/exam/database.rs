//! JSON database document holding exam collections.
//!
//! The whole file is read into memory, patched, and written back in place.
//! Top-level keys keep their original order and literal Unicode is written
//! as-is.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::record::ExamRecord;
use crate::error::ExamError;

/// Default collection name for exam records.
pub const DEFAULT_EXAM_COLLECTION: &str = "exams";

/// In-memory copy of a JSON database file.
#[derive(Debug, Clone)]
pub struct ExamDatabase {
    path: PathBuf,
    root: Map<String, Value>,
}

impl ExamDatabase {
    /// Reads and parses the database file.
    pub fn load(path: &Path) -> Result<Self, ExamError> {
        let path = path.to_path_buf();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ExamError::NotFound(path));
            }
            Err(e) => return Err(e.into()),
        };

        let value: Value = serde_json::from_str(&content).map_err(|source| ExamError::Parse {
            path: path.clone(),
            source,
        })?;

        match value {
            Value::Object(root) => {
                debug!(path = %path.display(), keys = root.len(), "Loaded database");
                Ok(Self { path, root })
            }
            _ => Err(ExamError::NotAnObject(path)),
        }
    }

    /// Returns the named collection, if present.
    pub fn collection(&self, name: &str) -> Option<&Value> {
        self.root.get(name)
    }

    /// Clears the named collection and leaves `record` as its only entry.
    ///
    /// Any previous entries are discarded. A missing key is created in place.
    pub fn replace_collection(
        &mut self,
        name: &str,
        record: &ExamRecord,
    ) -> Result<usize, ExamError> {
        let previous = match self.root.get(name) {
            Some(Value::Array(items)) => items.len(),
            Some(other) => {
                warn!(
                    collection = name,
                    kind = value_kind(other),
                    "Collection is not an array, overwriting"
                );
                0
            }
            None => {
                warn!(collection = name, "Collection missing from database, creating it");
                0
            }
        };

        let mut items = Vec::with_capacity(1);
        items.push(serde_json::to_value(record)?);
        self.root.insert(name.to_string(), Value::Array(items));

        debug!(collection = name, discarded = previous, "Replaced collection");
        Ok(previous)
    }

    /// Serializes the document with two-space indentation.
    pub fn to_pretty_string(&self) -> Result<String, ExamError> {
        Ok(serde_json::to_string_pretty(&self.root)?)
    }

    /// Writes the document back to the path it was loaded from.
    ///
    /// The file is truncated and rewritten directly; there is no temp-file swap.
    pub fn save(&self) -> Result<(), ExamError> {
        let content = self.to_pretty_string()?;
        fs::write(&self.path, content)?;
        debug!(path = %self.path.display(), "Saved database");
        Ok(())
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
