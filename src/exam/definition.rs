//! Exam definitions: the parameters a run builds its record and key from.
//!
//! The built-in definition is YDS Deneme-1. Operators can describe another
//! exam in a YAML file; any field left out falls back to the Deneme-1 value.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::Path;

use serde::Deserialize;

use super::answer_key::AnswerKey;
use super::record::ExamRecord;
use crate::error::ExamError;

pub const DENEME1_ID: u64 = 1;
pub const DENEME1_TITLE: &str = "YDS Deneme-1";
pub const DENEME1_DURATION_MINUTES: u32 = 180;
pub const DENEME1_TOTAL_QUESTIONS: u32 = 80;

/// Answer key as written in a definition file.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AnswerKeySpec {
    /// One letter (A-E) per question, in order.
    Letters(String),
    /// Question number to choice index (0-4).
    Indices(BTreeMap<u32, u8>),
}

impl AnswerKeySpec {
    fn into_answer_key(self) -> Result<AnswerKey, ExamError> {
        match self {
            Self::Letters(letters) => AnswerKey::from_letters(&letters),
            Self::Indices(map) => AnswerKey::from_indices(map),
        }
    }
}

/// On-disk shape of a definition file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DefinitionFile {
    id: Option<u64>,
    title: Option<String>,
    duration: Option<u32>,
    total_questions: Option<u32>,
    answer_key: Option<AnswerKeySpec>,
}

/// A validated exam definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ExamDefinition {
    pub id: u64,
    pub title: String,
    pub duration: u32,
    pub total_questions: u32,
    pub answer_key: AnswerKey,
}

impl ExamDefinition {
    /// The built-in YDS Deneme-1 definition.
    pub fn deneme1() -> Self {
        Self {
            id: DENEME1_ID,
            title: DENEME1_TITLE.to_string(),
            duration: DENEME1_DURATION_MINUTES,
            total_questions: DENEME1_TOTAL_QUESTIONS,
            answer_key: AnswerKey::deneme1(),
        }
    }

    /// Parses a YAML definition, filling gaps from Deneme-1.
    pub fn from_yaml_str(content: &str) -> Result<Self, ExamError> {
        let file: DefinitionFile = serde_yaml::from_str(content)?;
        let base = Self::deneme1();

        let answer_key = match file.answer_key {
            Some(spec) => spec.into_answer_key()?,
            None => base.answer_key,
        };

        let definition = Self {
            id: file.id.unwrap_or(base.id),
            title: file.title.unwrap_or(base.title),
            duration: file.duration.unwrap_or(base.duration),
            total_questions: file.total_questions.unwrap_or(base.total_questions),
            answer_key,
        };
        definition.validate()?;
        Ok(definition)
    }

    /// Loads a YAML definition file.
    pub fn from_yaml_file(path: &Path) -> Result<Self, ExamError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ExamError::NotFound(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };
        Self::from_yaml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ExamError> {
        if self.title.trim().is_empty() {
            return Err(ExamError::InvalidDefinition(
                "title must not be empty".to_string(),
            ));
        }
        if self.duration == 0 {
            return Err(ExamError::InvalidDefinition(
                "duration must be positive".to_string(),
            ));
        }
        if self.total_questions == 0 {
            return Err(ExamError::InvalidDefinition(
                "total_questions must be positive".to_string(),
            ));
        }
        self.answer_key.validate(self.total_questions)
    }

    /// Builds the record that gets stored. The answer key stays out of it.
    pub fn build_record(&self) -> ExamRecord {
        ExamRecord {
            id: self.id,
            title: self.title.clone(),
            duration: self.duration,
            total_questions: self.total_questions,
            sections: Vec::new(),
        }
    }
}

impl Default for ExamDefinition {
    fn default() -> Self {
        Self::deneme1()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exam::answer_key::Choice;

    #[test]
    fn test_deneme1_record() {
        let record = ExamDefinition::deneme1().build_record();
        assert_eq!(record.id, 1);
        assert_eq!(record.title, "YDS Deneme-1");
        assert_eq!(record.duration, 180);
        assert_eq!(record.total_questions, 80);
        assert!(record.sections.is_empty());
    }

    #[test]
    fn test_yaml_with_letter_key() {
        let yaml = r#"
id: 2
title: "YDS Deneme-2"
total_questions: 5
answer_key: "EDCBA"
"#;
        let def = ExamDefinition::from_yaml_str(yaml).unwrap();
        assert_eq!(def.id, 2);
        assert_eq!(def.title, "YDS Deneme-2");
        assert_eq!(def.duration, 180);
        assert_eq!(def.answer_key.len(), 5);
        assert_eq!(def.answer_key.get(1), Some(Choice::E));
    }

    #[test]
    fn test_yaml_with_index_map() {
        let yaml = r#"
total_questions: 3
duration: 30
answer_key:
  1: 0
  2: 4
  3: 2
"#;
        let def = ExamDefinition::from_yaml_str(yaml).unwrap();
        assert_eq!(def.duration, 30);
        assert_eq!(def.answer_key.get(2), Some(Choice::E));
        assert_eq!(def.build_record().total_questions, 3);
    }

    #[test]
    fn test_empty_yaml_falls_back_to_deneme1() {
        let def = ExamDefinition::from_yaml_str("{}").unwrap();
        assert_eq!(def, ExamDefinition::deneme1());
    }

    #[test]
    fn test_key_must_match_question_count() {
        let yaml = "total_questions: 4\nanswer_key: \"ABC\"\n";
        let err = ExamDefinition::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, ExamError::InvalidAnswerKey(_)));
    }

    #[test]
    fn test_rejects_unknown_fields_and_blank_title() {
        assert!(ExamDefinition::from_yaml_str("questions: 80\n").is_err());
        let err = ExamDefinition::from_yaml_str("title: \"  \"\n").unwrap_err();
        assert!(matches!(err, ExamError::InvalidDefinition(_)));
    }

    #[test]
    fn test_directory_path_is_io_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = ExamDefinition::from_yaml_file(dir.path()).unwrap_err();
        assert!(matches!(err, ExamError::Io(_)));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = ExamDefinition::from_yaml_file(Path::new("/nonexistent/exam.yaml")).unwrap_err();
        assert!(matches!(err, ExamError::NotFound(_)));
    }
}
