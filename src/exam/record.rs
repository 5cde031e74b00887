//! Exam record as stored in the database collection.

use serde::{Deserialize, Serialize};

/// One practice exam entry in the database.
///
/// Field order is the on-disk order: `id`, `title`, `duration`,
/// `totalQuestions`, `sections`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamRecord {
    pub id: u64,
    pub title: String,
    /// Duration in minutes.
    pub duration: u32,
    pub total_questions: u32,
    #[serde(default)]
    pub sections: Vec<serde_json::Value>,
}
