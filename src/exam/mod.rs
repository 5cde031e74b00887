//! Exam-record initializer.
//!
//! Loads the JSON database, replaces the exam collection with a single
//! freshly built record, and writes the document back. The answer key is
//! validated and counted but never persisted.

pub mod answer_key;
pub mod database;
pub mod definition;
pub mod record;

use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info};

pub use answer_key::{AnswerKey, Choice};
pub use database::{ExamDatabase, DEFAULT_EXAM_COLLECTION};
pub use definition::{AnswerKeySpec, ExamDefinition};
pub use record::ExamRecord;

use crate::error::ExamError;

/// Default database path, relative to the working directory.
pub const DEFAULT_DB_PATH: &str = "db.json";

/// Inputs for one initializer run.
#[derive(Debug, Clone)]
pub struct InitOptions {
    pub db_path: PathBuf,
    pub collection: String,
    pub definition: ExamDefinition,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            collection: DEFAULT_EXAM_COLLECTION.to_string(),
            definition: ExamDefinition::deneme1(),
        }
    }
}

/// What an initializer run did, for the operator.
#[derive(Debug, Clone, Serialize)]
pub struct InitReport {
    pub db_path: PathBuf,
    pub collection: String,
    pub record: ExamRecord,
    pub total_questions: u32,
    pub answer_key_entries: usize,
    pub discarded_records: usize,
}

/// Runs the initializer end to end.
pub fn initialize_exam(options: &InitOptions) -> Result<InitReport, ExamError> {
    let definition = &options.definition;
    definition.validate()?;

    let mut db = ExamDatabase::load(&options.db_path)?;
    let record = definition.build_record();

    info!(
        title = %record.title,
        collection = %options.collection,
        "Creating exam record"
    );
    let distribution = definition.answer_key.distribution();
    debug!(
        a = distribution[0],
        b = distribution[1],
        c = distribution[2],
        d = distribution[3],
        e = distribution[4],
        "Answer key distribution"
    );

    let discarded_records = db.replace_collection(&options.collection, &record)?;
    db.save()?;

    info!(
        path = %options.db_path.display(),
        discarded = discarded_records,
        "Exam collection rewritten"
    );

    Ok(InitReport {
        db_path: options.db_path.clone(),
        collection: options.collection.clone(),
        total_questions: record.total_questions,
        answer_key_entries: definition.answer_key.len(),
        discarded_records,
        record,
    })
}
