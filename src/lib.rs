//! yds-tools: utilities for preparing YDS practice exams.
//!
//! - [`exam`] seeds a JSON database with a single exam record.
//! - [`extract`] pulls paragraph and table text out of DOCX files.

pub mod cli;
pub mod error;
pub mod exam;
pub mod extract;

pub use error::{ExamError, ExtractError};
