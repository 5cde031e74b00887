//! Command-line interface for yds-tools.
//!
//! Provides the `init-exam` and `extract` commands.

mod commands;

pub use commands::{parse_cli, run_with_cli, Cli, Commands, ExtractArgs, InitExamArgs};
