//! CLI command definitions for yds-tools.
//!
//! Two independent commands: `init-exam` seeds the exam database with a single
//! record, `extract` dumps the text of a DOCX file.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use crate::exam::{
    initialize_exam, ExamDefinition, InitOptions, InitReport, DEFAULT_DB_PATH,
    DEFAULT_EXAM_COLLECTION,
};
use crate::extract::{
    extract_document, ExtractOptions, ExtractReport, DEFAULT_OUTPUT_PATH, DEFAULT_PREVIEW_LINES,
    DEFAULT_PREVIEW_WIDTH,
};

/// YDS practice-exam tooling.
#[derive(Parser)]
#[command(name = "yds-tools")]
#[command(about = "Seed the YDS exam database and extract exam text from DOCX files")]
#[command(version)]
#[command(
    long_about = "yds-tools bundles two small utilities.\n\n`init-exam` rewrites the exam collection of a JSON database so it holds exactly one exam record.\n`extract` writes the paragraph and table text of a DOCX document to a text file.\n\nExample usage:\n  yds-tools init-exam --db db.json\n  yds-tools extract Stratejiler5_ornek_sayfalar.docx -o exam_content.txt"
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info", global = true)]
    pub log_level: String,
}

/// Available CLI subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Replace the exam collection with a single freshly built exam record.
    ///
    /// Previous entries in the collection are discarded. Other top-level keys
    /// of the database are left untouched.
    #[command(name = "init-exam", alias = "init")]
    InitExam(InitExamArgs),

    /// Extract paragraph and table text from a DOCX document.
    #[command(alias = "ex")]
    Extract(ExtractArgs),
}

/// Arguments for `yds-tools init-exam`.
#[derive(Parser, Debug)]
pub struct InitExamArgs {
    /// JSON database file to rewrite in place.
    #[arg(long, env = "YDS_DB_PATH", default_value = DEFAULT_DB_PATH)]
    pub db: PathBuf,

    /// Top-level key of the exam collection.
    #[arg(long, env = "YDS_EXAM_COLLECTION", default_value = DEFAULT_EXAM_COLLECTION)]
    pub collection: String,

    /// YAML exam definition. Defaults to the built-in YDS Deneme-1.
    #[arg(long)]
    pub exam_file: Option<PathBuf>,

    /// Output JSON summary.
    #[arg(short = 'j', long)]
    pub json: bool,
}

/// Arguments for `yds-tools extract`.
#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// DOCX document to read.
    pub source: PathBuf,

    /// Text file to write (overwritten if it exists).
    #[arg(short = 'o', long, env = "YDS_EXTRACT_OUTPUT", default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Number of extracted lines to echo.
    #[arg(long, default_value_t = DEFAULT_PREVIEW_LINES)]
    pub preview: usize,

    /// Maximum characters per echoed line.
    #[arg(long, default_value_t = DEFAULT_PREVIEW_WIDTH)]
    pub preview_width: usize,

    /// Output JSON summary.
    #[arg(short = 'j', long)]
    pub json: bool,
}

/// Parse CLI arguments without running any command.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Run the CLI with the parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::InitExam(args) => run_init_exam_command(args),
        Commands::Extract(args) => run_extract_command(args),
    }
}

// ============================================================================
// init-exam
// ============================================================================

fn run_init_exam_command(args: InitExamArgs) -> anyhow::Result<()> {
    let definition = match &args.exam_file {
        Some(path) => {
            info!(path = %path.display(), "Loading exam definition");
            ExamDefinition::from_yaml_file(path)
                .with_context(|| format!("Failed to load exam definition {}", path.display()))?
        }
        None => ExamDefinition::deneme1(),
    };

    if !args.json {
        println!("Creating {}...", definition.title);
    }

    let options = InitOptions {
        db_path: args.db,
        collection: args.collection,
        definition,
    };
    let report = initialize_exam(&options)
        .with_context(|| format!("Failed to initialize exam in {}", options.db_path.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_init_report(&report);
    }
    Ok(())
}

fn print_init_report(report: &InitReport) {
    println!("Total questions: {}", report.total_questions);
    println!("Answer key loaded: {} answers", report.answer_key_entries);
    println!("✅ {} created successfully!", report.record.title);
}

// ============================================================================
// extract
// ============================================================================

fn run_extract_command(args: ExtractArgs) -> anyhow::Result<()> {
    let options = ExtractOptions {
        source: args.source,
        output: args.output,
        preview_lines: args.preview,
        preview_width: args.preview_width,
    };
    let report = extract_document(&options)
        .with_context(|| format!("Failed to extract text from {}", options.source.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_extract_report(&report);
    }
    Ok(())
}

fn print_extract_report(report: &ExtractReport) {
    println!("Extracted {} lines from DOCX", report.line_count);
    println!("First {} lines:", report.preview.len());
    for (i, line) in report.preview.iter().enumerate() {
        println!("{}. {}", i + 1, line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_init_exam_defaults() {
        let cli = Cli::try_parse_from(["yds-tools", "init-exam"]).unwrap();
        match cli.command {
            Commands::InitExam(args) => {
                assert_eq!(args.collection, "exams");
                assert!(args.exam_file.is_none());
                assert!(!args.json);
            }
            _ => panic!("expected init-exam"),
        }
        assert_eq!(cli.log_level, "info");
    }

    #[test]
    fn test_extract_args() {
        let cli = Cli::try_parse_from([
            "yds-tools",
            "extract",
            "sample.docx",
            "-o",
            "out.txt",
            "--preview",
            "3",
            "-l",
            "debug",
        ])
        .unwrap();
        match cli.command {
            Commands::Extract(args) => {
                assert_eq!(args.source, PathBuf::from("sample.docx"));
                assert_eq!(args.output, PathBuf::from("out.txt"));
                assert_eq!(args.preview, 3);
                assert_eq!(args.preview_width, 100);
            }
            _ => panic!("expected extract"),
        }
        assert_eq!(cli.log_level, "debug");
    }

    #[test]
    fn test_extract_requires_source() {
        assert!(Cli::try_parse_from(["yds-tools", "extract"]).is_err());
    }
}
