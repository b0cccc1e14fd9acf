//! CLI command definitions and subcommands

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::catalog::CostOwnership;
use crate::render::ExportFormat;

/// SOW Architect - Statement of Work drafting and export
#[derive(Parser, Debug)]
#[command(
    name = "sa",
    author,
    version,
    about = "Draft a Statement of Work with structured generation and export it as .doc / .pdf"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List solution types, industries, engagement types and cost ownership options
    Catalog,

    /// Run the six generation phases and write a session file
    Draft(DraftArgs),

    /// Write the editable field set (defaults applied) into a session file
    Form {
        /// Session file produced by `sa draft`
        session: PathBuf,

        /// Cost ownership to record
        #[arg(long, value_enum)]
        ownership: Option<CostOwnership>,
    },

    /// Render a session file into documents
    Export {
        /// Session file produced by `sa draft`
        session: PathBuf,

        #[command(flatten)]
        options: ExportArgs,
    },

    /// Draft and export in one step
    Generate {
        #[command(flatten)]
        draft: DraftArgs,

        #[command(flatten)]
        export: ExportArgs,
    },
}

/// What to draft
#[derive(Args, Debug, Clone)]
pub struct DraftArgs {
    /// Solution type from the catalog, or "Other"
    #[arg(long, value_name = "TYPE")]
    pub solution_type: String,

    /// Solution type text when --solution-type is "Other"
    #[arg(long, value_name = "TEXT")]
    pub other: Option<String>,

    /// Industry from the catalog, or "Other"
    #[arg(long)]
    pub industry: String,

    /// Industry text when --industry is "Other"
    #[arg(long, value_name = "TEXT")]
    pub other_industry: Option<String>,

    /// Customer name
    #[arg(long)]
    pub customer: String,

    /// Engagement type
    #[arg(long, default_value = "Proof of Concept (PoC)")]
    pub engagement: String,

    /// API key; falls back to the configured environment variables
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Session file to write (default: <Customer>_SOW.yml)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// How to export
#[derive(Args, Debug, Clone, Default)]
pub struct ExportArgs {
    /// Formats to produce (default: from config)
    #[arg(long, value_enum)]
    pub format: Option<FormatChoice>,

    /// Directory for the documents (default: from config)
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Cost ownership, overriding the session and config
    #[arg(long, value_enum)]
    pub ownership: Option<CostOwnership>,

    /// Document date as YYYY-MM-DD (default: today)
    #[arg(long, value_name = "DATE")]
    pub date: Option<NaiveDate>,
}

/// `--format` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatChoice {
    Doc,
    Pdf,
    All,
}

impl FormatChoice {
    pub fn formats(&self) -> Vec<ExportFormat> {
        match self {
            FormatChoice::Doc => vec![ExportFormat::Doc],
            FormatChoice::Pdf => vec![ExportFormat::Pdf],
            FormatChoice::All => vec![ExportFormat::Doc, ExportFormat::Pdf],
        }
    }
}

/// Get the log file path
pub fn get_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sowarchitect")
        .join("logs")
        .join("sowarchitect.log")
}

/// Help footer naming the log file
pub fn generate_after_help() -> String {
    format!("Logs are written to: {}", get_log_path().display())
}
