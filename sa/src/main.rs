//! SOW Architect
//!
//! CLI entry point: draft a Statement of Work, edit it as YAML, export it.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{CommandFactory, FromArgMatches};
use colored::*;
use eyre::{Context, Result, eyre};
use tracing::info;

use sowarchitect::catalog::{self, CostOwnership};
use sowarchitect::cli::{Cli, Command, DraftArgs, ExportArgs, generate_after_help, get_log_path};
use sowarchitect::config::Config;
use sowarchitect::draft::{DraftStore, SolutionContext};
use sowarchitect::llm::{create_generator, resolve_credential};
use sowarchitect::orchestrator::{DraftOrchestrator, ProgressEvent, ProgressReporter};
use sowarchitect::prompts::PromptLoader;
use sowarchitect::render::{DocumentAssembler, ExportOptions, RenderError};
use sowarchitect::session::SessionFile;

fn setup_logging(level: &str) -> Result<()> {
    let log_path = get_log_path();
    if let Some(log_dir) = log_path.parent() {
        fs::create_dir_all(log_dir).context("Failed to create log directory")?;
    }

    // Write to log file, not stdout/stderr
    let level: tracing::Level = level.parse().unwrap_or(tracing::Level::INFO);
    let log_file = fs::File::create(&log_path).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cmd = Cli::command().after_help(generate_after_help());
    let cli = Cli::from_arg_matches(&cmd.get_matches())?;

    // CLI flag > config file > INFO
    let level = cli
        .log_level
        .clone()
        .or_else(|| Config::load_log_level(cli.config.as_ref()))
        .unwrap_or_else(|| "INFO".to_string());
    setup_logging(&level).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    info!("sowarchitect loaded config: model={}", config.llm.model);

    match cli.command {
        Command::Catalog => cmd_catalog(),
        Command::Draft(args) => cmd_draft(&config, &args).await.map(|_| ()),
        Command::Form { session, ownership } => cmd_form(&config, &session, ownership),
        Command::Export { session, options } => cmd_export(&config, &session, &options),
        Command::Generate { draft, export } => {
            let session = cmd_draft(&config, &draft).await?;
            cmd_export(&config, &session, &export)
        }
    }
}

/// Prints phase progress as it happens
struct CliReporter;

impl ProgressReporter for CliReporter {
    fn report(&mut self, event: ProgressEvent) {
        match event {
            ProgressEvent::PhaseStarted { message, .. } => println!("  {}", message.dimmed()),
            ProgressEvent::PhaseFinished {
                phase,
                produced: true,
                percent,
            } => println!("{} {} {}", format!("[{:>3}%]", percent).cyan(), "✓".green(), phase),
            ProgressEvent::PhaseFinished { phase, percent, .. } => println!(
                "{} {} {} produced nothing, defaults will be used",
                format!("[{:>3}%]", percent).cyan(),
                "!".yellow(),
                phase
            ),
            ProgressEvent::Completed { produced, skipped } => {
                println!("{} Generation complete: {} produced, {} skipped", "✓".green(), produced, skipped)
            }
        }
    }
}

/// List the catalog
fn cmd_catalog() -> Result<()> {
    let sections: [(&str, Vec<&str>); 4] = [
        ("Solution types", catalog::SOLUTION_TYPES.to_vec()),
        ("Industries", catalog::INDUSTRIES.to_vec()),
        ("Engagement types", catalog::ENGAGEMENT_TYPES.to_vec()),
        ("Cost ownership", CostOwnership::ALL.iter().map(|o| o.label()).collect()),
    ];
    for (title, entries) in sections {
        println!("{}", title.bold());
        for entry in entries {
            println!("  {}", entry);
        }
        println!();
    }
    Ok(())
}

/// Run all phases and write the session file; returns its path
async fn cmd_draft(config: &Config, args: &DraftArgs) -> Result<PathBuf> {
    let context = SolutionContext::from_selection(
        &args.solution_type,
        args.other.as_deref(),
        &args.industry,
        args.other_industry.as_deref(),
        &args.customer,
        &args.engagement,
    )?;

    let credential = resolve_credential(args.api_key.as_deref(), &config.llm.api_key_envs).ok_or_else(|| {
        eyre!(
            "Please provide an API key (--api-key or {})",
            config.llm.api_key_envs.join(" / ")
        )
    })?;

    let generator = create_generator(&config.llm).context("Failed to create generation client")?;
    let prompts = PromptLoader::new(".", config.prompts.dir.as_deref());
    let orchestrator = DraftOrchestrator::new(generator, prompts);
    let path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("{}.yml", context.file_stem())));

    println!(
        "{} Drafting {} for {}",
        "→".cyan(),
        context.solution_type.bold(),
        context.customer.bold()
    );

    let mut store = DraftStore::new();
    let result = orchestrator
        .run(&context, &credential, &mut store, &mut CliReporter)
        .await;

    // Whatever was committed is saved, even if the run stopped early
    SessionFile::from_store(context, &store).save(&path)?;

    match result {
        Ok(_) => {
            println!("{} Session written to {}", "✓".green(), path.display().to_string().cyan());
            Ok(path)
        }
        Err(e) => {
            eprintln!("{} Error during generation: {}", "✗".red(), e);
            eprintln!("{} Generation paused. Partial draft saved to {}", "!".yellow(), path.display());
            Err(eyre!("Generation stopped early"))
        }
    }
}

/// Materialize the editable field set into the session file
fn cmd_form(config: &Config, path: &Path, ownership: Option<CostOwnership>) -> Result<()> {
    let mut session = SessionFile::load(path)?;
    if session.materialize_fields(ownership.unwrap_or(config.export.ownership)) {
        session.save(path)?;
        println!(
            "{} Fields written to {}; edit them, then run `sa export`",
            "✓".green(),
            path.display().to_string().cyan()
        );
    } else {
        println!("{} {} already has fields; leaving them as they are", "!".yellow(), path.display());
    }
    Ok(())
}

/// Render the session into the requested formats
fn cmd_export(config: &Config, path: &Path, args: &ExportArgs) -> Result<()> {
    let session = SessionFile::load(path)?;
    let mut fields = session.resolve_fields(args.ownership.unwrap_or(config.export.ownership));
    if let Some(ownership) = args.ownership {
        fields.ownership = ownership;
    }

    let formats = args
        .format
        .map(|f| f.formats())
        .unwrap_or_else(|| config.export.formats.clone());
    let out_dir = args.out_dir.clone().unwrap_or_else(|| config.export.output_dir.clone());
    fs::create_dir_all(&out_dir).context(format!("Failed to create {}", out_dir.display()))?;
    let options = args.date.map(ExportOptions::new).unwrap_or_else(ExportOptions::today);

    let assembler = DocumentAssembler::new()?;
    let report = assembler.export(&formats, &fields, &options);

    for artifact in &report.artifacts {
        let written = artifact
            .write_to(&out_dir)
            .context(format!("Failed to write {}", artifact.file_name))?;
        println!(
            "{} Wrote {} ({})",
            "✓".green(),
            written.display().to_string().cyan(),
            artifact.mime_type
        );
    }
    for failure in &report.failures {
        match failure.error {
            RenderError::Unavailable => println!("{} PDF export unavailable in this build", "!".yellow()),
            _ => eprintln!("{} Could not create {}: {}", "✗".red(), failure.format, failure.error),
        }
    }

    if report.artifacts.is_empty() && !report.failures.is_empty() {
        return Err(eyre!("No documents were produced"));
    }
    Ok(())
}
