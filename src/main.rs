use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use school_docs_processor::app::ports::ObjectStorePort;
use school_docs_processor::app::process_use_case::ProcessDocumentsUseCase;
use school_docs_processor::config::Config;
use school_docs_processor::envelope::UploadNotification;
use school_docs_processor::fallback::{with_fallback, FallbackConfig};
use school_docs_processor::infra::{FileIngestionTrigger, FsObjectStore, SidecarOcrExtractor};
use school_docs_processor::{clean_document_text, logging, CleaningStrategy};

#[derive(Parser)]
#[command(name = "school-docs-processor")]
#[command(about = "Cleans uploaded school documents for the Q&A knowledge base")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean one local file and print the result
    Clean {
        /// File to read as UTF-8 text
        #[arg(long)]
        file: PathBuf,
        /// Filename used to pick the cleaning strategy (defaults to the file's name)
        #[arg(long)]
        name: Option<String>,
    },
    /// Process an upload notification against the local object store
    Process {
        /// JSON file holding the upload notification
        #[arg(long)]
        event: PathBuf,
        /// TOML config file; environment variables apply when omitted
        #[arg(long)]
        config: Option<PathBuf>,
        /// Trigger the knowledge base sync without waiting
        #[arg(long)]
        no_delay: bool,
    },
    /// Append a fallback link to an answer when it sounds unsure
    Fallback {
        /// JSON file with uncertainty keywords and topic links
        #[arg(long)]
        config: PathBuf,
        #[arg(long)]
        question: String,
        #[arg(long)]
        answer: String,
    },
}

fn run_clean(file: &Path, name: Option<String>) -> Result<()> {
    let raw_text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let filename = name.unwrap_or_else(|| {
        file.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    });

    info!(strategy = %CleaningStrategy::for_filename(&filename), "Cleaning {}", filename);
    println!("{}", clean_document_text(&raw_text, &filename));
    Ok(())
}

async fn run_process(event: &Path, config: Option<PathBuf>, no_delay: bool) -> Result<()> {
    let mut config = match config {
        Some(path) => Config::load(&path)?,
        None => Config::from_env()?,
    };
    if no_delay {
        config.sync_delay_seconds = 0;
    }

    let content = tokio::fs::read_to_string(event)
        .await
        .with_context(|| format!("Failed to read event file {}", event.display()))?;
    let notification: UploadNotification =
        serde_json::from_str(&content).context("Event file is not an upload notification")?;
    info!("Received {} record(s)", notification.records.len());

    let store: Arc<dyn ObjectStorePort> = Arc::new(FsObjectStore::new(&config.store_root));
    let extractor = Arc::new(SidecarOcrExtractor::new(store.clone()));
    let trigger = Arc::new(FileIngestionTrigger::new(&config.jobs_log));

    let use_case = ProcessDocumentsUseCase::new(store, extractor, trigger, config);
    let response = use_case.handle(&notification).await?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn run_fallback(config: &Path, question: &str, answer: &str) -> Result<()> {
    let fallback = FallbackConfig::load(config)?;
    let output = match fallback.fallback_link(question, answer) {
        Some(link) => with_fallback(answer, link),
        None => answer.to_string(),
    };
    println!("{}", output);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Clean { file, name } => run_clean(&file, name)?,
        Commands::Process {
            event,
            config,
            no_delay,
        } => run_process(&event, config, no_delay).await?,
        Commands::Fallback {
            config,
            question,
            answer,
        } => run_fallback(&config, &question, &answer)?,
    }
    Ok(())
}
