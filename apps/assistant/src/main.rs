mod analysis;
mod config;
mod errors;
mod extraction;
mod llm_client;
mod models;
mod reports;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::orchestrator::Orchestrator;
use crate::analysis::writer::write_analysis;
use crate::config::{BackendKind, Config};
use crate::errors::PipelineError;
use crate::extraction::ExtractionRecord;
use crate::llm_client::OllamaGateway;
use crate::models::report::ReportOutcome;

#[derive(Parser)]
#[command(name = "assistant")]
#[command(about = "Turns PDF medical reports into patient-friendly analyses")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract text from PDF reports into a combined markdown file
    Extract {
        /// PDF files to extract, in report order
        #[arg(required = true)]
        pdfs: Vec<PathBuf>,

        /// Combined markdown output path
        #[arg(short, long, default_value = "combined_reports.md")]
        output: PathBuf,
    },

    /// Run the analysis pipeline over a combined reports file
    Process {
        /// Combined reports markdown produced by `extract`
        #[arg(short, long, default_value = "combined_reports.md")]
        input: PathBuf,

        /// Analysis document output path
        #[arg(short, long, default_value = "comprehensive_analysis.md")]
        output: PathBuf,

        /// Patient age override; otherwise parsed from each report
        #[arg(long)]
        age: Option<u32>,

        /// Model backend override (defaults to MODEL_BACKEND, then local)
        #[arg(long, value_enum)]
        backend: Option<BackendKind>,
    },

    /// List the models available on the local backend
    Models,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (fails on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting medical report assistant v{}",
        env!("CARGO_PKG_VERSION")
    );

    match cli.command {
        Commands::Extract { pdfs, output } => run_extract(&pdfs, &output),
        Commands::Process {
            input,
            output,
            age,
            backend,
        } => run_process(&config, &input, &output, age, backend).await,
        Commands::Models => run_models(&config).await,
    }
}

fn run_extract(pdfs: &[PathBuf], output: &Path) -> Result<()> {
    let mut records = Vec::with_capacity(pdfs.len());

    for path in pdfs {
        let title = extraction::title_for(path);
        match extraction::extract_text(path) {
            Ok(text) => records.push(ExtractionRecord {
                title,
                text: Some(text),
            }),
            Err(e) => {
                warn!("{e}");
                records.push(ExtractionRecord { title, text: None });
            }
        }
    }

    fs::write(
        output,
        extraction::build_combined_document(&records, Local::now()),
    )?;

    let extracted = records.iter().filter(|r| r.text.is_some()).count();
    info!(
        "extracted {}/{} reports into {}",
        extracted,
        records.len(),
        output.display()
    );
    Ok(())
}

async fn run_process(
    config: &Config,
    input: &Path,
    output: &Path,
    age: Option<u32>,
    backend_override: Option<BackendKind>,
) -> Result<()> {
    let markdown = fs::read_to_string(input)?;
    let reports = reports::split(&markdown);
    if reports.is_empty() {
        return Err(PipelineError::MalformedInput(input.display().to_string()).into());
    }
    info!("found {} reports in {}", reports.len(), input.display());

    let backend = backend_override.unwrap_or(config.backend);
    let gateway = llm_client::build_gateway(config, backend)?;
    info!("model gateway initialized: {}", gateway.describe());

    let orchestrator = Orchestrator::new(gateway.clone(), config)?;
    let outcomes = orchestrator.run_batch(&reports, age).await;

    write_analysis(output, &outcomes, &gateway.describe())?;

    let analyzed = outcomes
        .iter()
        .filter(|o| matches!(o, ReportOutcome::Analyzed(_)))
        .count();
    info!(
        "analyzed {}/{} reports, results saved to {}",
        analyzed,
        outcomes.len(),
        output.display()
    );
    Ok(())
}

async fn run_models(config: &Config) -> Result<()> {
    let gateway = OllamaGateway::new(config.ollama_base_url.clone(), config.ollama_model.clone());

    let models = gateway.list_models().await?;
    if models.is_empty() {
        println!("No models available on {}", config.ollama_base_url);
    } else {
        println!("Available models on {}:", config.ollama_base_url);
        for model in models {
            println!("  {model}");
        }
    }
    Ok(())
}
