//! payslip - command-line entry point for the Payslip Engine.

use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use payslip_engine::api::{AppState, PayslipRequest, create_router};
use payslip_engine::config::ConfigLoader;
use payslip_engine::export::PdfExporter;
use payslip_engine::form::PayslipForm;

#[derive(Parser)]
#[command(name = "payslip")]
#[command(author, version, about = "Monthly payslip calculation and export", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the payslip HTTP API
    Serve {
        /// Configuration directory
        #[arg(short, long, default_value = "config/payroll")]
        config: PathBuf,

        /// Address to listen on
        #[arg(short, long, default_value = "127.0.0.1:3000")]
        addr: SocketAddr,
    },

    /// Render a payslip PDF from a JSON form
    Render {
        /// JSON file holding the form fields
        #[arg(short, long)]
        input: PathBuf,

        /// Configuration directory
        #[arg(short, long, default_value = "config/payroll")]
        config: PathBuf,

        /// Output file (defaults to the configured file name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config, addr } => serve(config, addr).await,
        Commands::Render {
            input,
            config,
            output,
        } => render(input, config, output).await,
    }
}

async fn serve(config_dir: PathBuf, addr: SocketAddr) -> Result<()> {
    let loader = ConfigLoader::load(&config_dir)
        .with_context(|| format!("Failed to load config from {}", config_dir.display()))?;
    let exporter = PdfExporter::from_config(&loader.config().document)
        .context("Failed to load document fonts")?;

    let router = create_router(AppState::new(loader, Arc::new(exporter)));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(addr = %addr, "Payslip API listening");

    axum::serve(listener, router).await.context("Server error")?;
    Ok(())
}

async fn render(input: PathBuf, config_dir: PathBuf, output: Option<PathBuf>) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    let loader = ConfigLoader::load(&config_dir)
        .with_context(|| format!("Failed to load config from {}", config_dir.display()))?;
    let config = loader.config().clone();
    let exporter = PdfExporter::from_config(&config.document)
        .context("Failed to load document fonts")?;

    let content = fs::read_to_string(&input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let request: PayslipRequest = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", input.display()))?;

    let compensation = request.into_input(config.structure.default_days_payable);
    let mut form = PayslipForm::new(config);
    form.replace(compensation);
    form.confirm().context("Payslip could not be calculated")?;

    let exported = form
        .export(Arc::new(exporter))
        .await
        .context("Payslip could not be exported")?;

    let output = output.unwrap_or_else(|| PathBuf::from(&exported.file_name));
    fs::write(&output, &exported.bytes)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!(
        output = %output.display(),
        bytes = exported.bytes.len(),
        "Payslip written"
    );
    Ok(())
}
