//! CLI Adapter.

mod assemble;
mod policies;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use crate::app::api;
use crate::app::config::{AppConfig, CONFIG_FILE};
use crate::domain::{AppError, PromptEngine};
use crate::services::{EmbeddedPolicySource, FilesystemPolicySource};

#[derive(Parser)]
#[command(name = "lpc")]
#[command(version)]
#[command(about = "Assemble tier, mode and attempt-state gated tutoring prompts", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./lpc.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Policy file or directory, overriding the configuration
    #[arg(long, global = true)]
    policies: Option<PathBuf>,
    /// Enable debug logging (RUST_LOG, when set, takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble a prompt from a request JSON file ("-" reads stdin)
    #[clap(visible_alias = "a")]
    Assemble {
        request: PathBuf,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = assemble::OutputFormat::Text)]
        format: assemble::OutputFormat,
        /// Append an audit record to this JSON-lines file
        #[arg(long)]
        audit_log: Option<PathBuf>,
    },
    /// Re-run pre-send validation on a stored assembly result
    #[clap(visible_alias = "v")]
    Validate { result: PathBuf },
    /// Print the gating summary for a request without assembling it
    #[clap(visible_alias = "s")]
    Summary { request: PathBuf },
    /// Inspect configured policies
    #[clap(visible_alias = "p")]
    Policies {
        #[command(subcommand)]
        command: policies::PolicyCommands,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn execute(cli: Cli) -> Result<i32, AppError> {
    let cwd = std::env::current_dir()?;
    let config_path = AppConfig::locate(cli.config.as_deref(), &cwd)?;
    let config = match &config_path {
        Some(path) => AppConfig::from_file(path, &cwd)?,
        None => AppConfig::default(),
    };
    init_logging(cli.verbose, &config.logging.level);
    match &config_path {
        Some(path) => info!(path = %path.display(), "loaded configuration"),
        None => info!("No {} found in {}, using defaults", CONFIG_FILE, cwd.display()),
    }

    let policy_path = cli.policies.or_else(|| config.policies.path.clone());

    match cli.command {
        Commands::Assemble { request, format, audit_log } => {
            let engine = build_engine(policy_path)?;
            let audit_log =
                audit_log.or_else(|| config.audit.enabled.then(|| config.audit.log_path.clone()));
            assemble::run_assemble(engine, &request, format, audit_log).map(|_| 0)
        }
        Commands::Validate { result } => assemble::run_validate(&result),
        Commands::Summary { request } => assemble::run_summary(&request).map(|_| 0),
        Commands::Policies { command } => {
            let engine = build_engine(policy_path)?;
            policies::run_policies(engine.policies(), command)
        }
    }
}

fn build_engine(policy_path: Option<PathBuf>) -> Result<PromptEngine, AppError> {
    match policy_path {
        Some(path) => api::load_engine(&FilesystemPolicySource::new(path)),
        None => api::load_engine(&EmbeddedPolicySource::new()),
    }
}

fn init_logging(verbose: bool, configured_level: &str) {
    let filter = if verbose { "debug" } else { configured_level };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
