// Helpdesk Router - Bilingual help-desk ticket triage
// Main entry point

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::prelude::*;

use helpdesk_router::classifier::ClassifierAdapter;
use helpdesk_router::config::{default_config_path, load_config, Config};
use helpdesk_router::metrics::{ErrorLog, MetricsAggregator};
use helpdesk_router::providers::create_provider;
use helpdesk_router::server::HelpdeskServer;
use helpdesk_router::triage::{ClassifyResponse, TriageService};

#[derive(Parser, Debug)]
#[command(name = "helpdesk-router")]
#[command(about = "Bilingual help-desk ticket triage and routing", version)]
struct Args {
    /// Config file (default: ~/.helpdesk-router/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser, Debug)]
enum Command {
    /// Run the HTTP server
    Serve {
        /// Bind address (overrides [server] bind_address)
        #[arg(long)]
        bind: Option<String>,
    },
    /// Triage a single ticket and print the result as JSON (no metrics)
    Classify {
        /// Ticket text
        text: String,
    },
    /// Validate configuration and provider setup
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    match args.command {
        Command::Serve { bind } => run_serve(config, bind).await,
        Command::Classify { text } => {
            init_tracing(&config, false)?;
            run_classify(&config, &text).await
        }
        Command::CheckConfig => run_check_config(&config, args.config),
    }
}

/// Set up tracing: stderr by default, `log_file` when configured for the server
fn init_tracing(config: &Config, use_log_file: bool) -> Result<()> {
    // Default: INFO (WARN for one-shot commands), RUST_LOG overrides,
    // features.debug_logging forces DEBUG
    let default_level = if config.features.debug_logging {
        "debug"
    } else if use_log_file {
        "info"
    } else {
        "warn"
    };
    let env_filter = if config.features.debug_logging {
        tracing_subscriber::EnvFilter::new(default_level)
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level))
    };

    match config.log_file.as_ref().filter(|_| use_log_file) {
        Some(log_path) => {
            if let Some(parent) = log_path.parent() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create log directory: {}", parent.display())
                })?;
            }
            let log_file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_path)
                .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Mutex::new(log_file))
                .with_ansi(false); // No ANSI colors in log file

            tracing_subscriber::registry()
                .with(env_filter)
                .with(file_layer)
                .init();

            eprintln!("Logs: {}", log_path.display());
        }
        None => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    // Bridge log crate -> tracing (for dependencies using log crate)
    tracing_log::LogTracer::init().ok();
    Ok(())
}

/// Wire provider, classifier, metrics and pipeline from configuration
fn build_triage(config: &Config) -> Result<TriageService> {
    let provider = create_provider(&config.provider)?;
    let classifier = ClassifierAdapter::new(
        Arc::from(provider),
        Duration::from_secs(config.classifier.timeout_secs),
    );

    let mut metrics = MetricsAggregator::new(config.metrics.history_capacity, config.cost.clone());
    if let Some(path) = &config.metrics.error_log_path {
        metrics = metrics.with_error_log(ErrorLog::new(path.clone())?);
    }

    Ok(TriageService::new(classifier, Arc::new(metrics)))
}

async fn run_serve(mut config: Config, bind: Option<String>) -> Result<()> {
    init_tracing(&config, true)?;

    if let Some(bind) = bind {
        config.server.bind_address = bind;
    }

    let triage = build_triage(&config)?;
    tracing::info!(
        provider = config.provider.kind.name(),
        api_key_from_env = config.provider.api_key_from_env,
        model = triage.classifier().model(),
        timeout_secs = config.classifier.timeout_secs,
        history_capacity = config.metrics.history_capacity,
        "Helpdesk router initialized"
    );

    HelpdeskServer::new(triage, config.server.clone()).serve().await
}

async fn run_classify(config: &Config, text: &str) -> Result<()> {
    let triage = build_triage(config)?;
    tracing::debug!(
        provider = config.provider.kind.name(),
        api_key_from_env = config.provider.api_key_from_env,
        "Classifier ready"
    );
    let result = triage.triage(text).await?;

    let json = serde_json::to_string_pretty(&ClassifyResponse::from(&result))
        .context("Failed to serialize result")?;
    println!("{}", json);
    Ok(())
}

fn run_check_config(config: &Config, path: Option<PathBuf>) -> Result<()> {
    let path = match path {
        Some(p) => p,
        None => default_config_path()?,
    };
    let provider = create_provider(&config.provider)?;

    println!("Config file:      {}", path.display());
    println!("Provider:         {}", provider.name());
    println!("Model:            {}", provider.default_model());
    let key_source = if config.provider.api_key_from_env {
        config.provider.kind.api_key_env()
    } else {
        "config file"
    };
    println!("API key:          configured ({})", key_source);
    println!("Bind address:     {}", config.server.bind_address);
    println!("Classifier limit: {}s", config.classifier.timeout_secs);
    println!("History capacity: {}", config.metrics.history_capacity);
    match &config.metrics.error_log_path {
        Some(p) => println!("Error log:        {}", p.display()),
        None => println!("Error log:        (disabled)"),
    }
    println!("✓ Configuration OK");
    Ok(())
}
