//! Reposcope CLI - interactive GitHub repository analyzer
//!
//! Prompts for a repository, fetches its public metadata and serves a menu
//! of canned reports, plus free-form questions through an LLM provider.

use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use reposcope_core::{
    init_logging, ErrorContext, LoggingConfig, ReposcopeConfig, ReposcopeError, ReposcopeResult,
};
use reposcope_github::{ApiClientConfig, GithubClient};

mod shell;

use shell::Shell;

#[derive(Parser)]
#[command(name = "reposcope")]
#[command(about = "An interactive analyzer for GitHub repositories")]
#[command(version = "0.1.0")]
struct Cli {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// GitHub access token (overrides config file and GITHUB_TOKEN)
    #[arg(short, long)]
    token: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ReposcopeResult<()> {
    let cli = Cli::parse();

    // Initialize logging with unified system
    let mut logging_config = LoggingConfig::default();
    if cli.verbose {
        logging_config.level = "debug".to_string();
    }

    init_logging(&logging_config).map_err(|e| ReposcopeError::Config {
        message: format!("Failed to initialize logging: {}", e),
        source: Some(e),
        context: ErrorContext::new("cli")
            .with_operation("init_logging")
            .with_suggestion("Check logging configuration"),
    })?;

    info!("Starting reposcope v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(cli.config.as_ref())?;
    config.validate()?;

    let token = cli
        .token
        .or_else(|| config.github.token.clone())
        .or_else(|| std::env::var("GITHUB_TOKEN").ok());

    let api_config = ApiClientConfig::github(token)
        .with_base_url(config.github.api_base.clone())
        .with_timeout(config.github.timeout_seconds);
    let client = GithubClient::new(api_config)?;

    let mut shell = Shell::new(config, client);

    tokio::select! {
        result = shell.run() => result,
        _ = tokio::signal::ctrl_c() => {
            println!("\n\n👋 Interrupted by user");
            Ok(())
        }
    }
}

fn load_config(config_path: Option<&PathBuf>) -> ReposcopeResult<ReposcopeConfig> {
    if let Some(path) = config_path {
        info!("Loading configuration from {:?}", path);
        return ReposcopeConfig::from_file(path);
    }

    // Try to load from default locations
    let default_paths = [
        dirs::config_dir().map(|d| d.join("reposcope").join("config.toml")),
        dirs::home_dir().map(|d| d.join(".reposcope").join("config.toml")),
        Some(PathBuf::from("reposcope.toml")),
    ];

    for path in default_paths.iter().flatten() {
        if path.exists() {
            info!("Loading configuration from {:?}", path);
            return ReposcopeConfig::from_file(path);
        }
    }

    info!("No configuration file found, using defaults");
    Ok(ReposcopeConfig::default())
}
