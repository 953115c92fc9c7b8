//! Patchwing CLI - Command line interface for Patchwing
//!
//! Sends a code patch to a hosted chat-completion backend and prints the
//! model's review.

mod commands;

use clap::{Parser, Subcommand};
use patchwing_core::ReviewConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::ReviewArgs;

/// Patchwing: LLM-backed code review for patches
#[derive(Parser, Debug)]
#[command(name = "patchwing")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Model / deployment identifier (overrides config and env)
    #[arg(long, global = true, env = "PATCHWING_MODEL")]
    model: Option<String>,

    /// Language the review should be written in (overrides config and env)
    #[arg(long, global = true, env = "PATCHWING_LANGUAGE")]
    language: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Review a patch read from a file or stdin
    #[command(visible_alias = "r")]
    Review(ReviewArgs),

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    // Load configuration with overrides
    let config =
        ReviewConfig::load_with_overrides(cli.model.clone(), cli.language.clone(), None)?;

    if cli.verbose {
        tracing::info!(
            model = %config.model,
            language = ?config.language,
            "Configuration loaded"
        );
    }

    match cli.command {
        Some(Commands::Version) => {
            println!("patchwing {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Review(args)) => {
            args.execute(cli.verbose, &config).await?;
        }
        Some(Commands::Config) => {
            println!("Patchwing Configuration");
            println!("=======================");
            println!();
            println!("Providers:");
            println!("  openai_api_key: {}", presence(&config.openai_api_key));
            println!("  openai_api_base: {}", config.openai_api_base);
            println!("  azure_api_key: {}", presence(&config.azure_api_key));
            println!(
                "  azure_endpoint: {}",
                config.azure_endpoint.as_deref().unwrap_or("(not set)")
            );
            println!();
            println!("Generation:");
            println!("  model: {}", config.model);
            println!("  temperature: {}", config.temperature);
            println!("  top_p: {}", config.top_p);
            println!(
                "  max_tokens: {}",
                config
                    .max_tokens
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "(provider default)".to_string())
            );
            println!();
            println!("Review:");
            println!(
                "  language: {}",
                config.language.as_deref().unwrap_or("(not set)")
            );
            println!(
                "  prompt: {}",
                config.prompt.as_deref().unwrap_or("(built-in)")
            );
            println!();
            if let Some(path) = ReviewConfig::default_config_path() {
                println!("Config file: {}", path.display());
                if path.exists() {
                    println!("  (exists)");
                } else {
                    println!("  (not found - using defaults)");
                }
            }
        }
        None => {
            println!("Patchwing - LLM-backed code review for patches");
            println!();
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

/// Render an optional credential without echoing its value
fn presence(value: &Option<String>) -> &'static str {
    if value.is_some() {
        "(set)"
    } else {
        "(not set)"
    }
}
