//! WrapFast CLI - talk to the WrapFast AI backend from the terminal
//!
//! Builds one shared API client per invocation and runs a single command
//! against the backend: authentication, meal analysis, chat or image generation.

use clap::{Parser, Subcommand, ValueEnum};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::ExitCode;
use wrapfast_api_client::api::GptLanguage;
use wrapfast_telemetry::TelemetryConfig;

mod commands;
mod output;

use commands::{auth, chat, image, vision, Context};

/// Command-line client for the WrapFast AI backend
#[derive(Parser)]
#[command(name = "wrapfast")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Backend base URL (overrides the environment configuration)
    #[arg(long, global = true, env = "WRAPFAST_API_URL")]
    base_url: Option<String>,

    /// Backend token to sign requests with (skips authentication)
    #[arg(long, global = true, env = "WRAPFAST_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Pretty-printed JSON
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a signing token from the backend
    Auth,

    /// Estimate the nutrition of a meal photo
    Vision {
        /// Path to the meal photo
        image: PathBuf,

        /// Language the meal name is returned in
        #[arg(short, long, default_value = "english")]
        language: GptLanguage,

        /// Analyse through the Anthropic endpoint
        #[arg(long)]
        anthropic: bool,
    },

    /// Send a chat prompt
    Chat {
        /// Prompt text
        prompt: String,

        /// Send through the Anthropic endpoint
        #[arg(long)]
        anthropic: bool,
    },

    /// Generate an image from a prompt
    Image {
        /// Description of the image
        prompt: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let telemetry = if cli.verbose {
        TelemetryConfig::verbose()
    } else {
        TelemetryConfig::default()
    };
    if let Err(e) = wrapfast_telemetry::init_with_config(telemetry) {
        eprintln!("{} {}", "Warning:".yellow().bold(), e);
    }

    let result = match Context::new(cli.base_url.as_deref(), cli.token, cli.format) {
        Ok(ctx) => match cli.command {
            Commands::Auth => auth::run(&ctx).await,
            Commands::Vision {
                image,
                language,
                anthropic,
            } => vision::run(&ctx, &image, language, anthropic).await,
            Commands::Chat { prompt, anthropic } => chat::run(&ctx, &prompt, anthropic).await,
            Commands::Image { prompt } => image::run(&ctx, &prompt).await,
        },
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
