//! sitectl - content endpoint and tooling for a Sanity-backed marketing site
//!
//! - `serve`: run the `/api/sanity` endpoint
//! - `fetch`: query a running endpoint and print the JSON
//! - `menus`: resolve the main and footer menus the way the site does
//! - `image-url`: turn an asset reference into a CDN URL
//! - `config`: show, locate or validate the configuration

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sitectl_core::SiteConfig;

mod commands;
mod config;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "sitectl",
    author,
    version,
    about = "Content endpoint and data tooling for a Sanity-backed site",
    long_about = "Serve typed GROQ queries over HTTP, inspect what the site receives, \
                  and resolve menus and image URLs from the command line."
)]
struct Cli {
    /// Debug logging (RUST_LOG still wins)
    #[arg(long, global = true)]
    debug: bool,

    /// Export traces over OTLP (needs the `telemetry` feature)
    #[arg(long, global = true)]
    otel: bool,

    /// Config file (default: ~/.sitectl/config.toml when present)
    #[arg(long, short = 'c', global = true, env = "SITECTL_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the content endpoint (GET /api/sanity, /health, /api/config)
    Serve(commands::serve::ServeArgs),
    /// Query a running endpoint and print the JSON response
    Fetch(commands::fetch::FetchArgs),
    /// Resolve main and footer menus through a running endpoint
    Menus(commands::menus::MenusArgs),
    /// Build the CDN URL for an image asset reference
    ImageUrl(commands::image_url::ImageUrlArgs),
    /// Inspect sitectl configuration (show, path, validate)
    Config(config::ConfigArgs),
}

/// `~/.sitectl/.env`, then `.env` in the working directory. Existing
/// variables are never overwritten.
fn load_env_files() {
    if let Some(home) = dirs::home_dir() {
        let _ = dotenvy::from_path(home.join(".sitectl/.env"));
    }
    let _ = dotenvy::dotenv();
}

fn load_config(path: Option<&Path>) -> Result<SiteConfig> {
    SiteConfig::load(path).context("Failed to load configuration")
}

#[tokio::main]
async fn main() -> Result<()> {
    load_env_files();
    let cli = Cli::parse();

    let tracing_config = tracing_setup::TracingConfig {
        debug: cli.debug,
        otel: cli.otel,
    };
    tracing_setup::init(&tracing_config).ok();
    if tracing_config.otel && !cfg!(feature = "telemetry") {
        tracing::warn!("--otel ignored: built without the telemetry feature");
    }

    let result = match cli.command {
        Commands::Serve(args) => {
            let config = load_config(cli.config.as_deref())?;
            commands::run_serve(args, config).await
        }
        Commands::Fetch(args) => commands::run_fetch(args).await,
        Commands::Menus(args) => commands::run_menus(args).await,
        Commands::ImageUrl(args) => {
            let config = load_config(cli.config.as_deref())?;
            commands::run_image_url(args, &config)
        }
        Commands::Config(args) => config::run_config(args, cli.config.as_deref()),
    };

    tracing_setup::shutdown_otel();
    result
}
