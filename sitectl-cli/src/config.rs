//! `sitectl config`: inspect the effective configuration

use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sitectl_core::SiteConfig;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML (file, then environment)
    Show,
    /// Show config file path
    Path,
    /// Load and validate the configuration
    Validate,
}

pub fn run_config(args: ConfigArgs, path: Option<&Path>) -> Result<()> {
    match args.command {
        ConfigCommands::Show => run_show(path),
        ConfigCommands::Path => run_path(path),
        ConfigCommands::Validate => run_validate(path),
    }
}

fn run_show(path: Option<&Path>) -> Result<()> {
    let config = SiteConfig::load(path)?;
    let toml_str = toml::to_string_pretty(&config).context("Failed to serialize config to TOML")?;
    println!("{}", toml_str);
    Ok(())
}

fn run_path(path: Option<&Path>) -> Result<()> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(SiteConfig::config_path);
    println!("{}", path.display());
    Ok(())
}

fn run_validate(path: Option<&Path>) -> Result<()> {
    let config = SiteConfig::load(path)?;
    println!("✓ Config loaded successfully");
    println!(
        "  Sanity: project {} / dataset {} (API v{}, {})",
        config.sanity.project_id,
        config.sanity.dataset,
        config.sanity.api_version,
        if config.sanity.use_cdn { "CDN" } else { "live" }
    );
    println!("  Server: {}", config.server.bind);
    if config.public.google_maps_api_key.is_empty() {
        println!("  ⚠ GOOGLE_MAPS_API_KEY is not set");
    }
    Ok(())
}
