//! `sitectl serve`: run the content endpoint

use anyhow::{Context, Result};
use clap::Parser;
use sitectl_core::SiteConfig;
use std::net::SocketAddr;

use sitectl_server::run_server;

#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (overrides config and SITECTL_BIND)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Read through the Sanity API CDN instead of the live API
    #[arg(long)]
    pub use_cdn: bool,
}

/// Apply command-line overrides on top of the loaded configuration
fn apply(args: &ServeArgs, mut config: SiteConfig) -> SiteConfig {
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    config.server.cors_permissive |= args.cors_permissive;
    config.sanity.use_cdn |= args.use_cdn;
    config
}

pub async fn run_serve(args: ServeArgs, config: SiteConfig) -> Result<()> {
    let config = apply(&args, config);

    tracing::info!(
        bind = %config.server.bind,
        project = %config.sanity.project_id,
        dataset = %config.sanity.dataset,
        "Starting sitectl server"
    );

    run_server(config).await.context("Server error")?;

    Ok(())
}
