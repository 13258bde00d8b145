//! # Sally
//!
//! A small HTTP server that answers `go get` for vanity import paths.
//!
//! Packages are configured in a YAML file and loaded into a
//! [`sally_path_tree::PathTree`], so a request for any subpackage path
//! resolves to the closest configured package. Paths that do not resolve to a
//! package get an index page of the packages below them.

use anyhow::{Context as AnyhowContext, Result};
use clap::Parser;
use std::path::PathBuf;

mod bind;
mod config;
mod handler;
mod render;

pub use config::{Config, ConfigError, GodocConfig, Package};
pub use handler::Sally;

#[derive(Parser)]
#[command(name = "sally")]
#[command(about = "Vanity import path server for Go packages", long_about = None)]
#[command(version)]
struct Cli {
    /// YAML file to read the configuration from
    #[arg(long, default_value = "sally.yaml")]
    yml: PathBuf,

    /// Port to listen and serve on
    #[arg(long, default_value_t = 8080)]
    port: u16,

    /// Host or address to listen on
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, conflicts_with = "verbose")]
    quiet: bool,
}

pub async fn main_entry() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    serve(cli).await
}

async fn serve(cli: Cli) -> Result<()> {
    log::debug!("Parsing configuration from {}", cli.yml.display());
    let config = Config::parse(&cli.yml)
        .with_context(|| format!("Failed to parse configuration {}", cli.yml.display()))?;
    log::info!(
        "Parsed configuration: {}",
        serde_json::to_string(&config).context("Failed to encode configuration")?
    );

    let app = Sally::new(config).router();

    let bind = bind::bind_target(&cli.host, cli.port);
    let addr = bind::resolve_bind_addr(&bind).await?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    log::info!("Starting HTTP server on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("Server stopped")?;
    Ok(())
}
