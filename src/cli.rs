use crate::app::{build_dispatcher, serve};
use crate::config::AppConfig;
use crate::logging::{init_logging, LogConfig};
use crate::products::InMemoryRepository;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "product-service")]
#[command(version, about = "Product catalogue REST service", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Path to the YAML configuration file
        #[arg(short, long, env = "PRODUCT_SERVICE_CONFIG", default_value = "config.yml")]
        config: PathBuf,
    },
    /// Print the route table in registration order
    Routes,
}

/// Parse `std::env::args` and run the selected command
///
/// # Errors
///
/// Propagates any startup failure.
pub fn run_cli() -> Result<()> {
    run(Cli::parse())
}

/// # Errors
///
/// Propagates any startup failure.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Serve { config } => {
            let app_config = AppConfig::load(&config)
                .context("could not load application configuration")?;
            let log_config = LogConfig::from_env().with_overrides(
                app_config.logging.level.as_deref(),
                app_config.logging.format.as_deref(),
            );
            let _logging = init_logging(&log_config)?;
            info!(config = %config.display(), "Application configuration loaded");
            serve(&app_config)
        }
        Commands::Routes => {
            let dispatcher =
                build_dispatcher(InMemoryRepository::new()).context("could not build route table")?;
            dispatcher.router().dump_routes();
            Ok(())
        }
    }
}
