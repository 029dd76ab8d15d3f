//! Server entry point.
//!
//! # Responsibility
//! - Resolve configuration and logging once, then hand off to the HTTP layer.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use clickform_core::config::DEFAULT_ENV_FILE;
use clickform_core::{init_logging, AppConfig};

#[derive(Debug, Parser)]
#[command(version, about = "Serve the clickform pages and endpoints")]
struct Args {
    /// `KEY=VALUE` file read before the process environment.
    #[arg(long, default_value = DEFAULT_ENV_FILE)]
    env_file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let config = AppConfig::load(&args.env_file)?;
    init_logging(&config.log_level, config.log_dir.as_deref())?;

    clickform_server::serve(config).await?;
    Ok(())
}
