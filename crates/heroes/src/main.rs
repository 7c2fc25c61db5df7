//! heroes - builds the heroes static site.
//!
//! Running with no arguments performs one full, clean build.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use heroes_static::SiteBuilder;
use tracing_subscriber::{fmt, EnvFilter};

mod config;

use config::ConfigFile;

#[derive(Parser)]
#[command(name = "heroes")]
#[command(about = "Build the heroes static site from JSON data and templates")]
#[command(version)]
pub struct Cli {
    /// Path to site.toml config file
    #[arg(short, long, default_value = "site.toml")]
    config: PathBuf,

    /// Output directory (defaults to config or "dist")
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only report warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else if cli.quiet {
        EnvFilter::new("warn")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    run(cli)
}

/// Run one full build.
fn run(cli: Cli) -> Result<()> {
    tracing::info!("Starting static site generation...");

    let config = ConfigFile::load(&cli.config)?.into_build_config(cli.output);

    let result = SiteBuilder::new(config)
        .build()
        .context("Build failed")?;

    tracing::info!(
        "Build complete! Rendered {} pages and copied {} static files in {}ms",
        result.pages,
        result.assets,
        result.duration_ms
    );
    tracing::info!(
        "Your static site is ready in the '{}' folder.",
        result.output_dir.display()
    );

    Ok(())
}
