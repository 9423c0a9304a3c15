mod commands;
mod notify;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use docpix_core::config::AppConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "docpix", about = "Extract document images in reading order and edit them")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Settings file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract embedded images in reading order
    Extract(commands::extract::ExtractArgs),
    /// Show the resolved image order of a document
    Order(commands::order::OrderArgs),
    /// List the images of a folder in browsing order
    List(commands::list::ListArgs),
    /// Crop an image with a rectangle drawn on a virtual viewport
    Crop(commands::crop::CropArgs),
    /// Rotate and/or flip an image
    Transform(commands::transform::TransformArgs),
    /// Re-encode an image at a given quality
    Compress(commands::compress::CompressArgs),
    /// Print the default settings as TOML
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match cli.config {
        Some(ref path) => load_config(path)?,
        None => AppConfig::default(),
    };

    match &cli.command {
        Commands::Extract(args) => commands::extract::run(args, &config),
        Commands::Order(args) => commands::order::run(args),
        Commands::List(args) => commands::list::run(args),
        Commands::Crop(args) => commands::crop::run(args, &config),
        Commands::Transform(args) => commands::transform::run(args),
        Commands::Compress(args) => commands::compress::run(args, &config),
        Commands::Config(args) => commands::config::run(args),
    }
}

fn load_config(path: &Path) -> Result<AppConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    toml::from_str(&contents).context("Invalid docpix config")
}
