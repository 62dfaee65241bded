//! pipeconf - load and print pipeline configuration files.
//!
//! Usage:
//!   pipeconf [config.yml] [--format text|json] [--max-pipelines N] [--strict-numbers]

mod render;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser as _;
use pipeconf_core::{NumberPolicy, Parser, ParserOptions, PipelineConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::render::{render, OutputFormat};

#[derive(clap::Parser, Debug)]
#[command(name = "pipeconf")]
#[command(about = "Load a pipeline configuration file and print the parsed pipelines")]
#[command(version)]
struct Cli {
    /// Configuration file (YAML)
    #[arg(default_value = "config.yml")]
    path: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Fail if the file defines more than N pipelines
    #[arg(long, value_name = "N")]
    max_pipelines: Option<usize>,

    /// Reject non-numeric worker/buffer counts instead of reading them as 0
    #[arg(long)]
    strict_numbers: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn options(&self) -> ParserOptions {
        let mut options = ParserOptions::new();
        options.max_records = self.max_pipelines;
        if self.strict_numbers {
            options = options.numbers(NumberPolicy::Strict);
        }
        options
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Read and parse one configuration file.
fn load(path: &Path, parser: &Parser) -> pipeconf_core::Result<Vec<PipelineConfig>> {
    let text = fs::read_to_string(path)?;
    parser.parse_yaml(&text)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let parser = Parser::with_options(cli.options());
    tracing::debug!(path = %cli.path.display(), options = ?parser.options(), "loading");

    let records = load(&cli.path, &parser)
        .with_context(|| format!("failed to load {}", cli.path.display()))?;
    tracing::info!(pipelines = records.len(), "loaded");

    print!("{}", render(&records, cli.format)?);
    Ok(())
}
