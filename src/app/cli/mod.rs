//! CLI Adapter.

mod check_tools;
mod generate;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::domain::AppError;

#[derive(Parser)]
#[command(name = "brandkit")]
#[command(version)]
#[command(
    about = "Generate brand assets and deploy them into an editor build tree",
    long_about = None
)]
struct Cli {
    /// Builder directory holding src/<variant>/ resource trees
    builder_dir: PathBuf,
    /// Source directory (looked up for brandkit.toml)
    source_dir: PathBuf,
    /// Brand config file (default: <SOURCE_DIR>/brandkit.toml, then built-in defaults)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Keep intermediate files in the builder directory
    #[arg(long)]
    keep_scratch: bool,
    /// Exit 0 when some items failed but the run completed
    #[arg(long)]
    allow_partial: bool,
    /// Only probe the external tools and report their status
    #[arg(long)]
    check_tools: bool,
    /// Print the run report as JSON on stdout
    #[arg(long)]
    json: bool,
    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Logs go to stderr so `--json` output stays machine readable.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<i32, AppError> = if cli.check_tools {
        check_tools::run_check_tools(&cli.source_dir, cli.config.as_deref(), cli.json)
    } else {
        generate::run_generate(generate::GenerateArgs {
            builder_dir: &cli.builder_dir,
            source_dir: &cli.source_dir,
            config: cli.config.as_deref(),
            keep_scratch: cli.keep_scratch,
            allow_partial: cli.allow_partial,
            json: cli.json,
        })
    };

    match result {
        Ok(exit_code) => {
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
