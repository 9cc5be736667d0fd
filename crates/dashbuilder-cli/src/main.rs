//! Dashbuilder CLI entry point.
//!
//! Provides command-line tools for dashboard documents:
//! - `dashbuilder generate` - Render a document to markup
//! - `dashbuilder expand` - Show a document with templates expanded
//! - `dashbuilder check` - Build several documents and summarize the results

mod commands;
mod output;

use std::io::stderr;
use std::process::exit;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{run_check, run_expand, run_generate, CheckArgs, ExpandArgs, GenerateArgs};
use tracing_subscriber::EnvFilter;

/// Dashboard generation tools.
#[derive(Debug, Parser)]
#[command(name = "dashbuilder")]
#[command(about = "Generate dashboard markup from templated YAML documents", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Color output control
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto, global = true)]
    pub color: ColorWhen,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// When to use colored output.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render a dashboard document to markup
    Generate(GenerateArgs),
    /// Print a document with every template expanded
    Expand(ExpandArgs),
    /// Build documents and report which ones fail
    Check(CheckArgs),
}

/// Set up color output based on user preference.
fn setup_colors(color_when: ColorWhen) {
    match color_when {
        ColorWhen::Auto => {
            // owo-colors automatically checks TTY, NO_COLOR, FORCE_COLOR
        }
        ColorWhen::Always => {
            owo_colors::set_override(true);
        }
        ColorWhen::Never => {
            owo_colors::set_override(false);
        }
    }
}

/// Log to stderr. `RUST_LOG` takes precedence over `--verbose`.
fn setup_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(stderr)
        .init();
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    setup_colors(cli.color);
    setup_tracing(cli.verbose);

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))?;

    let result = match cli.command {
        Commands::Generate(args) => run_generate(args),
        Commands::Expand(args) => run_expand(args),
        Commands::Check(args) => run_check(args),
    };

    match result {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("{:?}", e);
            exit(exitcode::SOFTWARE);
        }
    }
}
