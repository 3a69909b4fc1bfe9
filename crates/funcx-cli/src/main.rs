//! funcx CLI entry point.
//!
//! Provides command-line tools for working with `$func:` expressions:
//! - `funcx expand` - Expand calls and pipelines in a template string
//! - `funcx parse` - Show how an expression splits into calls
//! - `funcx functions` - List reserved names and built-in functions

mod commands;
mod context;
mod output;

use std::io::stderr;
use std::process::exit;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{ExpandArgs, FunctionsArgs, ParseArgs, run_expand, run_functions, run_parse};
use miette::MietteHandlerOpts;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// `$func:` expression tools.
#[derive(Debug, Parser)]
#[command(name = "funcx")]
#[command(about = "Expand and inspect $func: expressions", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Color output control
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto, global = true)]
    pub color: ColorWhen,

    /// Log every dispatched call to stderr
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
    /// Expand a template string
    Expand(ExpandArgs),
    /// Show the calls or pipeline steps of one expression
    Parse(ParseArgs),
    /// List reserved function names and the built-in string functions
    Functions(FunctionsArgs),
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

/// Send `tracing` events to stderr, filtered by `RUST_LOG`.
fn setup_logging(verbose: bool) {
    let default_level = if verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(stderr)
        .with_target(false)
        .init();
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    setup_colors(cli.color);
    setup_logging(cli.verbose);

    miette::set_hook(Box::new(|_| {
        Box::new(
            MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))?;

    let result = match cli.command {
        Commands::Expand(args) => run_expand(args),
        Commands::Parse(args) => run_parse(args),
        Commands::Functions(args) => run_functions(args),
    };

    match result {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("{e:?}");
            exit(exitcode::SOFTWARE);
        }
    }
}
