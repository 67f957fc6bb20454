//! mdlive CLI - live markdown preview.
//!
//! Provides commands for:
//! - `render`: Render a markdown file (or stdin) to HTML once
//! - `watch`: Re-render a markdown file every time it changes

mod commands;
mod debouncer;
mod error;
mod output;
mod page;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{RenderArgs, WatchArgs};
use output::Output;

/// mdlive - live markdown preview.
#[derive(Parser)]
#[command(name = "mdlive", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render markdown to HTML once.
    Render(RenderArgs),
    /// Re-render markdown to HTML whenever the file changes.
    Watch(WatchArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Render(args) => args.common.verbose,
            Self::Watch(args) => args.common.verbose,
        }
    }
}

/// `--verbose` enables INFO level, otherwise use `RUST_LOG` or default to WARN.
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.command.verbose()))
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Watch(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_verbose_filter_is_info() {
        assert_eq!(log_filter(true).to_string(), "info");
    }

    #[test]
    fn test_default_filter_is_warn() {
        if std::env::var_os("RUST_LOG").is_none() {
            assert_eq!(log_filter(false).to_string(), "warn");
        }
    }
}
