//! CLI command implementations.

mod render;
mod watch;

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use mdlive_config::{CliSettings, Config};
use mdlive_renderer::LivePreview;

use crate::error::CliError;
use crate::page::render_page;

pub(crate) use render::RenderArgs;
pub(crate) use watch::WatchArgs;

/// Arguments shared by all commands.
#[derive(Args)]
pub(crate) struct CommonArgs {
    /// Path to configuration file (default: auto-discover mdlive.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Wrap the output in a complete HTML page (overrides config).
    #[arg(long)]
    standalone: bool,

    /// Page title for standalone output (overrides config).
    #[arg(long)]
    title: Option<String>,

    /// Do not load highlight.js in standalone pages.
    #[arg(long)]
    no_highlight: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommonArgs {
    /// Load configuration with these arguments applied on top.
    fn load_config(&self, debounce_ms: Option<u64>) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            standalone: self.standalone.then_some(true),
            title: self.title.clone(),
            highlight_enabled: self.no_highlight.then_some(false),
            debounce_ms,
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

/// Render `markdown` into the final output document.
fn render_document(preview: &LivePreview, markdown: &str, config: &Config) -> String {
    let fragment = preview.on_change(markdown);
    if config.page.standalone {
        render_page(&fragment, config)
    } else {
        fragment
    }
}

/// Write HTML to `path`, or to stdout when no path is given.
fn write_output(html: &str, path: Option<&Path>) -> Result<(), CliError> {
    match path {
        Some(path) => std::fs::write(path, html)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(html.as_bytes())?;
            if !html.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
            stdout.flush()?;
        }
    }
    Ok(())
}
