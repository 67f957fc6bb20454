//! `mdlive render` command implementation.

use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use mdlive_renderer::LivePreview;

use super::{CommonArgs, render_document, write_output};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render (`-` or omitted reads stdin).
    input: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or input/output cannot be accessed.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.common.load_config(None)?;

        let markdown = read_input(self.input.as_deref())?;
        let html = render_document(&LivePreview::new(), &markdown, &config);
        tracing::info!(input_len = markdown.len(), output_len = html.len(), "Rendered");

        write_output(&html, self.common.output.as_deref())?;
        if let Some(path) = &self.common.output {
            output.success(&format!("Wrote {}", path.display()));
        }
        Ok(())
    }
}

/// Read markdown from a file, or from stdin for `None` and `-`.
fn read_input(path: Option<&std::path::Path>) -> Result<String, CliError> {
    match path {
        Some(path) if path.as_os_str() != "-" => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}
