//! `mdlive watch` command implementation.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use clap::Args;
use mdlive_config::Config;
use mdlive_renderer::LivePreview;
use notify::{RecursiveMode, Watcher};

use super::{CommonArgs, render_document, write_output};
use crate::debouncer::{ChangeDebouncer, ChangeKind};
use crate::error::CliError;
use crate::output::Output;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Arguments for the watch command.
#[derive(Args)]
pub(crate) struct WatchArgs {
    /// Markdown file to watch.
    input: PathBuf,

    /// Quiet period before re-rendering, in milliseconds (overrides config).
    #[arg(long)]
    debounce_ms: Option<u64>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl WatchArgs {
    /// Execute the watch command.
    ///
    /// Renders once, then re-renders after every debounced change until the
    /// file is removed or the process is interrupted.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the input cannot be read, or
    /// the file watcher cannot be started.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.common.load_config(self.debounce_ms)?;
        let input = self.input.canonicalize()?;
        let target = self.common.output.as_deref();
        let preview = LivePreview::new();

        rerender(&preview, &input, &config, target)?;

        let directory = input
            .parent()
            .ok_or_else(|| CliError::Watch(format!("{} has no parent directory", input.display())))?
            .to_path_buf();

        let debouncer = Arc::new(ChangeDebouncer::new(config.watch.debounce()));
        let _watcher = watch_file(&directory, &input, &debouncer)?;

        output.info(&format!(
            "Watching {} (press Ctrl+C to stop)",
            input.display()
        ));
        tracing::info!(path = %input.display(), debounce = ?config.watch.debounce(), "Watching");

        loop {
            thread::sleep(POLL_INTERVAL);
            match debouncer.take_ready() {
                None => {}
                Some(ChangeKind::Removed) => {
                    output.warning(&format!("{} was removed, stopping", input.display()));
                    return Ok(());
                }
                Some(kind) => {
                    tracing::info!(?kind, "Source changed");
                    if let Err(err) = rerender(&preview, &input, &config, target) {
                        output.error(&format!("Render failed: {err}"));
                    }
                }
            }
        }
    }
}

/// Read `input`, render it and write the result.
fn rerender(
    preview: &LivePreview,
    input: &Path,
    config: &Config,
    target: Option<&Path>,
) -> Result<(), CliError> {
    let markdown = std::fs::read_to_string(input)?;
    let html = render_document(preview, &markdown, config);
    write_output(&html, target)?;
    tracing::info!(input_len = markdown.len(), output_len = html.len(), "Rendered");
    Ok(())
}

/// Convert a `notify::EventKind` to a [`ChangeKind`].
///
/// Returns `None` for event kinds that are not relevant (e.g., Access).
fn change_kind(kind: notify::EventKind) -> Option<ChangeKind> {
    match kind {
        notify::EventKind::Create(_) => Some(ChangeKind::Created),
        notify::EventKind::Modify(_) => Some(ChangeKind::Modified),
        notify::EventKind::Remove(_) => Some(ChangeKind::Removed),
        _ => None,
    }
}

/// Watch `directory` and record events for `file` into the debouncer.
///
/// The directory is watched rather than the file so atomic saves (write to a
/// temporary file, then rename) keep being observed.
fn watch_file(
    directory: &Path,
    file: &Path,
    debouncer: &Arc<ChangeDebouncer>,
) -> Result<notify::RecommendedWatcher, CliError> {
    let debouncer = Arc::clone(debouncer);
    let file = file.to_path_buf();

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        let Ok(event) = res else { return };
        let Some(kind) = change_kind(event.kind) else {
            return;
        };
        if event.paths.iter().any(|path| path == &file) {
            debouncer.record(kind);
        }
    })?;

    watcher.watch(directory, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}
