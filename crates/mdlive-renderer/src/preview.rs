//! Change-notification entry point for live previews.

use crate::highlight::{Highlighter, NoopHighlighter, highlight_code_blocks};
use crate::pipeline::Transformer;

/// Renders the full buffer on every change and runs the highlighting hook.
///
/// The host owns the text widget and the display surface: it calls
/// [`on_change`](Self::on_change) with the current content and places the
/// returned HTML wherever it displays output.
///
/// # Example
///
/// ```
/// use mdlive_renderer::{CodeBlock, LivePreview};
///
/// fn wrap(block: &CodeBlock<'_>) -> Option<String> {
///     Some(format!("<span class=\"hl\">{}</span>", block.html))
/// }
///
/// let preview = LivePreview::with_highlighter(wrap);
/// let html = preview.on_change("```rust\nlet x = 1;\n```");
/// assert!(html.contains(r#"<span class="hl">let x = 1;</span>"#));
/// ```
pub struct LivePreview<H = NoopHighlighter> {
    transformer: Transformer,
    highlighter: H,
}

impl LivePreview {
    /// Create a preview that leaves code blocks unhighlighted.
    #[must_use]
    pub fn new() -> Self {
        Self::with_highlighter(NoopHighlighter)
    }
}

impl Default for LivePreview {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Highlighter> LivePreview<H> {
    /// Create a preview that runs `highlighter` on every code block.
    pub fn with_highlighter(highlighter: H) -> Self {
        Self {
            transformer: Transformer::new(),
            highlighter,
        }
    }

    /// Handle a content change: render `text` and highlight its code blocks.
    pub fn on_change(&self, text: &str) -> String {
        let result = self.transformer.render(text);
        if result.code_spans == 0 {
            return result.html;
        }
        highlight_code_blocks(&result.html, &self.highlighter)
    }
}
