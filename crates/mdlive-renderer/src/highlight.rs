//! Syntax highlighting hook.
//!
//! Rendering ends at `<pre><code class="language-X">` markup. A host that
//! wants highlighted output passes the rendered HTML through
//! [`highlight_code_blocks`] with its own [`Highlighter`]; the engine itself
//! is not part of this crate.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::util::unescape_html;

/// A `code` element nested in a `pre` element, as produced by rendering.
static PRE_CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<pre><code(?: class="language-([^"]*)")?>(.*?)</code></pre>"#).unwrap()
});

/// A rendered code block handed to a [`Highlighter`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodeBlock<'a> {
    /// Language from the `language-X` class, if the fence had a tag.
    pub language: Option<&'a str>,
    /// Inner HTML of the `code` element (escaped source).
    pub html: &'a str,
}

impl CodeBlock<'_> {
    /// The source text, with HTML escaping undone.
    pub fn source(&self) -> String {
        unescape_html(self.html)
    }
}

/// External highlighting service.
///
/// Return the replacement inner HTML for the `code` element, or `None` to
/// leave the block as rendered.
pub trait Highlighter {
    fn highlight(&self, block: &CodeBlock<'_>) -> Option<String>;
}

impl<F> Highlighter for F
where
    F: Fn(&CodeBlock<'_>) -> Option<String>,
{
    fn highlight(&self, block: &CodeBlock<'_>) -> Option<String> {
        self(block)
    }
}

/// Highlighter that never changes anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopHighlighter;

impl Highlighter for NoopHighlighter {
    fn highlight(&self, _block: &CodeBlock<'_>) -> Option<String> {
        None
    }
}

/// Run `highlighter` over every `pre > code` element in `html`.
///
/// The `pre`/`code` wrapper and its class are kept; only the inner HTML is
/// replaced. Blocks the highlighter declines are left untouched.
pub fn highlight_code_blocks(html: &str, highlighter: &dyn Highlighter) -> String {
    PRE_CODE_RE
        .replace_all(html, |caps: &Captures<'_>| {
            let language = caps.get(1).map(|m| m.as_str());
            let block = CodeBlock {
                language,
                html: caps.get(2).map_or("", |m| m.as_str()),
            };
            match highlighter.highlight(&block) {
                Some(inner) => match language {
                    Some(lang) => {
                        format!(r#"<pre><code class="language-{lang}">{inner}</code></pre>"#)
                    }
                    None => format!("<pre><code>{inner}</code></pre>"),
                },
                None => caps[0].to_owned(),
            }
        })
        .into_owned()
}
