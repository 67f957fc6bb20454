//! Inline rules: literal text escaping, emphasis, links and images.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::html;
use crate::util::escape_text;

// Emphasis interiors hold no marker of their kind and stay on one line.
static STRONG_STAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*\n]+)\*\*").unwrap());
static STRONG_UNDERSCORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__([^_\n]+)__").unwrap());
static EM_STAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*([^*\n]+)\*").unwrap());
static EM_UNDERSCORE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_([^_\n]+)_").unwrap());

/// Link or image. The optional `!` makes each match exactly one of the two.
static LINK_OR_IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(!?)\[([^\]\n]+)\]\(([^)\n]+)\)").unwrap());

/// Stage 2b: escape `&`, `<` and `>` in everything that is not code.
///
/// Runs after both code stages, so only user text is affected. After this
/// every `<` in the buffer opens markup written by the pipeline itself, and a
/// blockquote marker reads `&gt;`.
pub(crate) fn escape_literal_text(text: &str) -> String {
    escape_text(text)
}

/// Stage 4: strong emphasis first, then single emphasis.
pub(crate) fn emphasis(text: &str) -> String {
    let text = STRONG_STAR_RE.replace_all(text, "<strong>$1</strong>");
    let text = STRONG_UNDERSCORE_RE.replace_all(&text, "<strong>$1</strong>");
    let text = EM_STAR_RE.replace_all(&text, "<em>$1</em>");
    EM_UNDERSCORE_RE
        .replace_all(&text, "<em>$1</em>")
        .into_owned()
}

/// Stage 7: `![alt](url)` becomes `<img>`, `[text](url)` becomes `<a>`.
pub(crate) fn links_and_images(text: &str) -> String {
    LINK_OR_IMAGE_RE
        .replace_all(text, |caps: &Captures<'_>| {
            let mut out = String::new();
            if caps[1].is_empty() {
                html::link(&caps[3], &caps[2], &mut out);
            } else {
                html::image(&caps[3], &caps[2], &mut out);
            }
            out
        })
        .into_owned()
}
