//! Line-anchored block rules: headers, horizontal rules, blockquotes.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::html;

/// One to six `#` followed by a space. Seven hashes never match.
static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(#{1,6}) (.*)$").unwrap());

static HR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^---$").unwrap());

/// Quote marker in column 0, as left by literal text escaping. Whitespace
/// after it never crosses a line break.
static BLOCKQUOTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^&gt;[ \t]*(.+)$").unwrap());

static ADJACENT_QUOTES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</blockquote>\s*<blockquote>").unwrap());

/// Stage 3: `# Title` through `###### Title`.
pub(crate) fn headers(text: &str) -> String {
    HEADER_RE
        .replace_all(text, |caps: &Captures<'_>| {
            let mut out = String::new();
            html::heading(caps[1].len(), &caps[2], &mut out);
            out
        })
        .into_owned()
}

/// Stage 5: a line that is exactly `---`.
pub(crate) fn horizontal_rules(text: &str) -> String {
    HR_RE.replace_all(text, "<hr>").into_owned()
}

/// Stage 8: quoted lines, with consecutive quotes merged into one block.
///
/// Runs on escaped text, so the marker is `&gt;`. A marker with nothing
/// after it stays as escaped text.
pub(crate) fn blockquotes(text: &str) -> String {
    let quoted = BLOCKQUOTE_RE.replace_all(text, |caps: &Captures<'_>| {
        let mut out = String::new();
        html::blockquote(&caps[1], &mut out);
        out
    });
    ADJACENT_QUOTES_RE.replace_all(&quoted, "<br>").into_owned()
}
