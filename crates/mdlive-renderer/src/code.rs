//! Fenced code blocks and inline code spans.
//!
//! Both stages render their markup immediately and park it in a
//! [`CodeStash`], leaving an opaque placeholder in the buffer. Later stages
//! never see code content, so a fence body that happens to look like a
//! header or emphasis is left alone. [`CodeStash::restore`] swaps the
//! placeholders back before paragraph wrapping.
//!
//! Placeholder delimiters already present in the input are parked in the
//! stash first ([`reserve_placeholder_chars`]), so every delimiter left in the
//! buffer belongs to a real placeholder.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::html;

/// Fenced block: three backticks, optional language tag, optional newline,
/// a body without backticks, three backticks.
static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```(\w+)?\n?([^`]*?)```").unwrap());

/// Single-backtick code span.
static INLINE_CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());

/// Stash placeholder left in the buffer.
static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x{E000}(\d+)\x{E001}").unwrap());

/// Input characters that would be mistaken for placeholder delimiters.
static DELIMITER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x{E000}\x{E001}]").unwrap());

const PLACEHOLDER_OPEN: char = '\u{E000}';
const PLACEHOLDER_CLOSE: char = '\u{E001}';

/// A fenced code block as found in the source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeBlockMatch {
    /// Language tag after the opening fence, if any.
    pub language: Option<String>,
    /// Body between the fences, untrimmed and unescaped.
    pub raw_code: String,
}

impl CodeBlockMatch {
    fn from_captures(caps: &Captures<'_>) -> Self {
        Self {
            language: caps.get(1).map(|m| m.as_str().to_owned()),
            raw_code: caps[2].to_owned(),
        }
    }

    /// Render as `<pre><code>` markup with a trimmed, escaped body.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        html::code_block(self.language.as_deref(), self.raw_code.trim(), &mut out);
        out
    }
}

/// Rendered code markup waiting to be put back into the buffer.
#[derive(Debug, Default)]
pub(crate) struct CodeStash {
    entries: Vec<String>,
    /// Entries holding literal input characters rather than code markup.
    literals: usize,
}

impl CodeStash {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Store rendered markup and return the placeholder standing in for it.
    pub(crate) fn stash(&mut self, markup: String) -> String {
        let index = self.entries.len();
        self.entries.push(markup);
        format!("{PLACEHOLDER_OPEN}{index}{PLACEHOLDER_CLOSE}")
    }

    /// Store a literal input character that must not read as a delimiter.
    fn stash_literal(&mut self, ch: &str) -> String {
        self.literals += 1;
        self.stash(ch.to_owned())
    }

    /// Number of stashed code blocks and spans.
    pub(crate) fn code_spans(&self) -> usize {
        self.entries.len() - self.literals
    }

    /// Replace every placeholder in `text` with its stored markup.
    ///
    /// Unknown indices are dropped rather than leaking private-use
    /// characters into the output.
    pub(crate) fn restore(&self, text: &str) -> String {
        if self.entries.is_empty() {
            return text.to_owned();
        }
        PLACEHOLDER_RE
            .replace_all(text, |caps: &Captures<'_>| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| self.entries.get(index))
                    .cloned()
                    .unwrap_or_default()
            })
            .into_owned()
    }
}

/// Find all fenced code blocks in `text`, in source order.
pub fn find_code_blocks(text: &str) -> Vec<CodeBlockMatch> {
    FENCE_RE
        .captures_iter(text)
        .map(|caps| CodeBlockMatch::from_captures(&caps))
        .collect()
}

/// Park placeholder delimiter characters found in the input.
///
/// Runs before any code stage. The characters come back unchanged when the
/// stash is restored, including inside code bodies.
pub(crate) fn reserve_placeholder_chars(text: &str, stash: &mut CodeStash) -> String {
    DELIMITER_RE
        .replace_all(text, |caps: &Captures<'_>| stash.stash_literal(&caps[0]))
        .into_owned()
}

/// Stage 1: render fenced code blocks and stash them.
pub(crate) fn fenced_code_blocks(text: &str, stash: &mut CodeStash) -> String {
    FENCE_RE
        .replace_all(text, |caps: &Captures<'_>| {
            let block = CodeBlockMatch {
                language: caps.get(1).map(|m| m.as_str().to_owned()),
                raw_code: stash.restore(&caps[2]),
            };
            stash.stash(block.to_html())
        })
        .into_owned()
}

/// Stage 2: render single-backtick spans and stash them.
pub(crate) fn inline_code(text: &str, stash: &mut CodeStash) -> String {
    INLINE_CODE_RE
        .replace_all(text, |caps: &Captures<'_>| {
            let mut out = String::new();
            html::inline_code(&stash.restore(&caps[1]), &mut out);
            stash.stash(out)
        })
        .into_owned()
}
