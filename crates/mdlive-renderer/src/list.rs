//! List detection and rewriting.
//!
//! Lists are found by a line scan rather than a single regex: a run that
//! starts at a marker line and continues up to the next blank line forms a
//! [`ListSection`], and each section is replaced by one `<ul>`/`<ol>` line. The first line of a run decides its kind; later lines
//! with the other marker are folded into it.

use std::sync::LazyLock;

use regex::Regex;

use crate::html;

static ORDERED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*\d+\.\s+(.+)$").unwrap());
static UNORDERED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[-*]\s+(.+)$").unwrap());
static MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:\d+\.|-|\*)\s+(.+)$").unwrap());

/// Kind of list a section renders as.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListKind {
    /// `1.` style markers, rendered as `<ol>`.
    Ordered,
    /// `-` or `*` markers, rendered as `<ul>`.
    Unordered,
}

impl ListKind {
    /// Classify a single line, or `None` if it is not a list item.
    ///
    /// Ordered wins when a line could be read both ways.
    pub fn of_line(line: &str) -> Option<Self> {
        if ORDERED_RE.is_match(line) {
            Some(Self::Ordered)
        } else if UNORDERED_RE.is_match(line) {
            Some(Self::Unordered)
        } else {
            None
        }
    }

    pub(crate) fn tag(self) -> &'static str {
        match self {
            Self::Ordered => "ol",
            Self::Unordered => "ul",
        }
    }
}

/// A run of list lines, by line index into the buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListSection {
    /// First line of the run.
    pub start_line: usize,
    /// Last line of the run (inclusive).
    pub end_line: usize,
    /// Kind taken from the first line of the run.
    pub kind: ListKind,
}

/// Scan `lines` for list runs, in discovery order.
///
/// A run starts at a list item and ends at a blank line or at the end of the
/// document. Lines inside a run that carry no marker still belong to it and
/// become items as written. Sections never overlap.
pub fn find_list_sections(lines: &[&str]) -> Vec<ListSection> {
    let mut sections = Vec::new();
    let mut current: Option<ListSection> = None;

    for (idx, line) in lines.iter().enumerate() {
        if line.trim().is_empty() {
            if let Some(section) = current.take() {
                sections.push(section);
            }
        } else if let Some(section) = current.as_mut() {
            section.end_line = idx;
        } else if let Some(kind) = ListKind::of_line(line) {
            current = Some(ListSection {
                start_line: idx,
                end_line: idx,
                kind,
            });
        }
    }

    if let Some(section) = current {
        sections.push(section);
    }

    sections
}

/// Strip the leading list marker from a line.
///
/// Lines without a marker are returned unchanged.
fn item_content(line: &str) -> &str {
    MARKER_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map_or(line, |m| m.as_str())
}

/// Stage 6: replace every list run with a single `<ul>` or `<ol>` line.
///
/// Returns the rewritten text and the number of sections found.
pub(crate) fn lists(text: &str) -> (String, usize) {
    let mut lines: Vec<String> = text.split('\n').map(str::to_owned).collect();
    let sections = {
        let borrowed: Vec<&str> = lines.iter().map(String::as_str).collect();
        find_list_sections(&borrowed)
    };

    // Splice from the back: replacing a later range never moves an earlier one.
    for section in sections.iter().rev() {
        let range = section.start_line..=section.end_line;
        let mut out = String::new();
        html::list(
            section.kind,
            lines[range.clone()].iter().map(|line| item_content(line)),
            &mut out,
        );
        lines.splice(range, [out]);
    }

    (lines.join("\n"), sections.len())
}
