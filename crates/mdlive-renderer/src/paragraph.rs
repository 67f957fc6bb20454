//! Paragraph wrapping over a flat top-level node list.
//!
//! The fragment is split into top-level text runs and elements. Text runs
//! with visible content become `<p>` elements; everything else is written
//! back untouched. No tree is built: only the outermost element boundaries
//! matter, and they are found by counting open/close tags of the same name.
//!
//! Earlier stages escape every `<` that did not come from the pipeline, so
//! any `<` seen here starts a tag.

use crate::html;

/// Elements that never have a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// A top-level piece of an HTML fragment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Node<'a> {
    /// Text between elements, as written (entities stay encoded).
    Text(&'a str),
    /// A complete element including its start and end tags.
    Element(&'a str),
}

/// A tag as found in the fragment.
#[derive(Debug)]
struct Tag<'a> {
    name: &'a str,
    closing: bool,
    self_closing: bool,
    /// Byte offset just past the closing `>`.
    end: usize,
}

impl Tag<'_> {
    fn is_void(&self) -> bool {
        self.self_closing
            || VOID_ELEMENTS
                .iter()
                .any(|void| void.eq_ignore_ascii_case(self.name))
    }
}

/// Parse the tag starting at `start` (which must point at `<`).
///
/// Returns `None` for a `<` that does not open a well-formed tag.
fn parse_tag(html: &str, start: usize) -> Option<Tag<'_>> {
    let bytes = html.as_bytes();
    let mut pos = start + 1;

    let closing = bytes.get(pos) == Some(&b'/');
    if closing {
        pos += 1;
    }

    let name_start = pos;
    if !bytes.get(pos).is_some_and(u8::is_ascii_alphabetic) {
        return None;
    }
    while bytes.get(pos).is_some_and(u8::is_ascii_alphanumeric) {
        pos += 1;
    }
    let name = &html[name_start..pos];

    let mut quote: Option<u8> = None;
    while let Some(&byte) = bytes.get(pos) {
        match (quote, byte) {
            (Some(q), b) if b == q => quote = None,
            (Some(_), _) => {}
            (None, b'"' | b'\'') => quote = Some(byte),
            (None, b'>') => {
                let self_closing = pos > name_start && bytes[pos - 1] == b'/';
                return Some(Tag {
                    name,
                    closing,
                    self_closing,
                    end: pos + 1,
                });
            }
            (None, _) => {}
        }
        pos += 1;
    }

    None
}

/// Find where the element opened by `open` ends.
///
/// Nested elements of the same name are counted. An element that is never
/// closed runs to the end of the fragment.
fn element_end(html: &str, open: &Tag<'_>) -> usize {
    if open.closing || open.is_void() {
        return open.end;
    }

    let mut depth = 1usize;
    let mut pos = open.end;
    while let Some(offset) = html[pos..].find('<') {
        let at = pos + offset;
        let Some(tag) = parse_tag(html, at) else {
            pos = at + 1;
            continue;
        };
        if tag.name.eq_ignore_ascii_case(open.name) {
            if tag.closing {
                depth -= 1;
                if depth == 0 {
                    return tag.end;
                }
            } else if !tag.is_void() {
                depth += 1;
            }
        }
        pos = tag.end;
    }

    html.len()
}

/// Split an HTML fragment into its top-level nodes.
pub fn parse_top_level(html: &str) -> Vec<Node<'_>> {
    let mut nodes = Vec::new();
    let mut text_start = 0;
    let mut pos = 0;

    while let Some(offset) = html[pos..].find('<') {
        let at = pos + offset;
        let Some(tag) = parse_tag(html, at) else {
            pos = at + 1;
            continue;
        };
        if at > text_start {
            nodes.push(Node::Text(&html[text_start..at]));
        }
        let end = element_end(html, &tag);
        nodes.push(Node::Element(&html[at..end]));
        text_start = end;
        pos = end;
    }

    if text_start < html.len() {
        nodes.push(Node::Text(&html[text_start..]));
    }

    nodes
}

/// Stage 9: wrap top-level text with visible content in `<p>`.
pub(crate) fn paragraphs(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    for node in parse_top_level(text) {
        match node {
            Node::Text(raw) if !raw.trim().is_empty() => html::paragraph(raw, &mut out),
            Node::Text(raw) | Node::Element(raw) => out.push_str(raw),
        }
    }
    out
}
