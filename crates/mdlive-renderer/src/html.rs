//! HTML emitters shared by the pipeline stages.
//!
//! Every fragment the pipeline produces is written here, so the markup shape
//! (and the `language-X` class the highlighter relies on) lives in one place.

use std::fmt::Write;

use crate::list::ListKind;
use crate::util::{escape_attr, escape_html};

/// Write a fenced code block.
///
/// `content` is raw source and gets escaped. Without a language the class
/// attribute is omitted.
pub(crate) fn code_block(lang: Option<&str>, content: &str, out: &mut String) {
    if let Some(lang) = lang {
        let _ = write!(
            out,
            r#"<pre><code class="language-{}">{}</code></pre>"#,
            escape_html(lang),
            escape_html(content)
        );
    } else {
        let _ = write!(out, "<pre><code>{}</code></pre>", escape_html(content));
    }
}

/// Write an inline code span. `content` is raw source and gets escaped.
pub(crate) fn inline_code(content: &str, out: &mut String) {
    let _ = write!(out, "<code>{}</code>", escape_html(content));
}

pub(crate) fn heading(level: usize, content: &str, out: &mut String) {
    let _ = write!(out, "<h{level}>{content}</h{level}>");
}

/// Write an image. `src` and `alt` are already text-escaped.
pub(crate) fn image(src: &str, alt: &str, out: &mut String) {
    let _ = write!(
        out,
        r#"<img src="{}" alt="{}">"#,
        escape_attr(src),
        escape_attr(alt)
    );
}

/// Write a link. `href` is already text-escaped; `text` is inline markup.
pub(crate) fn link(href: &str, text: &str, out: &mut String) {
    let _ = write!(out, r#"<a href="{}">{text}</a>"#, escape_attr(href));
}

/// Write a list with one `<li>` per item.
pub(crate) fn list<'a>(kind: ListKind, items: impl IntoIterator<Item = &'a str>, out: &mut String) {
    let tag = kind.tag();
    let _ = write!(out, "<{tag}>");
    for item in items {
        let _ = write!(out, "<li>{item}</li>");
    }
    let _ = write!(out, "</{tag}>");
}

pub(crate) fn blockquote(content: &str, out: &mut String) {
    let _ = write!(out, "<blockquote>{content}</blockquote>");
}

pub(crate) fn paragraph(content: &str, out: &mut String) {
    let _ = write!(out, "<p>{content}</p>");
}
