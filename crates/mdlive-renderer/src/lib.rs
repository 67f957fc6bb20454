//! Markdown to HTML transformer for live previews.
//!
//! A single pure function, [`render`], turns a constrained markdown subset
//! into an HTML fragment. It is built as an ordered list of text-rewriting
//! stages, each written so it does not disturb the markup produced by the
//! stages before it:
//!
//! 1. fenced code blocks and 2. inline code (rendered, escaped and set aside)
//! 3. headers, 4. emphasis, 5. horizontal rules
//! 6. lists (line scan into [`ListSection`]s)
//! 7. links and images, 8. blockquotes
//! 9. paragraphs (over a flat top-level [`Node`] list)
//!
//! Anything that does not match a rule is kept as literal text; rendering
//! never fails.
//!
//! Syntax highlighting is left to the host through the [`Highlighter`]
//! hook; [`LivePreview`] combines both for change-driven callers.
//!
//! # Example
//!
//! ```
//! use mdlive_renderer::render;
//!
//! let html = render("# Hello\n\n- one\n- two");
//! assert_eq!(html, "<h1>Hello</h1>\n\n<ul><li>one</li><li>two</li></ul>");
//! ```

mod block;
mod code;
mod highlight;
mod html;
mod inline;
mod list;
mod paragraph;
mod pipeline;
mod preview;
mod util;

pub use code::{CodeBlockMatch, find_code_blocks};
pub use highlight::{CodeBlock, Highlighter, NoopHighlighter, highlight_code_blocks};
pub use list::{ListKind, ListSection, find_list_sections};
pub use paragraph::{Node, parse_top_level};
pub use pipeline::{RenderResult, Transformer, render};
pub use preview::LivePreview;
pub use util::escape_html;
