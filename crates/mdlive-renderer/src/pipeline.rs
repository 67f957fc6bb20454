//! The ordered stage pipeline behind [`Transformer`].

use crate::block;
use crate::code::{self, CodeStash};
use crate::inline;
use crate::list;
use crate::paragraph;

/// Result of rendering markdown.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderResult {
    /// Rendered HTML fragment.
    pub html: String,
    /// Number of code spans and fenced blocks that were protected from the
    /// inline rules.
    pub code_spans: usize,
    /// Number of list sections rewritten.
    pub list_sections: usize,
}

/// Per-call scratch state threaded through the stages.
#[derive(Debug, Default)]
struct PipelineState {
    stash: CodeStash,
    list_sections: usize,
}

type StageFn = fn(&str, &mut PipelineState) -> String;

/// A named step of the pipeline.
struct Stage {
    name: &'static str,
    run: StageFn,
}

/// Stages in the order they run. Each stage relies on the text shape left by
/// the previous one, so the order is fixed.
const STAGES: &[Stage] = &[
    Stage {
        name: "reserve_placeholders",
        run: |text, state| code::reserve_placeholder_chars(text, &mut state.stash),
    },
    Stage {
        name: "fenced_code",
        run: |text, state| code::fenced_code_blocks(text, &mut state.stash),
    },
    Stage {
        name: "inline_code",
        run: |text, state| code::inline_code(text, &mut state.stash),
    },
    Stage {
        name: "escape_text",
        run: |text, _| inline::escape_literal_text(text),
    },
    Stage {
        name: "headers",
        run: |text, _| block::headers(text),
    },
    Stage {
        name: "emphasis",
        run: |text, _| inline::emphasis(text),
    },
    Stage {
        name: "horizontal_rules",
        run: |text, _| block::horizontal_rules(text),
    },
    Stage {
        name: "lists",
        run: |text, state| {
            let (out, sections) = list::lists(text);
            state.list_sections = sections;
            out
        },
    },
    Stage {
        name: "links_and_images",
        run: |text, _| inline::links_and_images(text),
    },
    Stage {
        name: "blockquotes",
        run: |text, _| block::blockquotes(text),
    },
    Stage {
        name: "restore_code",
        run: |text, state| state.stash.restore(text),
    },
    Stage {
        name: "paragraphs",
        run: |text, _| paragraph::paragraphs(text),
    },
];

/// Markdown to HTML transformer.
///
/// Holds no state between calls: every [`render`](Self::render) is
/// independent and the transformer can be shared freely across threads.
///
/// # Example
///
/// ```
/// use mdlive_renderer::Transformer;
///
/// let result = Transformer::new().render("# Hello\n\n**Bold** text");
/// assert!(result.html.starts_with("<h1>Hello</h1>"));
/// assert!(result.html.contains("<strong>Bold</strong>"));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Transformer;

impl Transformer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Names of the pipeline stages, in execution order.
    pub fn stage_names(&self) -> impl Iterator<Item = &'static str> {
        STAGES.iter().map(|stage| stage.name)
    }

    /// Render markdown and report what the pipeline found.
    pub fn render(&self, markdown: &str) -> RenderResult {
        let mut state = PipelineState::default();
        let mut buffer = markdown.to_owned();

        for stage in STAGES {
            buffer = (stage.run)(&buffer, &mut state);
            tracing::trace!(stage = stage.name, len = buffer.len(), "Stage complete");
        }

        tracing::debug!(
            input_len = markdown.len(),
            output_len = buffer.len(),
            code_spans = state.stash.code_spans(),
            list_sections = state.list_sections,
            "Rendered markdown"
        );

        RenderResult {
            html: buffer,
            code_spans: state.stash.code_spans(),
            list_sections: state.list_sections,
        }
    }
}

/// Render markdown to an HTML fragment.
///
/// Never fails: syntax that does not match a rule is kept as literal text.
///
/// # Examples
///
/// ```
/// use mdlive_renderer::render;
///
/// assert_eq!(render("### Title"), "<h3>Title</h3>");
/// assert_eq!(render("plain words"), "<p>plain words</p>");
/// assert_eq!(render(""), "");
/// ```
pub fn render(markdown: &str) -> String {
    Transformer::new().render(markdown).html
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_stage_order() {
        let names: Vec<_> = Transformer::new().stage_names().collect();
        assert_eq!(
            names,
            vec![
                "reserve_placeholders",
                "fenced_code",
                "inline_code",
                "escape_text",
                "headers",
                "emphasis",
                "horizontal_rules",
                "lists",
                "links_and_images",
                "blockquotes",
                "restore_code",
                "paragraphs",
            ]
        );
    }

    #[test]
    fn test_plain_text_single_paragraph() {
        let inputs = [
            "just some words",
            "Hello, world! How are you?",
            "line one\nline two\nline three",
            "numbers 1 2 3 and (parens) stay put",
            "semi; colon: comma, period. question?",
            "  leading and trailing spaces  ",
            "quotes \"double\" and 'single'",
        ];
        for input in inputs {
            assert_eq!(render(input), format!("<p>{input}</p>"), "input: {input:?}");
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(render(""), "");
    }

    #[test]
    fn test_whitespace_only_input() {
        assert_eq!(render("  \n\n "), "  \n\n ");
    }

    #[test]
    fn test_script_tag_escaped() {
        let html = render("<script>");
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert_eq!(html, "<p>&lt;script&gt;</p>");
    }

    #[test]
    fn test_code_fence_priority() {
        assert_eq!(
            render("```js\n<b>\n```"),
            r#"<pre><code class="language-js">&lt;b&gt;</code></pre>"#
        );
    }

    #[test]
    fn test_code_fence_body_not_rewritten() {
        assert_eq!(
            render("```md\n# Title\n**bold** and - item\n> quote\n```"),
            "<pre><code class=\"language-md\"># Title\n**bold** and - item\n&gt; quote</code></pre>"
        );
    }

    #[test]
    fn test_inline_code_not_emphasised() {
        assert_eq!(
            render("`*a*`"),
            "<code>*a*</code>"
        );
    }

    #[test]
    fn test_list_grouping() {
        let result = Transformer::new().render("- a\n- b\n- c\n\nafter");
        assert_eq!(result.html.matches("<ul>").count(), 1);
        assert_eq!(result.html.matches("<li>").count(), 3);
        assert_eq!(result.list_sections, 1);
        assert_eq!(
            result.html,
            "<ul><li>a</li><li>b</li><li>c</li></ul><p>\n\nafter</p>"
        );
    }

    #[test]
    fn test_adjacent_blockquotes_merge() {
        let html = render("> a\n> b");
        assert_eq!(html, "<blockquote>a<br>b</blockquote>");
        assert_eq!(html.matches("<blockquote>").count(), 1);
    }

    #[test]
    fn test_heading_precedence() {
        assert_eq!(render("### Title"), "<h3>Title</h3>");
        assert_eq!(render("####### Title"), "<p>####### Title</p>");
    }

    #[test]
    fn test_image_not_link() {
        let html = render("![alt](u)");
        assert_eq!(html, r#"<img src="u" alt="alt">"#);
        assert!(!html.contains("<a"));
    }

    #[test]
    fn test_strong_single_pair() {
        let html = render("**bold**");
        assert_eq!(html, "<strong>bold</strong>");
        assert!(!html.contains("<em>"));
    }

    #[test]
    fn test_horizontal_rule_between_paragraphs() {
        assert_eq!(render("above\n---\nbelow"), "<p>above\n</p><hr><p>\nbelow</p>");
    }

    #[test]
    fn test_ordered_list_with_emphasis_and_link() {
        assert_eq!(
            render("1. **one**\n2. [two](t.html)"),
            r#"<ol><li><strong>one</strong></li><li><a href="t.html">two</a></li></ol>"#
        );
    }

    #[test]
    fn test_star_list_items() {
        assert_eq!(
            render("* plain\n* two"),
            "<ul><li>plain</li><li>two</li></ul>"
        );
    }

    #[test]
    fn test_dash_list_with_emphasis() {
        assert_eq!(
            render("- plain\n- with *em*"),
            "<ul><li>plain</li><li>with <em>em</em></li></ul>"
        );
    }

    #[test]
    fn test_list_run_keeps_unmarked_lines() {
        assert_eq!(
            render("- a\ntext\n- b\n\nafter"),
            "<ul><li>a</li><li>text</li><li>b</li></ul><p>\n\nafter</p>"
        );
        assert_eq!(
            render("- a\nparagraph"),
            "<ul><li>a</li><li>paragraph</li></ul>"
        );
    }

    #[test]
    fn test_emphasis_with_spaced_interior() {
        assert_eq!(render("** a **"), "<strong> a </strong>");
        assert_eq!(render("x * y * z"), "<p>x </p><em> y </em><p> z</p>");
    }

    #[test]
    fn test_placeholder_characters_in_input() {
        let result = Transformer::new().render("keep \u{E000}0\u{E001} this and `x`");
        assert_eq!(
            result.html,
            "<p>keep \u{E000}0\u{E001} this and </p><code>x</code>"
        );
        assert_eq!(result.code_spans, 1);
        assert_eq!(
            render("drop \u{E000}5\u{E001} nothing"),
            "<p>drop \u{E000}5\u{E001} nothing</p>"
        );
    }

    #[test]
    fn test_unused_quote_marker_escaped() {
        assert_eq!(render(">"), "<p>&gt;</p>");
        assert_eq!(render("- a\n> b"), "<ul><li>a</li><li>&gt; b</li></ul>");
    }

    #[test]
    fn test_header_with_inline_code() {
        assert_eq!(
            render("## Use `Vec<T>`"),
            "<h2>Use <code>Vec&lt;T&gt;</code></h2>"
        );
    }

    #[test]
    fn test_unterminated_fence_is_literal() {
        let html = render("```js\nlet x = 1;");
        assert!(html.starts_with("<p>"));
        assert!(html.contains("```js"));
    }

    #[test]
    fn test_ampersand_in_text() {
        assert_eq!(render("fish & chips"), "<p>fish &amp; chips</p>");
    }

    #[test]
    fn test_code_span_count() {
        let result = Transformer::new().render("`a` then\n```\nb\n```");
        assert_eq!(result.code_spans, 2);
    }

    #[test]
    fn test_document() {
        let markdown = "# Notes\n\
                        \n\
                        Intro with **bold** text.\n\
                        \n\
                        - one\n\
                        - two\n\
                        \n\
                        > quoted\n\
                        > more\n\
                        \n\
                        ```rust\n\
                        fn main() {}\n\
                        ```";
        assert_eq!(
            render(markdown),
            "<h1>Notes</h1><p>\n\nIntro with </p><strong>bold</strong><p> text.\n\n</p>\
             <ul><li>one</li><li>two</li></ul>\n\n\
             <blockquote>quoted<br>more</blockquote>\n\n\
             <pre><code class=\"language-rust\">fn main() {}</code></pre>"
        );
    }
}
